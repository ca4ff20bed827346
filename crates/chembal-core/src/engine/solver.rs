use super::config::SolverConfig;
use super::error::BalancingError;
use super::matrix::StoichiometricMatrix;
use super::rescale::rescale;
use nalgebra::DMatrix;
use tracing::{debug, instrument, trace};

/// Signed integer coefficients, one per molecule column.
///
/// Negative entries belong to reactants and positive entries to products.
/// Values are whole numbers stored as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVector {
    values: Vec<f64>,
}

impl CoefficientVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_integers(&self) -> Vec<i64> {
        self.values.iter().map(|v| v.round() as i64).collect()
    }

    pub fn negated(&self) -> Self {
        Self::new(self.values.iter().map(|v| -v).collect())
    }
}

/// Derives balancing coefficients from a stoichiometric matrix.
///
/// The null space of the matrix is found by the matrix-inversion method for
/// balancing equations: the matrix is made square by appending "nullity"
/// rows `(0, …, 0, 1)` that pin the last molecule's coefficient, the result
/// is inverted, and the last column of the inverse is a null-space vector.
///
/// - With more atoms than molecules the last row is dropped first.
/// - A square matrix is reduced to row-echelon form and each all-zero row is
///   replaced by a nullity row. A square matrix with no zero row has only the
///   trivial null space.
/// - A wide matrix receives `columns - rank` nullity rows.
///
/// Any augmented matrix that is not square and invertible means the equation
/// is skeletal.
pub struct CoefficientSolver<'a> {
    config: &'a SolverConfig,
}

impl<'a> CoefficientSolver<'a> {
    pub fn new(config: &'a SolverConfig) -> Self {
        Self { config }
    }

    /// Solves for integer coefficients.
    ///
    /// # Errors
    ///
    /// - [`BalancingError::EmptySystem`] when the matrix has no columns.
    /// - [`BalancingError::Skeletal`] when no unique nonzero conservation solution exists.
    #[instrument(skip_all, name = "coefficient_solver", fields(atoms = system.atoms().len(), molecules = system.molecule_count()))]
    pub fn solve(
        &self,
        system: &StoichiometricMatrix,
    ) -> Result<CoefficientVector, BalancingError> {
        let columns = system.molecule_count();
        if columns == 0 {
            return Err(BalancingError::EmptySystem);
        }

        let mut working = system.matrix().clone();
        if working.nrows() > columns {
            let last = working.nrows() - 1;
            trace!(row = last, "Dropping last row of over-determined matrix.");
            working = working.remove_row(last);
        }

        let augmented = if working.nrows() == columns {
            self.augment_square(working)?
        } else {
            self.augment_wide(working)
        };

        let raw = self.null_space_vector(augmented)?;
        debug!(?raw, "Computed raw coefficients.");

        Ok(CoefficientVector::new(rescale(&raw, self.config)))
    }

    fn augment_square(&self, mut matrix: DMatrix<f64>) -> Result<DMatrix<f64>, BalancingError> {
        gaussian_elimination(&mut matrix, self.config.zero_tolerance);

        let columns = matrix.ncols();
        let mut replaced = 0;
        for i in 0..matrix.nrows() {
            if is_zero_row(&matrix, i, self.config.zero_tolerance) {
                set_nullity_row(&mut matrix, i);
                replaced += 1;
            }
        }
        trace!(replaced, columns, "Replaced zero rows with nullity rows.");

        if replaced == 0 {
            debug!("Square matrix has full rank; only the trivial solution exists.");
            return Err(BalancingError::Skeletal);
        }
        Ok(matrix)
    }

    fn augment_wide(&self, matrix: DMatrix<f64>) -> DMatrix<f64> {
        let columns = matrix.ncols();
        let rank = matrix.rank(self.config.zero_tolerance);
        let missing = columns.abs_diff(rank);
        trace!(rank, missing, "Appending nullity rows.");

        let mut augmented = matrix;
        for _ in 0..missing {
            let row = augmented.nrows();
            augmented = augmented.insert_row(row, 0.0);
            set_nullity_row(&mut augmented, row);
        }
        augmented
    }

    fn null_space_vector(&self, matrix: DMatrix<f64>) -> Result<Vec<f64>, BalancingError> {
        let n = matrix.ncols();
        if matrix.nrows() != n || matrix.rank(self.config.zero_tolerance) < n {
            debug!(
                rows = matrix.nrows(),
                columns = n,
                "Augmented matrix is singular."
            );
            return Err(BalancingError::Skeletal);
        }
        let inverse = matrix.try_inverse().ok_or(BalancingError::Skeletal)?;
        Ok(inverse.column(n - 1).iter().copied().collect())
    }
}

/// Solves `system` with the default [`SolverConfig`].
pub fn solve(system: &StoichiometricMatrix) -> Result<CoefficientVector, BalancingError> {
    CoefficientSolver::new(&SolverConfig::default()).solve(system)
}

/// Reduces a square matrix to row-echelon form in place.
///
/// For each pivot column the rows at and below the pivot are scanned and any
/// row with a larger magnitude in that column is swapped into the pivot
/// position. Rows below are then eliminated; a pivot within `tolerance` of
/// zero eliminates nothing.
pub fn gaussian_elimination(matrix: &mut DMatrix<f64>, tolerance: f64) {
    let n = matrix.nrows().min(matrix.ncols());
    for k in 0..n {
        for i in k..matrix.nrows() {
            if matrix[(i, k)].abs() > matrix[(k, k)].abs() {
                matrix.swap_rows(k, i);
            }
        }

        let pivot = matrix[(k, k)];
        for j in (k + 1)..matrix.nrows() {
            let q = if pivot.abs() > tolerance {
                matrix[(j, k)] / pivot
            } else {
                0.0
            };
            for m in k..matrix.ncols() {
                matrix[(j, m)] -= q * matrix[(k, m)];
            }
        }
    }
}

fn is_zero_row(matrix: &DMatrix<f64>, row: usize, tolerance: f64) -> bool {
    matrix.row(row).iter().all(|v| v.abs() <= tolerance)
}

fn set_nullity_row(matrix: &mut DMatrix<f64>, row: usize) {
    let last = matrix.ncols() - 1;
    matrix.row_mut(row).fill(0.0);
    matrix[(row, last)] = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn coefficients(reactants: &[&str], products: &[&str]) -> Result<Vec<i64>, BalancingError> {
        let system = StoichiometricMatrix::build(reactants, products).unwrap();
        solve(&system).map(|v| v.to_integers())
    }

    #[test]
    fn water_synthesis_is_balanced() {
        assert_eq!(coefficients(&["H2", "O2"], &["H2O"]), Ok(vec![-2, -1, 2]));
    }

    #[test]
    fn heptane_combustion_is_balanced() {
        assert_eq!(
            coefficients(&["C7H16", "O2"], &["CO2", "H2O"]),
            Ok(vec![-1, -11, 7, 8])
        );
    }

    #[test]
    fn permanganate_oxidation_is_balanced() {
        assert_eq!(
            coefficients(&["KMnO4", "HCl"], &["MnCl2", "Cl2", "KCl", "H2O"]),
            Ok(vec![-2, -16, 2, 5, 2, 8])
        );
    }

    #[test]
    fn iodide_chlorate_reaction_is_balanced() {
        assert_eq!(
            coefficients(&["KI", "KClO3", "HCl"], &["I2", "H2O", "KCl"]),
            Ok(vec![-6, -1, -6, 3, 3, 7])
        );
    }

    #[test]
    fn photosynthesis_is_balanced() {
        assert_eq!(
            coefficients(&["CO2", "H2O"], &["C6H12O6", "O2"]),
            Ok(vec![-6, -6, 1, 6])
        );
    }

    #[test]
    fn square_matrix_cases_are_balanced() {
        assert_eq!(coefficients(&["CaO", "N2O5"], &["Ca(NO3)2"]), Ok(vec![-1, -1, 1]));
        assert_eq!(
            coefficients(&["PCl5", "H2O"], &["H3PO4", "HCl"]),
            Ok(vec![-1, -4, 1, 5])
        );
        assert_eq!(
            coefficients(&["AgI", "Na2S"], &["Ag2S", "NaI"]),
            Ok(vec![-2, -1, 1, 2])
        );
        assert_eq!(
            coefficients(&["Ba3N2", "H2O"], &["Ba(OH)2", "NH3"]),
            Ok(vec![-1, -6, 3, 2])
        );
    }

    #[test]
    fn wide_matrix_with_fractional_solution_is_rescaled() {
        assert_eq!(coefficients(&["Fe", "O2"], &["Fe2O3"]), Ok(vec![-4, -3, 2]));
    }

    #[test]
    fn over_determined_matrix_drops_last_row() {
        let system = StoichiometricMatrix::build(&["NaCl", "AgNO3"], &["AgCl", "NaNO3"]).unwrap();
        assert_eq!(system.matrix().shape(), (5, 4));
        assert_eq!(
            solve(&system).map(|v| v.to_integers()),
            Ok(vec![-1, -1, 1, 1])
        );

        let system = StoichiometricMatrix::build(
            &["Al2(SO4)3", "Ca(OH)2"],
            &["Al(OH)3", "CaSO4"],
        )
        .unwrap();
        assert_eq!(system.matrix().shape(), (5, 4));
        assert_eq!(
            solve(&system).map(|v| v.to_integers()),
            Ok(vec![-1, -3, 2, 3])
        );
    }

    #[test]
    fn skeletal_equations_are_rejected() {
        assert_eq!(
            coefficients(&["FeS2", "HNO3"], &["Fe2(SO4)3", "NO", "H2SO4"]),
            Err(BalancingError::Skeletal)
        );
        assert_eq!(
            coefficients(&["CO", "CO2", "H2"], &["CH4", "H2O"]),
            Err(BalancingError::Skeletal)
        );
    }

    #[test]
    fn full_rank_square_matrix_is_skeletal() {
        assert_eq!(coefficients(&["H2"], &["O2"]), Err(BalancingError::Skeletal));
    }

    #[test]
    fn gaussian_elimination_produces_row_echelon_form() {
        let mut m = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 1.0, 1.0, 5.0, 6.0, 0.0, 2.0, 2.0]);
        gaussian_elimination(&mut m, TOLERANCE);

        for i in 0..3 {
            for j in 0..i {
                assert!(m[(i, j)].abs() < TOLERANCE);
            }
        }
        assert!(is_zero_row(&m, 2, TOLERANCE));
    }

    #[test]
    fn gaussian_elimination_swaps_in_the_largest_pivot() {
        let mut m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        gaussian_elimination(&mut m, TOLERANCE);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(0, 1)], 4.0);
        assert!(m[(1, 0)].abs() < TOLERANCE);
    }

    #[test]
    fn coefficient_vector_exposes_values() {
        let v = CoefficientVector::new(vec![-2.0, -1.0, 2.0]);
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_slice(), &[-2.0, -1.0, 2.0]);
        assert_eq!(v.negated().to_integers(), vec![2, 1, -2]);
    }
}
