use crate::core::formula::{FormatError, parse_formula};
use crate::core::models::atom_count::AtomCount;
use crate::core::models::equation::Equation;
use nalgebra::DMatrix;
use std::fmt;
use tracing::debug;

/// Atoms × molecules count matrix expressing conservation of every element.
///
/// Rows follow the order in which atoms are first seen scanning the
/// reactants, then any atoms that occur only among the products in
/// product-scan order. Columns are the reactants followed by the products,
/// each in input order. Entries are non-negative counts.
///
/// For `H2 + O2 -> H2O`:
///
/// ```text
///      H2  O2  H2O
/// H    2   0   2
/// O    0   2   1
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometricMatrix {
    atoms: Vec<String>,
    matrix: DMatrix<f64>,
    reactant_count: usize,
}

impl StoichiometricMatrix {
    /// Builds the matrix for the given reactant and product formulas.
    ///
    /// # Errors
    ///
    /// Propagates the [`FormatError`] of the first formula that fails to parse.
    pub fn build<S: AsRef<str>>(reactants: &[S], products: &[S]) -> Result<Self, FormatError> {
        let reactant_atoms = parse_all(reactants)?;
        let product_atoms = parse_all(products)?;

        let atoms = unique_atoms(&reactant_atoms, &product_atoms);
        let columns: Vec<&AtomCount> = reactant_atoms.iter().chain(product_atoms.iter()).collect();

        let matrix = DMatrix::from_fn(atoms.len(), columns.len(), |row, col| {
            columns[col].get(&atoms[row]) as f64
        });

        debug!(
            atoms = ?atoms,
            rows = matrix.nrows(),
            columns = matrix.ncols(),
            "Built stoichiometric matrix."
        );

        Ok(Self {
            atoms,
            matrix,
            reactant_count: reactants.len(),
        })
    }

    pub fn from_equation(equation: &Equation) -> Result<Self, FormatError> {
        Self::build(equation.reactants(), equation.products())
    }

    /// Element symbols labelling the rows, in row order.
    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of leading columns that belong to reactants.
    pub fn reactant_count(&self) -> usize {
        self.reactant_count
    }

    pub fn molecule_count(&self) -> usize {
        self.matrix.ncols()
    }
}

impl fmt::Display for StoichiometricMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (atom, row) in self.atoms.iter().zip(self.matrix.row_iter()) {
            write!(f, "{:<3}", atom)?;
            for value in row.iter() {
                write!(f, " {:>4}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_all<S: AsRef<str>>(molecules: &[S]) -> Result<Vec<AtomCount>, FormatError> {
    molecules.iter().map(|m| parse_formula(m.as_ref())).collect()
}

fn unique_atoms(reactants: &[AtomCount], products: &[AtomCount]) -> Vec<String> {
    let mut seen = AtomCount::new();
    for molecule in reactants.iter().chain(products.iter()) {
        for symbol in molecule.symbols() {
            seen.add(symbol, 1);
        }
    }
    seen.symbols().map(str::to_string).collect()
}
