use crate::core::formula::FormatError;
use crate::core::io::equation::parse_equation;
use crate::core::models::equation::Equation;
use crate::engine::config::SolverConfig;
use crate::engine::error::BalancingError;
use crate::engine::matrix::StoichiometricMatrix;
use crate::engine::solver::{CoefficientSolver, CoefficientVector};
use crate::engine::validator::{ValidationReport, partition_by_sign, validate_balance};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BalanceError {
    #[error("Invalid equation: {0}")]
    Format(#[from] FormatError),

    #[error(transparent)]
    Balancing(#[from] BalancingError),
}

/// An equation together with its signed coefficients and validation result.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedEquation {
    pub equation: Equation,
    pub coefficients: CoefficientVector,
    pub report: ValidationReport,
}

impl BalancedEquation {
    pub fn is_balanced(&self) -> bool {
        self.report.balanced
    }

    pub fn reactant_coefficients(&self) -> Vec<u64> {
        partition_by_sign(self.coefficients.as_slice()).0
    }

    pub fn product_coefficients(&self) -> Vec<u64> {
        partition_by_sign(self.coefficients.as_slice()).1
    }
}

/// Writes every coefficient, including 1, with single spaces around `+` and `->`,
/// whatever spacing the input used.
impl fmt::Display for BalancedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (negatives, positives) = partition_by_sign(self.coefficients.as_slice());
        write_side(f, self.equation.reactants(), &negatives)?;
        write!(f, " -> ")?;
        write_side(f, self.equation.products(), &positives)
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, molecules: &[String], coefficients: &[u64]) -> fmt::Result {
    for (i, (molecule, coefficient)) in molecules.iter().zip(coefficients).enumerate() {
        if i > 0 {
            write!(f, " + ")?;
        }
        write!(f, "{} {}", coefficient, molecule)?;
    }
    Ok(())
}

/// Balances a single equation such as `"H2 + O2 -> H2O"`.
///
/// # Errors
///
/// - [`BalanceError::Format`] when the equation or one of its formulas is malformed.
/// - [`BalanceError::Balancing`] when the equation is skeletal or the solution
///   does not assign a nonzero coefficient with the right sign to every molecule.
///
/// # Examples
///
/// ```
/// use chembal::engine::config::SolverConfig;
/// use chembal::workflows::balance;
///
/// let balanced = balance::run("H2 + O2 -> H2O", &SolverConfig::default()).unwrap();
/// assert_eq!(balanced.to_string(), "2 H2 + 1 O2 -> 2 H2O");
/// assert!(balanced.is_balanced());
/// ```
#[instrument(skip_all, name = "balance_workflow", fields(equation = equation))]
pub fn run(equation: &str, config: &SolverConfig) -> Result<BalancedEquation, BalanceError> {
    let equation = parse_equation(equation)?;
    let system = StoichiometricMatrix::from_equation(&equation)?;
    debug!(matrix = %system, "Solving system.");

    let solved = CoefficientSolver::new(config).solve(&system)?;
    let coefficients = orient(solved, system.reactant_count());
    check_signs(&equation, &coefficients)?;

    let report = validate_balance(
        equation.reactants(),
        equation.products(),
        coefficients.as_slice(),
    )?;
    if report.balanced {
        info!(coefficients = ?coefficients.to_integers(), "Equation balanced.");
    } else {
        warn!(
            reactants = %report.reactant_atoms,
            products = %report.product_atoms,
            "Coefficients do not conserve every atom."
        );
    }

    Ok(BalancedEquation {
        equation,
        coefficients,
        report,
    })
}

/// Whether `equation` can be balanced and the result verifies.
///
/// Malformed input and skeletal equations both yield `false`.
pub fn balance_equation(equation: &str) -> bool {
    match run(equation, &SolverConfig::default()) {
        Ok(balanced) => balanced.is_balanced(),
        Err(e) => {
            debug!(error = %e, "Equation could not be balanced.");
            false
        }
    }
}

/// Flips the vector when reactants came out positive and products negative.
fn orient(coefficients: CoefficientVector, reactant_count: usize) -> CoefficientVector {
    let (reactants, products) = coefficients.as_slice().split_at(reactant_count);
    if reactants.iter().all(|&c| c > 0.0) && products.iter().all(|&c| c < 0.0) {
        coefficients.negated()
    } else {
        coefficients
    }
}

fn check_signs(equation: &Equation, coefficients: &CoefficientVector) -> Result<(), BalancingError> {
    let values = coefficients.as_slice();
    let negatives = values.iter().filter(|&&c| c < 0.0).count();
    let positives = values.iter().filter(|&&c| c > 0.0).count();
    let reactants = equation.reactants().len();
    let products = equation.products().len();

    if negatives != reactants || positives != products {
        return Err(BalancingError::SignMismatch {
            reactants,
            negatives,
            products,
            positives,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{RescaleStrategy, SolverConfigBuilder};

    fn balance(equation: &str) -> Result<BalancedEquation, BalanceError> {
        run(equation, &SolverConfig::default())
    }

    #[test]
    fn water_synthesis_renders_every_coefficient() {
        let balanced = balance("H2 + O2 -> H2O").unwrap();
        assert_eq!(balanced.coefficients.to_integers(), vec![-2, -1, 2]);
        assert_eq!(balanced.to_string(), "2 H2 + 1 O2 -> 2 H2O");
        assert!(balanced.is_balanced());
    }

    #[test]
    fn whitespace_in_the_equation_is_ignored() {
        let balanced = balance("  C7H16+O2   ->CO2 +  H2O ").unwrap();
        assert_eq!(balanced.to_string(), "1 C7H16 + 11 O2 -> 7 CO2 + 8 H2O");
    }

    #[test]
    fn copper_nitric_acid_reaction_is_balanced() {
        let balanced = balance("Cu + HNO3 -> Cu(NO3)2 + NO + H2O").unwrap();
        assert_eq!(balanced.reactant_coefficients(), vec![3, 8]);
        assert_eq!(balanced.product_coefficients(), vec![3, 2, 4]);
    }

    #[test]
    fn square_system_is_balanced() {
        let balanced = balance("CaO + N2O5 -> Ca(NO3)2").unwrap();
        assert_eq!(balanced.to_string(), "1 CaO + 1 N2O5 -> 1 Ca(NO3)2");
    }

    #[test]
    fn skeletal_equation_is_reported() {
        let err = balance("FeS2 + HNO3 -> Fe2(SO4)3 + NO + H2SO4").unwrap_err();
        assert_eq!(err, BalanceError::Balancing(BalancingError::Skeletal));
        assert_eq!(err.to_string(), "Skeletal equation - cannot be balanced!");
    }

    #[test]
    fn identical_sides_balance_one_to_one() {
        let balanced = balance("H2O -> H2O").unwrap();
        assert_eq!(balanced.to_string(), "1 H2O -> 1 H2O");
    }

    #[test]
    fn missing_arrow_is_a_format_error() {
        assert!(matches!(
            balance("H2 + O2 = H2O"),
            Err(BalanceError::Format(FormatError::InvalidSideCount { found: 0 }))
        ));
    }

    #[test]
    fn malformed_formula_is_a_format_error() {
        assert!(matches!(
            balance("H2 + O2) -> H2O"),
            Err(BalanceError::Format(_))
        ));
    }

    #[test]
    fn orient_flips_reversed_solutions() {
        let flipped = orient(CoefficientVector::new(vec![2.0, 1.0, -2.0]), 2);
        assert_eq!(flipped.to_integers(), vec![-2, -1, 2]);

        let kept = orient(CoefficientVector::new(vec![-2.0, 1.0, -2.0]), 2);
        assert_eq!(kept.to_integers(), vec![-2, 1, -2]);
    }

    #[test]
    fn wrong_sign_pattern_is_a_sign_mismatch() {
        let equation = Equation::new(vec!["A".into(), "B".into()], vec!["C".into()]);
        let err = check_signs(&equation, &CoefficientVector::new(vec![-1.0, 1.0, 1.0])).unwrap_err();
        assert_eq!(
            err,
            BalancingError::SignMismatch {
                reactants: 2,
                negatives: 1,
                products: 1,
                positives: 2,
            }
        );
    }

    #[test]
    fn zero_coefficient_is_a_sign_mismatch() {
        let equation = Equation::new(vec!["A".into(), "B".into()], vec!["C".into()]);
        assert!(check_signs(&equation, &CoefficientVector::new(vec![-1.0, 0.0, 1.0])).is_err());
    }

    #[test]
    fn largest_multiplier_strategy_still_balances_simple_equations() {
        let config = SolverConfigBuilder::new()
            .rescale_strategy(RescaleStrategy::LargestMultiplier)
            .build()
            .unwrap();
        let balanced = run("Fe + O2 -> Fe2O3", &config).unwrap();
        assert!(balanced.is_balanced());
        assert_eq!(balanced.to_string(), "4 Fe + 3 O2 -> 2 Fe2O3");
    }

    #[test]
    fn balance_equation_reports_a_boolean() {
        assert!(balance_equation("Al + HCl -> AlCl3 + H2"));
        assert!(!balance_equation("CO + CO2 + H2 -> CH4 + H2O"));
        assert!(!balance_equation("H2 -> "));
    }
}
