use crate::core::formula::{FormatError, parse_formula};
use crate::core::models::atom_count::AtomCount;
use tracing::debug;

/// Per-side atom totals computed from a coefficient vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub reactant_atoms: AtomCount,
    pub product_atoms: AtomCount,
    pub balanced: bool,
}

/// Splits signed coefficients into reactant (negative) and product
/// (positive) magnitudes, preserving order. Zero entries belong to neither side.
pub fn partition_by_sign(coefficients: &[f64]) -> (Vec<u64>, Vec<u64>) {
    let mut negatives = Vec::new();
    let mut positives = Vec::new();
    for &value in coefficients {
        let magnitude = value.abs().round() as u64;
        if magnitude == 0 {
            continue;
        }
        if value < 0.0 {
            negatives.push(magnitude);
        } else {
            positives.push(magnitude);
        }
    }
    (negatives, positives)
}

/// Checks that `coefficients` conserve every atom.
///
/// Negative coefficients are paired with `reactants` and positive ones with
/// `products`, both in order. Each side's total is
/// `Σ |coefficient| × count(molecule)`; the equation is balanced when the two
/// totals agree for every element. A side whose coefficient count differs
/// from its molecule count is reported as unbalanced.
///
/// # Errors
///
/// Returns the [`FormatError`] of the first molecule that fails to parse.
pub fn validate_balance<S: AsRef<str>>(
    reactants: &[S],
    products: &[S],
    coefficients: &[f64],
) -> Result<ValidationReport, FormatError> {
    let (negatives, positives) = partition_by_sign(coefficients);

    let reactant_atoms = side_total(reactants, &negatives)?;
    let product_atoms = side_total(products, &positives)?;

    debug!(reactants = %reactant_atoms, products = %product_atoms, "Computed side totals.");

    let balanced = negatives.len() == reactants.len()
        && positives.len() == products.len()
        && reactant_atoms == product_atoms;

    Ok(ValidationReport {
        reactant_atoms,
        product_atoms,
        balanced,
    })
}

fn side_total<S: AsRef<str>>(molecules: &[S], multipliers: &[u64]) -> Result<AtomCount, FormatError> {
    let mut total = AtomCount::new();
    for (molecule, &multiplier) in molecules.iter().zip(multipliers) {
        total.merge_scaled(&parse_formula(molecule.as_ref())?, multiplier);
    }
    Ok(total)
}
