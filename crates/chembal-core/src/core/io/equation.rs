use crate::core::formula::FormatError;
use crate::core::models::equation::Equation;

/// Separator between the reactant and product sides.
pub const SIDE_SEPARATOR: &str = "->";
/// Separator between molecules on one side.
pub const MOLECULE_SEPARATOR: char = '+';

/// Splits an equation into its left and right side, untrimmed.
///
/// # Errors
///
/// Returns [`FormatError::InvalidSideCount`] unless the text contains exactly one `->`.
pub fn split_sides(equation: &str) -> Result<(&str, &str), FormatError> {
    let sides: Vec<&str> = equation.split(SIDE_SEPARATOR).collect();
    match sides.as_slice() {
        [left, right] => Ok((left, right)),
        _ => Err(FormatError::InvalidSideCount {
            found: sides.len() - 1,
        }),
    }
}

/// Splits one side of an equation into molecule formulas.
///
/// All whitespace is removed before splitting on `+`. Every resulting token
/// must consist only of ASCII letters, digits and parentheses; empty tokens
/// pass this check and are left for the formula parser to reject.
///
/// # Errors
///
/// Returns [`FormatError::InvalidCharacter`] naming the first offending molecule.
pub fn split_molecules(side: &str) -> Result<Vec<String>, FormatError> {
    let compact: String = side.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(MOLECULE_SEPARATOR)
        .map(|molecule| {
            if molecule.chars().all(is_formula_char) {
                Ok(molecule.to_string())
            } else {
                Err(FormatError::InvalidCharacter {
                    molecule: molecule.to_string(),
                })
            }
        })
        .collect()
}

/// Parses equation text such as `H2 + O2 -> H2O` into an [`Equation`].
///
/// # Errors
///
/// Any error of [`split_sides`] or [`split_molecules`], or
/// [`FormatError::EmptyFormula`] when a side contains an empty molecule
/// (e.g. `H2 + -> H2O` or ` -> H2O`).
pub fn parse_equation(equation: &str) -> Result<Equation, FormatError> {
    let (left, right) = split_sides(equation)?;
    let reactants = split_molecules(left)?;
    let products = split_molecules(right)?;

    if reactants.iter().chain(products.iter()).any(String::is_empty) {
        return Err(FormatError::EmptyFormula);
    }
    Ok(Equation::new(reactants, products))
}

fn is_formula_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '(' || c == ')'
}
