use std::fmt;

/// A chemical equation split into its reactant and product formulas.
///
/// Formulas are stored exactly as they were written (whitespace removed) and
/// are never modified; parsing them into atom counts happens on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    reactants: Vec<String>,
    products: Vec<String>,
}

impl Equation {
    pub fn new(reactants: Vec<String>, products: Vec<String>) -> Self {
        Self {
            reactants,
            products,
        }
    }

    pub fn reactants(&self) -> &[String] {
        &self.reactants
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Total number of molecules, i.e. the column count of the equation's matrix.
    pub fn molecule_count(&self) -> usize {
        self.reactants.len() + self.products.len()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.reactants.join(" + "),
            self.products.join(" + ")
        )
    }
}
