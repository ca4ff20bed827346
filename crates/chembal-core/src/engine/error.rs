use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalancingError {
    #[error("Skeletal equation - cannot be balanced!")]
    Skeletal,

    #[error("The equation has no molecules to balance")]
    EmptySystem,

    #[error(
        "Coefficient signs do not match the equation sides: {negatives} negative for {reactants} reactant(s), {positives} positive for {products} product(s)"
    )]
    SignMismatch {
        reactants: usize,
        negatives: usize,
        products: usize,
        positives: usize,
    },
}
