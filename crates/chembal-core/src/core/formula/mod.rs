//! Molecular formula parsing.
//!
//! Converts a formula such as `Ca(NO3)2` into per-element atom counts. The
//! [`tokenizer`] splits the text into element symbols, parentheses and digit
//! runs; the [`parser`] groups those tokens with an explicit stack of pending
//! groups and tallies the expanded result.

pub mod parser;
pub mod tokenizer;

pub use parser::parse_formula;

use thiserror::Error;

/// Syntax errors in a formula or in the equation text around it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Not a molecule nor atom: the formula is empty")]
    EmptyFormula,

    #[error("Brackets do not match: {open} opening vs {close} closing")]
    UnbalancedParentheses { open: usize, close: usize },

    #[error("Closing bracket at position {position} has no matching opening bracket")]
    UnmatchedClosingParenthesis { position: usize },

    #[error("Multiplier at position {position} does not follow an atom or a group")]
    DanglingMultiplier { position: usize },

    #[error("Multiplier '{digits}' is too large")]
    MultiplierOverflow { digits: String },

    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("The equation should contain precisely one -> sign, found {found}")]
    InvalidSideCount { found: usize },

    #[error("Molecule '{molecule}' contains an invalid character")]
    InvalidCharacter { molecule: String },
}
