//! Text input handled around the core algorithms.
//!
//! [`equation`] splits raw equation text into reactant and product formulas
//! with a delimiter and character-class syntax check. [`corpus`] reads the
//! `equation;True|False` regression files used for batch scoring.

pub mod corpus;
pub mod equation;
