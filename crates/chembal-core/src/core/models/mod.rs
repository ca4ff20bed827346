//! # Core Models Module
//!
//! Plain data structures describing what is being balanced.
//!
//! - [`atom_count`] - Insertion-ordered per-element tallies of a molecule or of an equation side
//! - [`equation`] - Reactant and product formulas of one equation
//!
//! ```
//! use chembal::core::models::{atom_count::AtomCount, equation::Equation};
//!
//! let equation = Equation::new(vec!["H2".into(), "O2".into()], vec!["H2O".into()]);
//! assert_eq!(equation.molecule_count(), 3);
//!
//! let mut tally = AtomCount::new();
//! tally.add("H", 2);
//! assert_eq!(tally.get("H"), 2);
//! ```

pub mod atom_count;
pub mod equation;
