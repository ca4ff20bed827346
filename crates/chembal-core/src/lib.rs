//! # ChemBal Core Library
//!
//! Balances chemical equations such as `KMnO4 + HCl -> MnCl2 + Cl2 + KCl + H2O`
//! by finding the null space of their stoichiometric matrix.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomCount`, `Equation`),
//!   the molecular formula parser and I/O for equation text and test corpora.
//!
//! - **[`engine`]: The Logic Core.** Builds the stoichiometric matrix, solves for
//!   the coefficient vector, rescales it to integers and validates the result.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into
//!   single-equation balancing and batch scoring.
//!
//! ```
//! use chembal::workflows::balance::balance_equation;
//!
//! assert!(balance_equation("C7H16 + O2 -> CO2 + H2O"));
//! assert!(!balance_equation("FeS2 + HNO3 -> Fe2(SO4)3 + NO + H2SO4"));
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
