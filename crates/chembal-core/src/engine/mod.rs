//! # Engine Module
//!
//! This module turns parsed equations into balancing coefficients.
//!
//! ## Overview
//!
//! The engine builds the stoichiometric matrix of an equation, finds a vector
//! in its null space by matrix inversion, rescales that vector to minimal
//! integers and verifies that the result conserves every element. It owns no
//! global state: each call works on its own matrix and vector.
//!
//! ## Architecture
//!
//! - **Matrix Construction** ([`matrix`]) - Atoms × molecules count matrix
//! - **Coefficient Solving** ([`solver`]) - Nullity-row augmentation, Gaussian elimination and inversion
//! - **Rescaling** ([`rescale`]) - Conversion of floating-point solutions to whole numbers
//! - **Validation** ([`validator`]) - Per-side atom totals and the balance verdict
//! - **Configuration** ([`config`]) - Numeric tolerances and rescaling strategy
//! - **Progress Monitoring** ([`progress`]) - Event reporting for batch runs
//! - **Error Handling** ([`error`]) - Balancing failures

pub mod config;
pub mod error;
pub mod matrix;
pub mod progress;
pub mod rescale;
pub mod solver;
pub mod validator;
