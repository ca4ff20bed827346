//! # Workflows Module
//!
//! High-level entry points that take equation text in and hand balanced
//! results out.
//!
//! ## Architecture
//!
//! - **Balance Workflow** ([`balance`]) - Parses, solves, orients and validates a single equation.
//! - **Batch Workflow** ([`batch`]) - Scores a corpus of equations against their expected
//!   outcome, in parallel when the `parallel` feature is enabled.

pub mod balance;
pub mod batch;
