//! # Core Module
//!
//! Stateless building blocks of the balancer: the molecular-formula parser,
//! the data models it produces, and the text input surrounding them.
//!
//! ## Architecture
//!
//! - **Formula Parsing** ([`formula`]) - Tokenizer and stack-based group parser that expands
//!   nested parentheses and multipliers into per-element counts
//! - **Data Models** ([`models`]) - Insertion-ordered atom tallies and equations
//! - **Text Input** ([`io`]) - Equation side-splitting and regression corpus reading
//!
//! Nothing in this module performs numerical work; the stoichiometric matrix
//! and the solver live in [`crate::engine`].

pub mod formula;
pub mod io;
pub mod models;
