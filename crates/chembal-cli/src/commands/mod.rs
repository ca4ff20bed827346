pub mod balance;
pub mod batch;
pub mod interactive;

use chembal::workflows::balance::BalancedEquation;
use std::io::{self, Write};

/// Prints a balanced equation followed by its verification verdict.
pub(crate) fn write_balanced<W: Write>(out: &mut W, balanced: &BalancedEquation) -> io::Result<()> {
    writeln!(out, "{}", balanced)?;
    writeln!(out, "Balanced correctly: {}", balanced.is_balanced())
}
