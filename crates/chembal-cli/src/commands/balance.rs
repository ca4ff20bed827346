use super::write_balanced;
use crate::cli::BalanceArgs;
use crate::config::AppConfig;
use crate::error::Result;
use chembal::workflows::balance::{self, BalanceError};
use std::io::Write;
use tracing::{info, warn};

/// Balances each equation in turn.
///
/// A skeletal equation is reported and the remaining equations are still
/// processed; a syntax error stops the command.
pub fn run(args: BalanceArgs, config: &AppConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    balance_all(&args.equations, config, &mut out)
}

fn balance_all<W: Write>(equations: &[String], config: &AppConfig, out: &mut W) -> Result<()> {
    for equation in equations {
        info!("Balancing '{}'", equation);
        match balance::run(equation, &config.solver) {
            Ok(balanced) => write_balanced(out, &balanced)?,
            Err(BalanceError::Balancing(e)) => {
                warn!("'{}' could not be balanced: {}", equation, e);
                writeln!(out, "{}", e)?;
                writeln!(out, "Balanced correctly: false")?;
            }
            Err(e @ BalanceError::Format(_)) => return Err(e.into()),
        }
    }
    Ok(())
}
