use super::write_balanced;
use crate::config::AppConfig;
use crate::error::Result;
use chembal::workflows::balance;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const EXIT_COMMAND: &str = "exit";
const PROMPT: &str = "Type the equation here: ";

pub fn run(config: &AppConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session(stdin.lock(), stdout.lock(), config)
}

/// Reads equations line by line until `exit` or end of input.
///
/// Every failure, syntactic or skeletal, is printed and the session goes on.
fn session<R: BufRead, W: Write>(input: R, mut out: W, config: &AppConfig) -> Result<()> {
    writeln!(
        out,
        "Hello! Enter a chemical equation in below format and I'll try to balance it for you!"
    )?;
    writeln!(out, "H2 + O2 -> H2O")?;
    writeln!(out, "\nIf you wish to end the program, just type: {}", EXIT_COMMAND)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed, ending session.");
            break;
        };
        let line = line?;
        let equation = line.trim();

        if equation == EXIT_COMMAND {
            writeln!(out, "Thank you! See you soon!")?;
            break;
        }
        if equation.is_empty() {
            continue;
        }

        info!("Balancing '{}'", equation);
        match balance::run(equation, &config.solver) {
            Ok(balanced) => write_balanced(&mut out, &balanced)?,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
    Ok(())
}
