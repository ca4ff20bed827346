use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ChemBal Developers",
    version,
    about = "ChemBal CLI - Balances chemical equations by solving for the null space of their stoichiometric matrix.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch scoring.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a solver configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S solver.max-multiplier=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Balance one or more equations given on the command line.
    Balance(BalanceArgs),
    /// Start an interactive session that balances equations typed at the prompt.
    Interactive,
    /// Score a corpus of `equation;True|False` lines against their expected outcome.
    Batch(BatchArgs),
}

/// Arguments for the `balance` subcommand.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Equations to balance, e.g. "H2 + O2 -> H2O".
    #[arg(required = true, value_name = "EQUATION")]
    pub equations: Vec<String>,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Path to the corpus file.
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,

    /// Print every equation whose outcome differs from its expected flag.
    #[arg(long)]
    pub show_failures: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_accepts_multiple_equations() {
        let cli = Cli::parse_from(["chembal", "balance", "H2 + O2 -> H2O", "Fe + O2 -> Fe2O3"]);
        match cli.command {
            Commands::Balance(args) => assert_eq!(args.equations.len(), 2),
            other => panic!("Expected 'balance' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::parse_from([
            "chembal",
            "batch",
            "corpus.txt",
            "--show-failures",
            "-vv",
            "-j",
            "4",
            "-S",
            "solver.max-multiplier=100",
            "-S",
            "solver.rescale-strategy=largest-multiplier",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(4));
        assert_eq!(cli.set_values.len(), 2);
        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.file, PathBuf::from("corpus.txt"));
                assert!(args.show_failures);
            }
            other => panic!("Expected 'batch' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["chembal", "-q", "-v", "interactive"]).is_err());
    }

    #[test]
    fn balance_requires_an_equation() {
        assert!(Cli::try_parse_from(["chembal", "balance"]).is_err());
    }
}
