use crate::core::io::corpus::CorpusEntry;
use crate::engine::config::SolverConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::workflows::balance;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A corpus entry whose balancing outcome disagreed with its flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub entry: CorpusEntry,
    pub balanced: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub read: usize,
    pub correct: usize,
    /// Mismatched entries in corpus order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Fraction of entries scored correct, in `[0, 1]`. An empty batch scores `0`.
    pub fn success_rate(&self) -> f64 {
        if self.read == 0 {
            0.0
        } else {
            self.correct as f64 / self.read as f64
        }
    }
}

/// Balances every entry and scores it against its expected flag.
///
/// Entries are independent; with the `parallel` feature they are balanced on
/// the rayon pool. A malformed equation counts as not balanceable.
#[instrument(skip_all, name = "batch_workflow", fields(entries = entries.len()))]
pub fn run(entries: &[CorpusEntry], config: &SolverConfig, reporter: &ProgressReporter) -> BatchReport {
    reporter.report(Progress::BatchStart {
        total: entries.len() as u64,
    });
    info!("Scoring {} equation(s).", entries.len());

    #[cfg(not(feature = "parallel"))]
    let iterator = entries.iter();

    #[cfg(feature = "parallel")]
    let iterator = entries.par_iter();

    let outcomes: Vec<bool> = iterator
        .map(|entry| {
            let balanced = match balance::run(&entry.equation, config) {
                Ok(result) => result.is_balanced(),
                Err(e) => {
                    debug!(equation = %entry.equation, error = %e, "Equation not balanced.");
                    false
                }
            };
            reporter.report(Progress::EquationProcessed {
                correct: balanced == entry.balanceable,
            });
            balanced
        })
        .collect();

    let failures: Vec<BatchFailure> = entries
        .iter()
        .zip(&outcomes)
        .filter(|(entry, balanced)| **balanced != entry.balanceable)
        .map(|(entry, &balanced)| {
            reporter.report(Progress::Message(format!("Mismatch: {}", entry.equation)));
            BatchFailure {
                entry: entry.clone(),
                balanced,
            }
        })
        .collect();

    let report = BatchReport {
        read: entries.len(),
        correct: entries.len() - failures.len(),
        failures,
    };

    reporter.report(Progress::BatchFinish);
    info!(
        "Batch complete: {}/{} correct ({:.2}%).",
        report.correct,
        report.read,
        report.success_rate() * 100.0
    );
    report
}
