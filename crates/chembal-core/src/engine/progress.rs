/// Events emitted while a batch of equations is being balanced.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    BatchStart { total: u64 },
    /// One equation finished; `correct` tells whether the outcome matched expectations.
    EquationProcessed { correct: bool },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
///
/// A reporter without a callback swallows every event, so library code can
/// report unconditionally.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::BatchStart { total: 3 });
        reporter.report(Progress::BatchFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        reporter.report(Progress::BatchStart { total: 1 });
        reporter.report(Progress::EquationProcessed { correct: true });
        reporter.report(Progress::BatchFinish);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Progress::BatchStart { total: 1 },
                Progress::EquationProcessed { correct: true },
                Progress::BatchFinish,
            ]
        );
    }
}
