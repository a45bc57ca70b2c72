use super::config::TerminationPolicy;
use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_DESCRIPTION: &str = "Sending emails";
const BOUNDED_TEMPLATE: &str =
    "{msg} [{bar:50}] {pos}/{len} ({per_sec}) [{elapsed_precise}]";
const UNBOUNDED_TEMPLATE: &str = "{spinner} {msg} {pos} ({per_sec}) [{elapsed_precise}]";

/// Receives progress signals from the driver. Calls must return quickly, the
/// driver invokes them from worker tasks.
pub trait ProgressSink: Send + Sync {
    fn increment(&self);
    fn finish(&self);
}

/// Discards every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn increment(&self) {}

    fn finish(&self) {}
}

/// Terminal progress bar: bounded for count runs, an open-ended counter for duration runs.
#[derive(Debug, Clone)]
pub struct BenchmarkProgress {
    bar: ProgressBar,
}

impl BenchmarkProgress {
    pub fn new(termination: TerminationPolicy) -> Self {
        let bar = match termination {
            TerminationPolicy::Count(count) => {
                let bar = ProgressBar::new(count.get());
                bar.set_style(
                    ProgressStyle::with_template(BOUNDED_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            TerminationPolicy::Duration(_) => {
                let bar = ProgressBar::no_length();
                bar.set_style(
                    ProgressStyle::with_template(UNBOUNDED_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(PROGRESS_DESCRIPTION);
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressSink for BenchmarkProgress {
    fn increment(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.abandon();
    }
}
