use crate::error::MailBenchError;
use std::fmt::{Display, Formatter};
use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;

/// When the driver stops dispatching new sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Keep dispatching until the wall-clock limit has passed.
    Duration(Duration),
    /// Dispatch exactly this many send attempts.
    Count(NonZeroU64),
}

impl Display for TerminationPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationPolicy::Duration(duration) => {
                write!(f, "for {}", humantime::format_duration(*duration))
            }
            TerminationPolicy::Count(count) => write!(f, "{count} emails"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    max_concurrency: NonZeroUsize,
    termination: TerminationPolicy,
}

impl RunConfig {
    pub fn new(
        max_concurrency: NonZeroUsize,
        termination: TerminationPolicy,
    ) -> Result<Self, MailBenchError> {
        if max_concurrency.get() > Semaphore::MAX_PERMITS {
            return Err(MailBenchError::InvalidConfiguration(format!(
                "max concurrency {} exceeds the limit of {}",
                max_concurrency,
                Semaphore::MAX_PERMITS
            )));
        }
        if let TerminationPolicy::Duration(duration) = termination {
            if duration.is_zero() {
                return Err(MailBenchError::InvalidConfiguration(
                    "benchmark duration must be greater than zero".to_owned(),
                ));
            }
            if Instant::now().checked_add(duration).is_none() {
                return Err(MailBenchError::InvalidConfiguration(format!(
                    "benchmark duration {} is too large",
                    humantime::format_duration(duration)
                )));
            }
        }
        Ok(Self {
            max_concurrency,
            termination,
        })
    }

    pub fn duration_bounded(
        max_concurrency: NonZeroUsize,
        duration: Duration,
    ) -> Result<Self, MailBenchError> {
        Self::new(max_concurrency, TerminationPolicy::Duration(duration))
    }

    pub fn count_bounded(
        max_concurrency: NonZeroUsize,
        count: NonZeroU64,
    ) -> Result<Self, MailBenchError> {
        Self::new(max_concurrency, TerminationPolicy::Count(count))
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency.get()
    }

    pub fn termination(&self) -> TerminationPolicy {
        self.termination
    }
}
