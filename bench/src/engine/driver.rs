use super::aggregator::{OutcomeAggregator, SendResult};
use super::config::{RunConfig, TerminationPolicy};
use super::limiter::{ConcurrencyLimiter, Slot};
use super::progress::ProgressSink;
use super::sender::MailSender;
use super::summary::RunSummary;
use crate::error::MailBenchError;
use derive_more::Display;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DriverState {
    #[display("idle")]
    Idle,
    #[display("dispatching")]
    Dispatching,
    #[display("draining")]
    Draining,
    #[display("reported")]
    Reported,
}

/// Runs one benchmark: dispatches sends under the concurrency cap until the
/// termination policy says stop, waits for every dispatched send, then summarizes.
///
/// A driver is single use, [`BenchmarkDriver::run`] consumes it.
pub struct BenchmarkDriver<S: MailSender> {
    config: RunConfig,
    sender: Arc<S>,
    progress: Arc<dyn ProgressSink>,
    state: DriverState,
}

impl<S: MailSender> BenchmarkDriver<S> {
    pub fn new(config: RunConfig, sender: Arc<S>, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            config,
            sender,
            progress,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub async fn run(mut self, unit: Arc<S::Unit>) -> Result<RunSummary, MailBenchError> {
        let limiter = ConcurrencyLimiter::new(self.config.max_concurrency());
        let aggregator = Arc::new(OutcomeAggregator::new());
        let mut workers = JoinSet::new();

        info!(
            "Dispatching emails {} with up to {} concurrent sends...",
            self.config.termination(),
            limiter.max_concurrency()
        );
        self.transition(DriverState::Dispatching);
        let start = Instant::now();
        let mut dispatched: u64 = 0;

        match self.config.termination() {
            TerminationPolicy::Duration(limit) => {
                let deadline = start.checked_add(limit).ok_or_else(|| {
                    MailBenchError::InvalidConfiguration(format!(
                        "benchmark duration {} is too large",
                        humantime::format_duration(limit)
                    ))
                })?;
                while Instant::now() < deadline {
                    let slot = limiter.acquire().await?;
                    self.dispatch(&mut workers, slot, &unit, &aggregator);
                    dispatched += 1;
                    reap_finished(&mut workers);
                }
            }
            TerminationPolicy::Count(count) => {
                for _ in 0..count.get() {
                    let slot = limiter.acquire().await?;
                    self.dispatch(&mut workers, slot, &unit, &aggregator);
                    dispatched += 1;
                    reap_finished(&mut workers);
                }
            }
        }

        self.transition(DriverState::Draining);
        debug!(
            "Dispatched {dispatched} sends, waiting for {} in flight ({} workers pending)...",
            limiter.in_flight(),
            workers.len()
        );
        while let Some(joined) = workers.join_next().await {
            log_worker_failure(joined);
        }

        self.progress.finish();
        let total_duration = start.elapsed();
        let stats = Arc::try_unwrap(aggregator)
            .map(OutcomeAggregator::into_stats)
            .unwrap_or_else(|aggregator| aggregator.snapshot());
        self.transition(DriverState::Reported);

        Ok(RunSummary::from_stats(&stats, total_duration))
    }

    fn dispatch(
        &self,
        workers: &mut JoinSet<()>,
        slot: Slot,
        unit: &Arc<S::Unit>,
        aggregator: &Arc<OutcomeAggregator>,
    ) {
        let sender = self.sender.clone();
        let unit = unit.clone();
        let aggregator = aggregator.clone();
        let progress = self.progress.clone();
        workers.spawn(async move {
            let before_send = Instant::now();
            let result = sender.send(&unit).await;
            let latency = before_send.elapsed();
            slot.release();

            match result {
                Ok(()) => {
                    aggregator.record(SendResult::Success { latency });
                    progress.increment();
                }
                Err(error) => aggregator.record(SendResult::Failure { error }),
            }
        });
    }

    fn transition(&mut self, next: DriverState) {
        debug!("Benchmark driver: {} -> {}", self.state, next);
        self.state = next;
    }
}

fn reap_finished(workers: &mut JoinSet<()>) {
    while let Some(joined) = workers.try_join_next() {
        log_worker_failure(joined);
    }
}

fn log_worker_failure(joined: Result<(), JoinError>) {
    if let Err(error) = joined {
        error!("Send worker did not complete: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::NoProgress;
    use crate::error::SendError;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl MailSender for Noop {
        type Unit = ();

        async fn send(&self, _unit: &()) -> Result<(), SendError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_start_idle_and_run_once() {
        let config =
            RunConfig::count_bounded(nonzero_lit::usize!(2), nonzero_lit::u64!(3)).unwrap();
        let driver = BenchmarkDriver::new(config, Arc::new(Noop), Arc::new(NoProgress));
        assert_eq!(driver.state(), DriverState::Idle);

        let summary = driver.run(Arc::new(())).await.unwrap();
        assert_eq!(summary.success_count, 3);
        assert_eq!(summary.failure_count, 0);
    }
}
