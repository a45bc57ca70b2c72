use async_trait::async_trait;
use mail_bench::engine::{
    BenchmarkDriver, MailSender, NoProgress, ProgressSink, RunConfig, RunSummary,
};
use mail_bench::error::SendError;
use std::num::{NonZeroU64, NonZeroUsize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct StubSender {
    delay: Duration,
    fail_every: Option<u64>,
    fail_all: bool,
    panic_on_call: Option<u64>,
    calls: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubSender {
    fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailSender for StubSender {
    type Unit = String;

    async fn send(&self, unit: &String) -> Result<(), SendError> {
        assert_eq!(unit, "payload");
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panic_on_call == Some(call) {
            panic!("stub sender exploded on call {call}");
        }
        if self.fail_all || self.fail_every.is_some_and(|every| call % every == 0) {
            return Err(SendError::new(format!("rejected call {call}")));
        }
        Ok(())
    }
}

#[derive(Default)]
struct CountingProgress {
    increments: AtomicU64,
    finishes: AtomicU64,
}

impl ProgressSink for CountingProgress {
    fn increment(&self) {
        self.increments.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
    }
}

fn concurrency(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).unwrap()
}

fn count(value: u64) -> NonZeroU64 {
    NonZeroU64::new(value).unwrap()
}

async fn run(config: RunConfig, sender: Arc<StubSender>) -> RunSummary {
    BenchmarkDriver::new(config, sender, Arc::new(NoProgress))
        .run(Arc::new("payload".to_owned()))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_never_exceed_max_concurrency() {
    for max in [1, 4, 16] {
        let sender = Arc::new(StubSender::with_delay(Duration::from_millis(1)));
        let config = RunConfig::count_bounded(concurrency(max), count(200)).unwrap();

        let summary = run(config, sender.clone()).await;

        assert_eq!(summary.success_count, 200);
        assert!(sender.max_in_flight() >= 1);
        assert!(
            sender.max_in_flight() <= max,
            "observed {} concurrent sends with a cap of {max}",
            sender.max_in_flight()
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_send_exactly_count_emails() {
    let sender = Arc::new(StubSender::default());
    let config = RunConfig::count_bounded(concurrency(8), count(1_000)).unwrap();

    let summary = run(config, sender.clone()).await;

    assert_eq!(sender.calls(), 1_000);
    assert_eq!(summary.success_count, 1_000);
    assert_eq!(summary.failure_count, 0);
    assert!(summary.throughput.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_count_failures_as_attempts_without_aborting_the_run() {
    let sender = Arc::new(StubSender {
        fail_every: Some(3),
        ..Default::default()
    });
    let config = RunConfig::count_bounded(concurrency(5), count(300)).unwrap();

    let summary = run(config, sender.clone()).await;

    assert_eq!(sender.calls(), 300);
    assert_eq!(summary.failure_count, 100);
    assert_eq!(summary.success_count, 200);
    assert_eq!(summary.total_attempts(), sender.calls());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_report_zero_work_when_every_send_fails() {
    let sender = Arc::new(StubSender {
        fail_all: true,
        ..Default::default()
    });
    let config = RunConfig::count_bounded(concurrency(3), count(25)).unwrap();

    let summary = run(config, sender).await;

    assert_eq!(summary.success_count, 0);
    assert_eq!(summary.failure_count, 25);
    assert!(!summary.has_successes());
    assert_eq!(summary.throughput, None);
    assert_eq!(summary.average_latency, None);
    assert_eq!(summary.latency, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_run_at_least_the_configured_duration() {
    let limit = Duration::from_millis(200);
    let sender = Arc::new(StubSender::default());
    let config = RunConfig::duration_bounded(concurrency(8), limit).unwrap();

    let summary = run(config, sender.clone()).await;

    assert!(summary.total_duration >= limit);
    assert!(summary.total_duration < limit + Duration::from_secs(1));
    assert!(summary.success_count > 0);
    assert_eq!(summary.total_attempts(), sender.calls());
}

#[tokio::test(start_paused = true)]
async fn should_let_in_flight_sends_finish_past_the_deadline() {
    let limit = Duration::from_millis(100);
    let latency = Duration::from_millis(30);
    let sender = Arc::new(StubSender::with_delay(latency));
    let config = RunConfig::duration_bounded(concurrency(2), limit).unwrap();

    let summary = run(config, sender.clone()).await;

    assert!(summary.total_duration >= limit);
    assert!(summary.total_duration <= limit + latency * 2);
    assert_eq!(summary.success_count, sender.calls());
    assert!(summary.success_count >= (limit.as_millis() / latency.as_millis()) as u64 * 2);
}

#[tokio::test(start_paused = true)]
async fn should_match_batched_timing_for_five_by_twenty_sends() {
    let sender = Arc::new(StubSender::with_delay(Duration::from_millis(10)));
    let config = RunConfig::count_bounded(concurrency(5), count(20)).unwrap();

    let summary = run(config, sender.clone()).await;

    assert_eq!(summary.success_count, 20);
    assert_eq!(sender.max_in_flight(), 5);
    let average = summary.average_latency.unwrap();
    assert!(average >= Duration::from_millis(10) && average < Duration::from_millis(11));
    assert!(summary.total_duration >= Duration::from_millis(40));
    assert!(summary.total_duration < Duration::from_millis(50));
    let throughput = summary.throughput.unwrap();
    assert!(throughput > 400.0 && throughput <= 500.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_signal_progress_once_per_success_and_finish_once() {
    let sender = Arc::new(StubSender {
        fail_every: Some(4),
        ..Default::default()
    });
    let progress = Arc::new(CountingProgress::default());
    let config = RunConfig::count_bounded(concurrency(4), count(40)).unwrap();

    let summary = BenchmarkDriver::new(config, sender, progress.clone())
        .run(Arc::new("payload".to_owned()))
        .await
        .unwrap();

    assert_eq!(summary.success_count, 30);
    assert_eq!(progress.increments.load(Ordering::SeqCst), 30);
    assert_eq!(progress.finishes.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_drain_remaining_work_when_a_worker_panics() {
    let sender = Arc::new(StubSender {
        panic_on_call: Some(5),
        ..Default::default()
    });
    let config = RunConfig::count_bounded(concurrency(2), count(10)).unwrap();

    let summary = run(config, sender.clone()).await;

    assert_eq!(sender.calls(), 10);
    assert_eq!(summary.success_count, 9);
    assert_eq!(summary.failure_count, 0);
}
