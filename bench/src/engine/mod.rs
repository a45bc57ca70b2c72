pub mod aggregator;
pub mod config;
pub mod driver;
pub mod limiter;
pub mod progress;
pub mod sender;
pub mod summary;

pub use aggregator::{AggregateStats, OutcomeAggregator, SendResult};
pub use config::{RunConfig, TerminationPolicy};
pub use driver::{BenchmarkDriver, DriverState};
pub use limiter::{ConcurrencyLimiter, Slot};
pub use progress::{BenchmarkProgress, NoProgress, ProgressSink};
pub use sender::MailSender;
pub use summary::{LatencyDistribution, RunSummary};
