use super::latency::BenchmarkLatency;
use crate::utils::{round_float, round_optional_float};
use serde::{Deserialize, Serialize};

/// Final outcome of one run. Throughput and latency fields are absent when
/// nothing was sent successfully.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchmarkSummary {
    pub total_sent: u64,
    pub total_failed: u64,
    #[serde(serialize_with = "round_float")]
    pub total_time_secs: f64,
    #[serde(serialize_with = "round_optional_float")]
    pub throughput_emails_per_second: Option<f64>,
    #[serde(serialize_with = "round_optional_float")]
    pub avg_latency_ms: Option<f64>,
    pub latency: Option<BenchmarkLatency>,
}

impl BenchmarkSummary {
    pub fn total_attempts(&self) -> u64 {
        self.total_sent + self.total_failed
    }

    pub fn has_successes(&self) -> bool {
        self.total_sent > 0
    }
}
