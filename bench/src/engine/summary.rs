use super::aggregator::AggregateStats;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyDistribution {
    pub min: Duration,
    pub max: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub p999: Duration,
}

impl LatencyDistribution {
    /// Returns `None` for an empty sample.
    pub fn from_latencies(latencies: &[Duration]) -> Option<Self> {
        if latencies.is_empty() {
            return None;
        }

        let mut sorted_nanos = latencies
            .iter()
            .map(|latency| latency.as_nanos() as f64)
            .collect::<Vec<_>>();
        sorted_nanos.sort_by(f64::total_cmp);

        let percentile =
            |p: f64| Duration::from_nanos(calculate_percentile(&sorted_nanos, p).round() as u64);
        Some(Self {
            min: Duration::from_nanos(sorted_nanos[0] as u64),
            max: Duration::from_nanos(sorted_nanos[sorted_nanos.len() - 1] as u64),
            p50: percentile(50.0),
            p90: percentile(90.0),
            p95: percentile(95.0),
            p99: percentile(99.0),
            p999: percentile(99.9),
        })
    }
}

/// Final result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub success_count: u64,
    pub failure_count: u64,
    pub total_duration: Duration,
    /// Successful sends per second, absent when nothing succeeded.
    pub throughput: Option<f64>,
    /// Mean latency over successful sends, absent when nothing succeeded.
    pub average_latency: Option<Duration>,
    pub latency: Option<LatencyDistribution>,
}

impl RunSummary {
    pub fn from_stats(stats: &AggregateStats, total_duration: Duration) -> Self {
        let elapsed_secs = total_duration.as_secs_f64();
        let throughput = if stats.success_count > 0 && elapsed_secs > 0.0 {
            Some(stats.success_count as f64 / elapsed_secs)
        } else {
            None
        };

        Self {
            success_count: stats.success_count,
            failure_count: stats.failure_count,
            total_duration,
            throughput,
            average_latency: stats.average_latency(),
            latency: LatencyDistribution::from_latencies(&stats.latencies),
        }
    }

    pub fn total_attempts(&self) -> u64 {
        self.success_count + self.failure_count
    }

    pub fn has_successes(&self) -> bool {
        self.success_count > 0
    }
}

fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }

    let rank = percentile / 100.0 * (sorted_data.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if upper >= sorted_data.len() {
        return sorted_data[sorted_data.len() - 1];
    }

    let weight = rank - lower as f64;
    sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
}
