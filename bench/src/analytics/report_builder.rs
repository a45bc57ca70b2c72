use crate::engine::{LatencyDistribution, RunSummary, TerminationPolicy};
use chrono::{DateTime, Utc};
use mail_bench_report::hardware::BenchmarkHardware;
use mail_bench_report::latency::BenchmarkLatency;
use mail_bench_report::params::BenchmarkParams;
use mail_bench_report::report::BenchmarkReport;
use mail_bench_report::summary::BenchmarkSummary;
use mail_bench_report::termination::TerminationKind;
use std::time::Duration;
use uuid::Uuid;

pub struct BenchmarkReportBuilder;

impl BenchmarkReportBuilder {
    pub fn build(
        hardware: BenchmarkHardware,
        params: BenchmarkParams,
        summary: &RunSummary,
    ) -> BenchmarkReport {
        let timestamp: DateTime<Utc> = Utc::now();

        BenchmarkReport {
            uuid: Uuid::new_v4(),
            timestamp: timestamp.to_rfc3339(),
            hardware,
            params,
            summary: to_report_summary(summary),
        }
    }
}

/// Fills the termination related fields of the report parameters.
pub fn apply_termination(params: &mut BenchmarkParams, termination: TerminationPolicy) {
    match termination {
        TerminationPolicy::Duration(duration) => {
            params.termination = TerminationKind::Duration;
            params.duration_secs = Some(duration.as_secs_f64());
            params.email_count = None;
        }
        TerminationPolicy::Count(count) => {
            params.termination = TerminationKind::Count;
            params.duration_secs = None;
            params.email_count = Some(count.get());
        }
    }
}

fn to_report_summary(summary: &RunSummary) -> BenchmarkSummary {
    BenchmarkSummary {
        total_sent: summary.success_count,
        total_failed: summary.failure_count,
        total_time_secs: summary.total_duration.as_secs_f64(),
        throughput_emails_per_second: summary.throughput,
        avg_latency_ms: summary.average_latency.map(as_millis),
        latency: summary.latency.as_ref().map(to_report_latency),
    }
}

fn to_report_latency(latency: &LatencyDistribution) -> BenchmarkLatency {
    BenchmarkLatency {
        min_latency_ms: as_millis(latency.min),
        max_latency_ms: as_millis(latency.max),
        p50_latency_ms: as_millis(latency.p50),
        p90_latency_ms: as_millis(latency.p90),
        p95_latency_ms: as_millis(latency.p95),
        p99_latency_ms: as_millis(latency.p99),
        p999_latency_ms: as_millis(latency.p999),
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}
