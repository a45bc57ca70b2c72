use crate::report::BenchmarkReport;
use crate::summary::BenchmarkSummary;
use colored::{ColoredString, Colorize};
use human_repr::HumanCount;
use tracing::info;

impl BenchmarkReport {
    pub fn print_summary(&self) {
        let params = &self.params;
        let params_print = format!(
            "Benchmark: {} {}, server: {}:{} ({}), {} concurrent connections, {} attachments, message size: {}",
            params.termination,
            params.format_termination(),
            params.smtp_server,
            params.port,
            params.tls,
            params.concurrent_connections,
            params.attachments,
            params.message_size_bytes.human_count_bytes(),
        )
        .blue();

        info!("{}", params_print);
        info!("{}", self.summary.formatted_string());
    }
}

impl BenchmarkSummary {
    pub fn formatted_string(&self) -> ColoredString {
        if !self.has_successes() {
            return format!(
                "No emails were sent successfully ({} failed attempts in {:.2} s)",
                self.total_failed, self.total_time_secs
            )
            .red();
        }

        let throughput = self.throughput_emails_per_second.unwrap_or_default();
        let avg = self.avg_latency_ms.unwrap_or_default();
        let mut line = format!(
            "Total emails sent: {}, failed: {}, throughput: {:.2} emails/second, average latency: {:.2} ms, total duration: {:.2} s",
            self.total_sent, self.total_failed, throughput, avg, self.total_time_secs,
        );
        if let Some(latency) = &self.latency {
            line.push_str(&format!(
                ", min: {:.2} ms, p50: {:.2} ms, p90: {:.2} ms, p95: {:.2} ms, p99: {:.2} ms, p999: {:.2} ms, max: {:.2} ms",
                latency.min_latency_ms,
                latency.p50_latency_ms,
                latency.p90_latency_ms,
                latency.p95_latency_ms,
                latency.p99_latency_ms,
                latency.p999_latency_ms,
                latency.max_latency_ms,
            ));
        }

        if self.total_failed > 0 {
            line.yellow()
        } else {
            line.green()
        }
    }
}
