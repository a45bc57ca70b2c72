use super::termination::TerminationKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkParams {
    pub termination: TerminationKind,
    /// Wall-clock limit in seconds, set for duration-bounded runs.
    pub duration_secs: Option<f64>,
    /// Number of send attempts, set for count-bounded runs.
    pub email_count: Option<u64>,
    pub concurrent_connections: u32,
    pub smtp_server: String,
    pub port: u16,
    pub tls: String,
    pub attachments: u32,
    pub message_size_bytes: u64,
    pub remark: Option<String>,
    pub bench_command: String,
}

impl BenchmarkParams {
    pub fn format_termination(&self) -> String {
        match (self.termination, self.duration_secs, self.email_count) {
            (TerminationKind::Duration, Some(secs), _) => format!("for {secs:.2} s"),
            (TerminationKind::Count, _, Some(count)) => format!("{count} emails"),
            (kind, _, _) => kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_termination_for_each_kind() {
        let duration = BenchmarkParams {
            termination: TerminationKind::Duration,
            duration_secs: Some(30.0),
            ..Default::default()
        };
        assert_eq!(duration.format_termination(), "for 30.00 s");

        let count = BenchmarkParams {
            termination: TerminationKind::Count,
            email_count: Some(500),
            ..Default::default()
        };
        assert_eq!(count.format_termination(), "500 emails");
    }
}
