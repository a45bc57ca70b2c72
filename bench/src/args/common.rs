use super::defaults::*;
use super::output::BenchmarkOutputArgs;
use crate::engine::{RunConfig, TerminationPolicy};
use crate::error::MailBenchError;
use crate::mail::{MessageBuilder, SmtpPoolConfig, TlsMode};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsStr;
use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct MailBenchArgs {
    /// SMTP server address
    #[arg(long)]
    pub smtp_server: String,

    /// SMTP server port
    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub port: u16,

    /// SMTP username, used only together with --password
    #[arg(long)]
    pub username: Option<String>,

    /// SMTP password, used only together with --username
    #[arg(long)]
    pub password: Option<String>,

    /// Sender email address
    #[arg(long)]
    pub from: String,

    /// Recipient email address
    #[arg(long)]
    pub to: String,

    /// Number of concurrent connections (and concurrent sends)
    #[arg(long, default_value_t = DEFAULT_CONCURRENT_CONNECTIONS)]
    pub concurrent_connections: NonZeroU32,

    /// Duration of the benchmark, e.g. "60s", "5m"
    #[arg(long, default_value = DEFAULT_DURATION, value_parser = humantime::parse_duration)]
    pub duration: Duration,

    /// Number of emails to send, overrides --duration when greater than zero
    #[arg(long)]
    pub email_count: Option<u64>,

    /// Connection and pool idle timeout, e.g. "10s"
    #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Path to a file to attach to the email, may be repeated
    #[arg(long = "attachment")]
    pub attachments: Vec<PathBuf>,

    /// Transport security
    #[arg(long, value_enum, default_value_t = TlsMode::None)]
    pub tls: TlsMode,

    /// Do not render the progress bar
    #[arg(long, short = 'q', default_value_t = false)]
    pub quiet: bool,

    /// Also write logs at trace level to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub output: BenchmarkOutputArgs,
}

impl MailBenchArgs {
    pub fn validate(&self) {
        if self.email_count().is_none() && self.duration.is_zero() {
            MailBenchArgs::command()
                .error(
                    ErrorKind::InvalidValue,
                    "--duration must be greater than zero when --email-count is not set",
                )
                .exit();
        }

        if self.username.is_some() != self.password.is_some() {
            warn!(
                "Both --username and --password are required for authentication, connecting without credentials."
            );
        }
    }

    /// Count-bounded runs are requested with a positive `--email-count`.
    pub fn email_count(&self) -> Option<NonZeroU64> {
        self.email_count.and_then(NonZeroU64::new)
    }

    pub fn termination(&self) -> TerminationPolicy {
        match self.email_count() {
            Some(count) => TerminationPolicy::Count(count),
            None => TerminationPolicy::Duration(self.duration),
        }
    }

    pub fn run_config(&self) -> Result<RunConfig, MailBenchError> {
        let max_concurrency = NonZeroUsize::try_from(self.concurrent_connections).map_err(|_| {
            MailBenchError::InvalidConfiguration(format!(
                "{} concurrent connections cannot be represented on this platform",
                self.concurrent_connections
            ))
        })?;
        RunConfig::new(max_concurrency, self.termination())
    }

    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username.clone(), password.clone()))
            }
            _ => None,
        }
    }

    pub fn pool_config(&self) -> SmtpPoolConfig {
        SmtpPoolConfig {
            host: self.smtp_server.clone(),
            port: self.port,
            max_connections: self.concurrent_connections.get(),
            timeout: self.timeout,
            credentials: self.credentials(),
            tls: self.tls,
        }
    }

    pub fn message_builder(&self) -> MessageBuilder {
        MessageBuilder::new(self.from.as_str(), self.to.as_str())
            .with_attachments(self.attachments.iter().cloned())
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output.output_dir.clone()
    }

    pub fn identifier(&self) -> Option<String> {
        self.output.identifier()
    }

    pub fn remark(&self) -> Option<String> {
        self.output.remark.clone()
    }
}

/// Rebuilds the invoking command line with the password masked, for the report.
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn recreate_bench_command<I>(raw_args: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    let mut parts = Vec::new();
    let mut mask_next = false;
    for arg in raw_args {
        let arg = arg.as_ref().to_string_lossy().into_owned();
        if mask_next {
            parts.push("******".to_owned());
            mask_next = false;
        } else if arg == "--password" {
            parts.push(arg);
            mask_next = true;
        } else if arg.starts_with("--password=") {
            parts.push("--password=******".to_owned());
        } else {
            parts.push(arg);
        }
    }
    parts.join(" ")
}
