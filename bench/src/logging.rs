use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

const DEFAULT_LOG_FILTER: &str = "info";

/// Keeps the non-blocking writers flushing until the process exits.
pub struct Logging {
    stdout_guard: Option<WorkerGuard>,
    file_guard: Option<WorkerGuard>,
}

impl Logging {
    pub fn new() -> Self {
        Logging {
            stdout_guard: None,
            file_guard: None,
        }
    }

    /// Installs the global subscriber: stdout filtered by `RUST_LOG` (default `info`),
    /// plus a trace-level file layer when `log_file` is given.
    pub fn init(&mut self, log_file: Option<&Path>) -> &mut Self {
        let mut layers = vec![];

        let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let stdout_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(stdout_writer)
            .with_filter(env_filter)
            .boxed();
        self.stdout_guard = Some(stdout_guard);
        layers.push(stdout_layer);

        if let Some(file_path) = log_file {
            let directory = file_path.parent().unwrap_or_else(|| Path::new(""));
            let file_name = file_path.file_name().unwrap_or(file_path.as_os_str());
            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(LevelFilter::TRACE)
                .boxed();
            self.file_guard = Some(file_guard);
            layers.push(file_layer);
        }

        if let Err(error) = tracing_subscriber::registry().with(layers).try_init() {
            eprintln!("Logging was already initialized: {error}");
        }

        self
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self::new()
    }
}
