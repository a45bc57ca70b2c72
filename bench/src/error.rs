use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailBenchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid email address")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("Invalid content type")]
    InvalidContentType(#[from] lettre::message::header::ContentTypeErr),
    #[error("Cannot build email message")]
    CannotBuildMessage(#[from] lettre::error::Error),
    #[error("Cannot read attachment file: {}", .path.display())]
    CannotReadAttachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("SMTP transport error")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("Concurrency limiter was closed while dispatching")]
    LimiterClosed(#[from] tokio::sync::AcquireError),
    #[error("Cannot write benchmark report to: {}", .path.display())]
    CannotWriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single send attempt. The underlying cause is opaque to the engine.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct SendError {
    #[source]
    cause: Box<dyn std::error::Error + Send + Sync>,
}

impl SendError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            cause: source.into(),
        }
    }
}

impl From<lettre::transport::smtp::Error> for SendError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        Self::new(error)
    }
}
