use super::message::MailUnit;
use crate::engine::MailSender;
use crate::error::{MailBenchError, SendError};
use async_trait::async_trait;
use clap::ValueEnum;
use derive_more::Display;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
pub enum TlsMode {
    /// Plain connection, no encryption
    #[default]
    #[display("none")]
    None,
    /// Upgrade the plain connection with STARTTLS
    #[display("starttls")]
    #[value(name = "starttls")]
    StartTls,
    /// Implicit TLS from the first byte
    #[display("tls")]
    Tls,
}

#[derive(Debug, Clone)]
pub struct SmtpPoolConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub timeout: Duration,
    pub credentials: Option<(String, String)>,
    pub tls: TlsMode,
}

/// Pooled SMTP transport, shared by every send worker.
pub struct SmtpPool {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpPool {
    pub fn new(config: &SmtpPoolConfig) -> Result<Self, MailBenchError> {
        let builder = match config.tls {
            TlsMode::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            }
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            }
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
        };

        let pool_config = PoolConfig::new()
            .max_size(config.max_connections)
            .idle_timeout(config.timeout);
        let mut builder = builder
            .port(config.port)
            .timeout(Some(config.timeout))
            .pool_config(pool_config);

        if let Some((username, password)) = &config.credentials {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(
            "Created SMTP pool for {}:{} ({}), max connections: {}",
            config.host, config.port, config.tls, config.max_connections
        );
        Ok(Self {
            transport: builder.build(),
        })
    }

    /// Opens a connection and issues NOOP, returning whether the server answered positively.
    pub async fn test_connection(&self) -> Result<bool, MailBenchError> {
        Ok(self.transport.test_connection().await?)
    }

    /// Checks the server once before the run. An unreachable server is only reported,
    /// the run still goes ahead and records every failed send.
    pub async fn preflight(&self) -> bool {
        match self.test_connection().await {
            Ok(true) => {
                info!("SMTP server is reachable");
                true
            }
            Ok(false) => {
                warn!("SMTP server rejected the connection check");
                false
            }
            Err(error) => {
                warn!("SMTP connection check failed: {error}");
                false
            }
        }
    }
}

#[async_trait]
impl MailSender for SmtpPool {
    type Unit = MailUnit;

    async fn send(&self, unit: &MailUnit) -> Result<(), SendError> {
        self.transport.send_raw(unit.envelope(), unit.raw()).await?;
        Ok(())
    }
}
