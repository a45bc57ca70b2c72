use crate::error::SendError;
use async_trait::async_trait;

/// The send operation the driver invokes once per work unit.
///
/// Implementations must tolerate at least `max_concurrency` concurrent calls and
/// apply their own timeouts; the driver never cancels an in-flight send.
#[async_trait]
pub trait MailSender: Send + Sync + 'static {
    /// Pre-built payload handed to every send. Never mutated by the driver.
    type Unit: Send + Sync + 'static;

    async fn send(&self, unit: &Self::Unit) -> Result<(), SendError>;
}
