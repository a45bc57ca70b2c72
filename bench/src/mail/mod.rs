pub mod message;
pub mod pool;

pub use message::{MailUnit, MessageBuilder};
pub use pool::{SmtpPool, SmtpPoolConfig, TlsMode};
