use std::num::NonZeroU32;

pub const DEFAULT_SMTP_PORT: u16 = 25;
pub const DEFAULT_CONCURRENT_CONNECTIONS: NonZeroU32 = nonzero_lit::u32!(10);
pub const DEFAULT_DURATION: &str = "60s";
pub const DEFAULT_TIMEOUT: &str = "10s";
