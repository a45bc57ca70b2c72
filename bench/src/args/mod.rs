pub mod common;
pub mod defaults;
pub mod output;
