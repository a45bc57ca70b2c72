pub mod analytics;
pub mod args;
pub mod engine;
pub mod error;
pub mod logging;
pub mod mail;
pub mod runner;
