use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Rule deciding when the benchmark stops dispatching new sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default)]
pub enum TerminationKind {
    #[default]
    #[display("Duration")]
    #[serde(rename = "duration")]
    Duration,
    #[display("Count")]
    #[serde(rename = "count")]
    Count,
}
