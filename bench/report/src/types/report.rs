use crate::types::hardware::BenchmarkHardware;
use crate::types::params::BenchmarkParams;
use crate::types::summary::BenchmarkSummary;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const REPORT_FILE_NAME: &str = "report.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkReport {
    /// Benchmark unique identifier
    pub uuid: Uuid,

    /// Timestamp when the benchmark was finished
    pub timestamp: String,

    /// Benchmark hardware
    pub hardware: BenchmarkHardware,

    /// Benchmark parameters
    pub params: BenchmarkParams,

    /// Aggregated results of the run
    pub summary: BenchmarkSummary,
}

impl BenchmarkReport {
    /// Writes the report as `report.json` into `output_dir`, creating the directory if needed.
    pub fn dump_to_json(&self, output_dir: &Path) -> io::Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;

        let report_path = output_dir.join(REPORT_FILE_NAME);
        let report_json = serde_json::to_string_pretty(self)?;
        std::fs::write(&report_path, report_json)?;
        Ok(report_path)
    }
}
