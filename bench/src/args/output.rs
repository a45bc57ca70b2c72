use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
pub struct BenchmarkOutputArgs {
    /// Output directory path for storing the benchmark report
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Identifier for the benchmark run (defaults to hostname if not provided)
    #[arg(long)]
    pub identifier: Option<String>,

    /// Additional remark for the benchmark (e.g., no-tls)
    #[arg(long)]
    pub remark: Option<String>,
}

impl BenchmarkOutputArgs {
    pub fn identifier(&self) -> Option<String> {
        self.identifier.clone().or_else(|| {
            hostname::get()
                .ok()
                .map(|name| name.to_string_lossy().into_owned())
        })
    }
}
