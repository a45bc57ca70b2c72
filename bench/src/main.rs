use clap::Parser;
use mail_bench::args::common::{recreate_bench_command, MailBenchArgs};
use mail_bench::error::MailBenchError;
use mail_bench::logging::Logging;
use mail_bench::runner::BenchmarkRunner;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), MailBenchError> {
    let args = MailBenchArgs::parse();
    let mut logging = Logging::new();
    logging.init(args.log_file.as_deref());
    args.validate();

    let bench_command = recreate_bench_command(std::env::args_os());
    let mut runner = BenchmarkRunner::new(args, bench_command);

    info!("Starting the benchmark...");
    if let Err(error) = runner.run().await {
        error!("Benchmark failed: {error}");
        return Err(error);
    }
    info!("Finished the benchmark.");
    Ok(())
}
