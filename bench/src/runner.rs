use crate::analytics::report_builder::{apply_termination, BenchmarkReportBuilder};
use crate::args::common::MailBenchArgs;
use crate::engine::{BenchmarkDriver, BenchmarkProgress, NoProgress, ProgressSink};
use crate::error::MailBenchError;
use crate::mail::SmtpPool;
use human_repr::HumanCount;
use mail_bench_report::hardware::BenchmarkHardware;
use mail_bench_report::params::BenchmarkParams;
use std::sync::Arc;
use tracing::info;

pub struct BenchmarkRunner {
    args: Option<MailBenchArgs>,
    bench_command: String,
}

impl BenchmarkRunner {
    pub fn new(args: MailBenchArgs, bench_command: String) -> Self {
        Self {
            args: Some(args),
            bench_command,
        }
    }

    pub async fn run(&mut self) -> Result<(), MailBenchError> {
        let args = self.args.take().ok_or_else(|| {
            MailBenchError::InvalidConfiguration("benchmark runner was already used".to_owned())
        })?;
        let run_config = args.run_config()?;
        let pool = Arc::new(SmtpPool::new(&args.pool_config())?);
        pool.preflight().await;

        let message_builder = args.message_builder();
        let unit = Arc::new(message_builder.build().await?);
        info!(
            "Prepared test email from {} to {}, size: {}, attachments: {}",
            args.from,
            args.to,
            unit.size_bytes().human_count_bytes(),
            message_builder.attachments_count()
        );

        if let Some(count) = args.email_count() {
            info!("Sending {count} test emails...");
        }

        let progress: Arc<dyn ProgressSink> = if args.quiet {
            Arc::new(NoProgress)
        } else {
            Arc::new(BenchmarkProgress::new(run_config.termination()))
        };

        let summary = BenchmarkDriver::new(run_config, pool, progress)
            .run(unit.clone())
            .await?;
        info!("Benchmarking finished");

        let mut params = BenchmarkParams {
            concurrent_connections: args.concurrent_connections.get(),
            smtp_server: args.smtp_server.clone(),
            port: args.port,
            tls: args.tls.to_string(),
            attachments: message_builder.attachments_count() as u32,
            message_size_bytes: unit.size_bytes(),
            remark: args.remark(),
            bench_command: self.bench_command.clone(),
            ..Default::default()
        };
        apply_termination(&mut params, run_config.termination());

        let hardware = BenchmarkHardware::get_system_info_with_identifier(args.identifier());
        let report = BenchmarkReportBuilder::build(hardware, params, &summary);
        report.print_summary();

        if let Some(output_dir) = args.output_dir() {
            let report_path = report.dump_to_json(&output_dir).map_err(|source| {
                MailBenchError::CannotWriteReport {
                    path: output_dir.clone(),
                    source,
                }
            })?;
            info!("Benchmark report saved to {}", report_path.display());
        }

        Ok(())
    }
}
