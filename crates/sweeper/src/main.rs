mod cli;
mod config;

use clap::Parser;
use cli::{Cli, LogFormat};
use sweeper_retention::{Cleaner, SweepSummary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let file_config = config::load_file_config(cli.config.as_deref())?;
    let settings = config::resolve(&cli, &file_config)?;

    let mut summary = SweepSummary::default();

    for target in &settings.targets {
        let cleaner = Cleaner::new(target.policy, target.dry_run)
            .with_default_patterns(settings.default_patterns.clone());

        match cleaner.cleanup(&target.directory) {
            Ok(report) => {
                for failure in &report.failures {
                    tracing::error!(
                        "Could not remove {}: {}",
                        failure.entry.path.display(),
                        failure.error
                    );
                }
                summary.record(&report);
            }
            Err(e) => {
                tracing::error!("Cleanup of {} failed: {}", target.directory.display(), e);
                summary.record_error();
            }
        }
    }

    tracing::info!(
        "Sweep complete: {} director(ies), {} entries removed, {} removal failure(s), {} misconfigured",
        summary.directories,
        summary.removed,
        summary.removal_failures,
        summary.failed_directories
    );

    if !summary.is_success() {
        anyhow::bail!(
            "sweep finished with {} misconfigured director(ies) and {} removal failure(s)",
            summary.failed_directories,
            summary.removal_failures
        );
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    );

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
