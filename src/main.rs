//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `stream_backup` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use stream_backup::initialization::init_logger_with;
use stream_backup::{run_backup, run_restore, Config, LogFormat, LogLevel};

#[derive(Debug, Parser)]
#[command(
    name = "stream_backup",
    version,
    about = "Backs up and restores a stream URL library"
)]
enum Cli {
    /// Write every stored stream record to the backup document
    Backup(CommonArgs),
    /// Merge the backup document back into the store
    Restore(CommonArgs),
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// SQLite database holding the stream library
    #[arg(long, default_value = "./streams.db")]
    db_path: PathBuf,

    /// Backup document path
    #[arg(long, default_value = "./backup.xml")]
    backup_file: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl From<CommonArgs> for Config {
    fn from(args: CommonArgs) -> Self {
        Config {
            db_path: args.db_path,
            backup_file: args.backup_file,
            log_level: args.log_level,
            log_format: args.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli {
        Cli::Backup(args) => {
            let config = Config::from(args);
            init_logger_with(config.log_level.clone().into(), config.log_format.clone())
                .context("Failed to initialize logger")?;

            match run_backup(config).await {
                Ok(report) => {
                    println!(
                        "✅ Backed up {} record{} to {}",
                        report.records,
                        if report.records == 1 { "" } else { "s" },
                        report.backup_path.display()
                    );
                    Ok(())
                }
                Err(e) => {
                    eprintln!("stream_backup error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Cli::Restore(args) => {
            let config = Config::from(args);
            init_logger_with(config.log_level.clone().into(), config.log_format.clone())
                .context("Failed to initialize logger")?;

            match run_restore(config).await {
                Ok(report) => {
                    println!(
                        "✅ Restored {} of {} record{} from {} ({} already present, {} without a usable URL, {} failed)",
                        report.merge.inserted,
                        report.parsed,
                        if report.parsed == 1 { "" } else { "s" },
                        report.backup_path.display(),
                        report.merge.skipped_existing,
                        report.merge.skipped_invalid,
                        report.merge.failed
                    );
                    if let Some(fault) = report.document_fault {
                        eprintln!(
                            "⚠️ Backup document was only partially readable: {}",
                            fault
                        );
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("stream_backup error: {:#}", e);
                    process::exit(1);
                }
            }
        }
    }
}
