//! ACH Encoder CLI
//!
//! Reads pending transactions from a CSV file and writes a single-batch
//! ACH file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv > batch.ach
//! cargo run -- transactions.csv output/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity
//! - `ACH_COMPANY_NAME`, `ACH_COMPANY_ID`, `ACH_ROUTING_NUMBER`: originator identity
//! - `ACH_IMMEDIATE_DESTINATION`, `ACH_DESTINATION_NAME`, `ACH_ORIGIN_NAME`,
//!   `ACH_ENTRY_DESCRIPTION`: optional header overrides

use ach_encoder::{AchEngine, AchError, FileContext, OriginatorConfig, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(AchError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let engine = AchEngine::new(OriginatorConfig::from_env()?)?;
    let ach_file = engine.generate(reader, &FileContext::now())?;

    match args.get(2) {
        Some(output) => {
            let path = output_path(Path::new(output), ach_file.file_name());
            ach_file.persist_to(&path)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            ach_file.write_to(handle)?;
        }
    }

    let summary = ach_file.summary();
    info!(
        "{}: {} transactions, total {} (debit {}, credit {})",
        summary.file_name,
        summary.transaction_count,
        summary.total_amount,
        summary.total_debit,
        summary.total_credit
    );

    Ok(())
}

/// A directory gets the generated file name appended.
fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}
