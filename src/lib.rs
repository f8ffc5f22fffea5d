//! # ACH Encoder
//!
//! Converts a batch of payment transactions into a NACHA-style ACH file:
//! fixed-width 94-character records, padded to a multiple of 10 lines.
//!
//! ## Design Principles
//!
//! - **Exact cents**: amounts are parsed with `rust_decimal`, never floats
//! - **No silent truncation**: oversize text or numbers are errors
//! - **Single pass**: entry records and control totals come from one traversal
//! - **All or nothing**: the file is assembled in memory before any byte is written
//!
//! ## Example
//!
//! ```no_run
//! use ach_encoder::{AchEngine, FileContext, OriginatorConfig};
//! use std::io::Cursor;
//!
//! let csv = "routing_number,account_number,amount,transaction_type\n\
//!            123456789,9876543210,100.50,CREDIT\n";
//! let engine = AchEngine::new(OriginatorConfig::default()).unwrap();
//! let file = engine.generate(Cursor::new(csv), &FileContext::now()).unwrap();
//! file.write_to(std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod assembler;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod record;
pub mod transaction;

pub use amount::Amount;
pub use assembler::{AchFile, BlockLayout, FileAssembler, FileContext, FileSummary};
pub use batch::{BatchAccumulator, BatchTotals};
pub use config::OriginatorConfig;
pub use engine::AchEngine;
pub use error::{AchError, Result};
pub use record::{Record, RecordType, RECORD_LENGTH};
pub use transaction::{Transaction, TransactionRecord, TransactionType};
