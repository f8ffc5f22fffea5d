//! File assembly: record ordering, block padding and the output stream.

use crate::amount::Amount;
use crate::batch::{BatchAccumulator, BatchTotals};
use crate::config::OriginatorConfig;
use crate::error::{AchError, Result};
use crate::record::{self, Record};
use crate::transaction::Transaction;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Records per block.
pub const BLOCKING_FACTOR: u64 = 10;

/// File header, batch header, batch control and file control.
pub const FIXED_RECORD_COUNT: u64 = 4;

/// Terminator written after every record.
pub const LINE_TERMINATOR: &str = "\n";

/// Timestamps stamped into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileContext {
    /// File creation date and time; also the batch descriptive date.
    pub created: NaiveDateTime,

    /// Date the entries should settle.
    pub effective_date: NaiveDate,
}

impl FileContext {
    /// Context created at `created`, effective the same day.
    pub fn new(created: NaiveDateTime) -> Self {
        FileContext {
            created,
            effective_date: created.date(),
        }
    }

    /// Context for the current local time.
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    pub fn with_effective_date(mut self, effective_date: NaiveDate) -> Self {
        self.effective_date = effective_date;
        self
    }

    /// Name under which the generated file is stored.
    pub fn file_name(&self) -> String {
        format!("ach_batch_{}.txt", self.created.format("%Y%m%d_%H%M%S"))
    }
}

/// Record and block counts for a single-batch file.
///
/// Padding and the file control block count both come from this one
/// computation so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Records other than filler.
    pub non_filler: u64,

    /// Filler records needed to complete the last block.
    pub filler: u64,
}

impl BlockLayout {
    pub fn for_entries(entry_count: u64) -> Self {
        let non_filler = FIXED_RECORD_COUNT + entry_count;
        let filler = (BLOCKING_FACTOR - non_filler % BLOCKING_FACTOR) % BLOCKING_FACTOR;
        BlockLayout { non_filler, filler }
    }

    /// Physical records in the file, filler included.
    pub fn total_records(&self) -> u64 {
        self.non_filler + self.filler
    }

    pub fn block_count(&self) -> u64 {
        (self.total_records() + BLOCKING_FACTOR - 1) / BLOCKING_FACTOR
    }
}

/// Metadata about a generated file, for the caller's bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub transaction_count: u64,
    pub entry_hash: u64,
    pub total_debit: Amount,
    pub total_credit: Amount,
    pub total_amount: Amount,
    pub block_count: u64,
    pub filler_count: u64,
}

/// A fully assembled file held in memory.
#[derive(Debug, Clone)]
pub struct AchFile {
    records: Vec<Record>,
    summary: FileSummary,
}

impl AchFile {
    /// All records in file order, filler included.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn summary(&self) -> &FileSummary {
        &self.summary
    }

    pub fn file_name(&self) -> &str {
        &self.summary.file_name
    }

    /// Writes every record followed by [`LINE_TERMINATOR`].
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.records {
            writer.write_all(record.as_str().as_bytes())?;
            writer.write_all(LINE_TERMINATOR.as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the file to `path` in one step.
    ///
    /// The records go to a temporary file in the same directory, which is
    /// renamed onto `path` only after every byte has been flushed. On failure
    /// the temporary file is removed and `path` is left untouched.
    pub fn persist_to(&self, path: &Path) -> Result<()> {
        write_atomically(path, |file| self.write_to(BufWriter::new(file)))
    }

    /// The complete byte stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let line = record::RECORD_LENGTH + LINE_TERMINATOR.len();
        let mut bytes = Vec::with_capacity(self.records.len() * line);
        for record in &self.records {
            bytes.extend_from_slice(record.as_str().as_bytes());
            bytes.extend_from_slice(LINE_TERMINATOR.as_bytes());
        }
        bytes
    }
}

/// Builds single-batch files for one originator.
#[derive(Debug, Clone)]
pub struct FileAssembler {
    config: OriginatorConfig,
}

impl FileAssembler {
    /// Creates an assembler, validating the originator configuration once.
    pub fn new(config: OriginatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(FileAssembler { config })
    }

    pub fn config(&self) -> &OriginatorConfig {
        &self.config
    }

    /// Assembles the complete file.
    ///
    /// Transactions are consumed once, in order. Either every record is
    /// produced or an error is returned and nothing is kept.
    pub fn assemble<'t, I>(&self, transactions: I, context: &FileContext) -> Result<AchFile>
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        let mut transactions = transactions.into_iter().peekable();
        if transactions.peek().is_none() {
            return Err(AchError::EmptyBatch);
        }

        let mut records = vec![
            record::file_header(&self.config, context.created)?,
            record::batch_header(
                &self.config,
                context.created.date(),
                context.effective_date,
            )?,
        ];

        let mut batch = BatchAccumulator::new(&self.config.default_individual_name);
        for tx in transactions {
            records.push(batch.push(tx)?);
        }
        let totals = batch.finish();
        let layout = BlockLayout::for_entries(totals.entry_count);

        records.push(record::batch_control(&self.config, &totals)?);
        records.push(record::file_control(&totals, layout.block_count())?);
        records.extend((0..layout.filler).map(|_| record::filler()));

        debug!(
            "Batch totals: {} entries, hash {}, debit {}, credit {}, {} filler records",
            totals.entry_count,
            totals.truncated_entry_hash(),
            totals.total_debit,
            totals.total_credit,
            layout.filler
        );

        let summary = summarize(context, &totals, &layout)?;
        info!(
            "Assembled {} with {} transactions in {} blocks",
            summary.file_name, summary.transaction_count, summary.block_count
        );

        Ok(AchFile { records, summary })
    }
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!("Persisted {}", path.display());
    Ok(())
}

fn summarize(
    context: &FileContext,
    totals: &BatchTotals,
    layout: &BlockLayout,
) -> Result<FileSummary> {
    let total_amount = totals
        .total_amount()
        .ok_or_else(|| AchError::validation("amount", "file total overflows"))?;

    Ok(FileSummary {
        file_name: context.file_name(),
        transaction_count: totals.entry_count,
        entry_hash: totals.truncated_entry_hash(),
        total_debit: totals.total_debit,
        total_credit: totals.total_credit,
        total_amount,
        block_count: layout.block_count(),
        filler_count: layout.filler,
    })
}
