//! Fixed-width record encoders.
//!
//! Each encoder is a pure function from its inputs to one [`Record`]. The
//! field tables below list every slot in order, left to right.

use crate::batch::BatchTotals;
use crate::config::OriginatorConfig;
use crate::error::{AchError, Result};
use crate::field::{self, Field};
use crate::transaction::Transaction;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Length of every physical record, excluding the line terminator.
pub const RECORD_LENGTH: usize = 94;

pub const SERVICE_CLASS_MIXED: &str = "200";
pub const STANDARD_ENTRY_CLASS: &str = "PPD";
pub const BATCH_NUMBER: u64 = 1;
pub const BATCH_COUNT: u64 = 1;

// File header (1)
const PRIORITY_CODE: &str = "01";
const IMMEDIATE_DESTINATION: Field = Field::right("immediate destination", 10);
const IMMEDIATE_ORIGIN: Field = Field::right("immediate origin", 10);
const FILE_ID_MODIFIER: &str = "A";
const RECORD_SIZE: &str = "094";
const BLOCKING_FACTOR: &str = "10";
const FORMAT_CODE: &str = "1";
const DESTINATION_NAME: Field = Field::alpha("immediate destination name", 23);
const ORIGIN_NAME: Field = Field::alpha("immediate origin name", 23);
const REFERENCE_CODE_WIDTH: usize = 8;

// Batch header (5)
const COMPANY_NAME: Field = Field::alpha("company name", 16);
const COMPANY_DISCRETIONARY_WIDTH: usize = 10;
const COMPANY_ID: Field = Field::alpha("company id", 10);
const ENTRY_DESCRIPTION: Field = Field::alpha("entry description", 9);
const SETTLEMENT_DATE_WIDTH: usize = 3;
const ORIGINATOR_STATUS: &str = "1";
const ORIGINATING_DFI: Field = Field::numeric("originating DFI", 8);
const BATCH_NUMBER_FIELD: Field = Field::numeric("batch number", 7);

// Entry detail (6)
const RECEIVING_DFI: Field = Field::numeric("receiving DFI", 8);
const CHECK_DIGIT: Field = Field::numeric("check digit", 1);
const ACCOUNT_NUMBER: Field = Field::alpha("account number", 17);
const AMOUNT: Field = Field::numeric("amount", 10);
const INDIVIDUAL_ID: Field = Field::alpha("individual id", 15);
const INDIVIDUAL_NAME: Field = Field::alpha("individual name", 22);
const ENTRY_DISCRETIONARY_WIDTH: usize = 2;
const ADDENDA_INDICATOR: &str = "0";
const TRACE_NUMBER: Field = Field::numeric("trace number", 7);

// Batch control (8)
const BATCH_ENTRY_COUNT: Field = Field::numeric("batch entry/addenda count", 6);
const ENTRY_HASH: Field = Field::numeric("entry hash", 10);
const TOTAL_DEBIT: Field = Field::numeric("total debit amount", 12);
const TOTAL_CREDIT: Field = Field::numeric("total credit amount", 12);
const MESSAGE_AUTHENTICATION_WIDTH: usize = 19;
const BATCH_RESERVED_WIDTH: usize = 6;

// File control (9)
const BATCH_COUNT_FIELD: Field = Field::numeric("batch count", 6);
const BLOCK_COUNT: Field = Field::numeric("block count", 6);
const FILE_ENTRY_COUNT: Field = Field::numeric("file entry/addenda count", 8);
const FILE_RESERVED_WIDTH: usize = 38;

/// Record type codes, the first character of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    FileHeader,
    BatchHeader,
    EntryDetail,
    BatchControl,
    FileControl,
}

impl RecordType {
    pub fn code(self) -> char {
        match self {
            RecordType::FileHeader => '1',
            RecordType::BatchHeader => '5',
            RecordType::EntryDetail => '6',
            RecordType::BatchControl => '8',
            RecordType::FileControl => '9',
        }
    }
}

/// One physical line of the file, always exactly [`RECORD_LENGTH`] ASCII
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(String);

impl Record {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character of the record.
    pub fn type_code(&self) -> char {
        self.0.chars().next().unwrap_or(' ')
    }

    /// Returns `true` for a block-padding record.
    pub fn is_filler(&self) -> bool {
        self.0.bytes().all(|b| b == b'9')
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Appends fields left to right and pads the result to a full record.
struct RecordBuilder {
    buf: String,
}

impl RecordBuilder {
    fn new(record_type: RecordType) -> Self {
        let mut buf = String::with_capacity(RECORD_LENGTH);
        buf.push(record_type.code());
        RecordBuilder { buf }
    }

    fn constant(mut self, value: &str) -> Self {
        self.buf.push_str(value);
        self
    }

    fn blank(mut self, width: usize) -> Self {
        self.buf.push_str(&field::blank(width));
        self
    }

    fn text(mut self, field: Field, value: &str) -> Result<Self> {
        self.buf.push_str(&field.format(value)?);
        Ok(self)
    }

    fn number(mut self, field: Field, value: u64) -> Result<Self> {
        self.buf.push_str(&field.format_number(value)?);
        Ok(self)
    }

    fn finish(self) -> Result<Record> {
        if self.buf.len() > RECORD_LENGTH {
            return Err(AchError::validation(
                "record",
                format!(
                    "layout is {} characters, maximum is {}",
                    self.buf.len(),
                    RECORD_LENGTH
                ),
            ));
        }
        Ok(Record(format!("{:<width$}", self.buf, width = RECORD_LENGTH)))
    }
}

/// File header record (type 1).
pub fn file_header(config: &OriginatorConfig, created: NaiveDateTime) -> Result<Record> {
    RecordBuilder::new(RecordType::FileHeader)
        .constant(PRIORITY_CODE)
        .text(IMMEDIATE_DESTINATION, &config.immediate_destination)?
        .text(IMMEDIATE_ORIGIN, &config.company_id)?
        .constant(&field::date(created.date()))
        .constant(&field::time(created.time()))
        .constant(FILE_ID_MODIFIER)
        .constant(RECORD_SIZE)
        .constant(BLOCKING_FACTOR)
        .constant(FORMAT_CODE)
        .text(DESTINATION_NAME, &config.destination_name)?
        .text(ORIGIN_NAME, &config.origin_name)?
        .blank(REFERENCE_CODE_WIDTH)
        .finish()
}

/// Batch header record (type 5).
pub fn batch_header(
    config: &OriginatorConfig,
    descriptive_date: NaiveDate,
    effective_date: NaiveDate,
) -> Result<Record> {
    RecordBuilder::new(RecordType::BatchHeader)
        .constant(SERVICE_CLASS_MIXED)
        .text(COMPANY_NAME, &config.company_name)?
        .blank(COMPANY_DISCRETIONARY_WIDTH)
        .text(COMPANY_ID, &config.company_id)?
        .constant(STANDARD_ENTRY_CLASS)
        .text(ENTRY_DESCRIPTION, &config.entry_description)?
        .constant(&field::date(descriptive_date))
        .constant(&field::date(effective_date))
        .blank(SETTLEMENT_DATE_WIDTH)
        .constant(ORIGINATOR_STATUS)
        .text(ORIGINATING_DFI, config.originating_dfi())?
        .number(BATCH_NUMBER_FIELD, BATCH_NUMBER)?
        .finish()
}

/// Entry detail record (type 6). `sequence` is the 1-based position of the
/// entry within its batch and doubles as the trace number.
pub fn entry_detail(tx: &Transaction, sequence: u64, default_name: &str) -> Result<Record> {
    RecordBuilder::new(RecordType::EntryDetail)
        .constant(tx.transaction_type().transaction_code())
        .text(RECEIVING_DFI, tx.receiving_dfi())?
        .text(CHECK_DIGIT, tx.check_digit())?
        .text(ACCOUNT_NUMBER, tx.account_number())?
        .number(AMOUNT, tx.amount().cents())?
        .text(INDIVIDUAL_ID, tx.individual_id().unwrap_or(""))?
        .text(INDIVIDUAL_NAME, tx.individual_name().unwrap_or(default_name))?
        .blank(ENTRY_DISCRETIONARY_WIDTH)
        .constant(ADDENDA_INDICATOR)
        .number(TRACE_NUMBER, sequence)?
        .finish()
}

/// Batch control record (type 8).
pub fn batch_control(config: &OriginatorConfig, totals: &BatchTotals) -> Result<Record> {
    RecordBuilder::new(RecordType::BatchControl)
        .constant(SERVICE_CLASS_MIXED)
        .number(BATCH_ENTRY_COUNT, totals.entry_count)?
        .number(ENTRY_HASH, totals.truncated_entry_hash())?
        .number(TOTAL_DEBIT, totals.total_debit.cents())?
        .number(TOTAL_CREDIT, totals.total_credit.cents())?
        .text(COMPANY_ID, &config.company_id)?
        .blank(MESSAGE_AUTHENTICATION_WIDTH)
        .blank(BATCH_RESERVED_WIDTH)
        .text(ORIGINATING_DFI, config.originating_dfi())?
        .number(BATCH_NUMBER_FIELD, BATCH_NUMBER)?
        .finish()
}

/// File control record (type 9).
pub fn file_control(totals: &BatchTotals, block_count: u64) -> Result<Record> {
    RecordBuilder::new(RecordType::FileControl)
        .number(BATCH_COUNT_FIELD, BATCH_COUNT)?
        .number(BLOCK_COUNT, block_count)?
        .number(FILE_ENTRY_COUNT, totals.entry_count)?
        .number(ENTRY_HASH, totals.truncated_entry_hash())?
        .number(TOTAL_DEBIT, totals.total_debit.cents())?
        .number(TOTAL_CREDIT, totals.total_credit.cents())?
        .blank(FILE_RESERVED_WIDTH)
        .finish()
}

/// Block-padding record: 94 nines.
pub fn filler() -> Record {
    Record("9".repeat(RECORD_LENGTH))
}
