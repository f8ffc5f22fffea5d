//! CSV-driven generation pipeline.
//!
//! Reads transaction rows, validates every one of them, and only then hands
//! the batch to the [`FileAssembler`]. A single bad row aborts the run.

use crate::assembler::{AchFile, FileAssembler, FileContext};
use crate::config::OriginatorConfig;
use crate::error::{AchError, Result};
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::Read;

/// Turns a CSV of pending transactions into an ACH file.
#[derive(Debug, Clone)]
pub struct AchEngine {
    assembler: FileAssembler,
}

impl AchEngine {
    /// Creates an engine for the given originator.
    pub fn new(config: OriginatorConfig) -> Result<Self> {
        Ok(AchEngine {
            assembler: FileAssembler::new(config)?,
        })
    }

    /// Reads and validates every transaction row.
    ///
    /// Errors carry the 1-based data row number (the header is row 1).
    pub fn read_transactions<R: Read>(&self, reader: R) -> Result<Vec<Transaction>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut transactions = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = result.map_err(|e| {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                AchError::InvalidRecord {
                    row: row_num,
                    message: e.to_string(),
                }
            })?;

            let tx = record.parse().map_err(|e| {
                warn!("Row {}: {}", row_num, e);
                AchError::InvalidRecord {
                    row: row_num,
                    message: e.to_string(),
                }
            })?;

            debug!(
                "Row {}: {} {} for account {}",
                row_num,
                tx.transaction_type(),
                tx.amount(),
                tx.account_number()
            );
            transactions.push(tx);
        }

        Ok(transactions)
    }

    /// Reads a CSV batch and assembles the file.
    pub fn generate<R: Read>(&self, reader: R, context: &FileContext) -> Result<AchFile> {
        let transactions = self.read_transactions(reader)?;
        self.assembler.assemble(&transactions, context)
    }

    pub fn assembler(&self) -> &FileAssembler {
        &self.assembler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn engine() -> AchEngine {
        AchEngine::new(OriginatorConfig::default()).unwrap()
    }

    fn context() -> FileContext {
        FileContext::new(
            NaiveDate::from_ymd_opt(2024, 3, 7)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_reads_all_columns() {
        let csv = r#"routing_number,account_number,amount,transaction_type,individual_id,individual_name
123456789,9876543210,100.50,CREDIT,CUST001,John Doe
987654321,1234567890,75.25,debit,,"#;

        let txs = engine().read_transactions(Cursor::new(csv)).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].individual_id(), Some("CUST001"));
        assert_eq!(txs[0].individual_name(), Some("John Doe"));
        assert_eq!(txs[1].individual_id(), None);
        assert_eq!(txs[1].amount().cents(), 7525);
    }

    #[test]
    fn test_optional_columns_may_be_omitted() {
        let csv = "routing_number,account_number,amount,transaction_type\n\
                   123456789,9876543210,1.00,CREDIT\n";

        let txs = engine().read_transactions(Cursor::new(csv)).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].individual_name(), None);
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = "routing_number, account_number, amount, transaction_type\n\
                   123456789 , 9876543210 , 1.00 , Credit\n";

        let txs = engine().read_transactions(Cursor::new(csv)).unwrap();
        assert_eq!(txs[0].routing_number(), "123456789");
        assert_eq!(txs[0].account_number(), "9876543210");
    }

    #[test]
    fn test_bad_row_reports_row_number() {
        let csv = r#"routing_number,account_number,amount,transaction_type
123456789,9876543210,1.00,CREDIT
1234,9876543210,1.00,CREDIT"#;

        let err = engine().read_transactions(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, AchError::InvalidRecord { row: 3, .. }));
    }

    #[test]
    fn test_generate_sample() {
        let csv = r#"routing_number,account_number,amount,transaction_type
123456789,9876543210,100.50,CREDIT
987654321,1234567890,75.25,DEBIT"#;

        let file = engine().generate(Cursor::new(csv), &context()).unwrap();
        assert_eq!(file.records().len(), 10);
        assert_eq!(file.summary().entry_hash, 111_111_110);
    }

    #[test]
    fn test_generate_header_only_is_empty_batch() {
        let csv = "routing_number,account_number,amount,transaction_type\n";
        let err = engine().generate(Cursor::new(csv), &context()).unwrap_err();
        assert!(matches!(err, AchError::EmptyBatch));
    }
}
