//! Single-pass batch accumulation.
//!
//! The accumulator encodes each entry detail record and folds the entry into
//! the running control totals in the same step.

use crate::amount::Amount;
use crate::error::{AchError, Result};
use crate::record::{self, Record};
use crate::transaction::{Transaction, TransactionType};
use log::debug;
use serde::Serialize;

/// The entry hash keeps only its low-order 10 decimal digits.
pub const ENTRY_HASH_MODULUS: u64 = 10_000_000_000;

/// Control totals for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    /// Number of entry detail records.
    pub entry_count: u64,

    /// Sum of the receiving DFI identifications.
    pub entry_hash: u64,

    /// Sum of all debit amounts.
    pub total_debit: Amount,

    /// Sum of all credit amounts.
    pub total_credit: Amount,
}

impl BatchTotals {
    /// Entry hash as written to the control records.
    pub fn truncated_entry_hash(&self) -> u64 {
        self.entry_hash % ENTRY_HASH_MODULUS
    }

    /// Debits and credits combined.
    pub fn total_amount(&self) -> Option<Amount> {
        self.total_debit.checked_add(self.total_credit)
    }

    fn add(&mut self, tx: &Transaction) -> Result<()> {
        let total = match tx.transaction_type() {
            TransactionType::Debit => &mut self.total_debit,
            TransactionType::Credit => &mut self.total_credit,
        };
        *total = total.checked_add(tx.amount()).ok_or_else(|| {
            AchError::validation(
                "amount",
                format!("batch {} total overflows", tx.transaction_type()),
            )
        })?;

        self.entry_hash = (self.entry_hash + tx.hash_contribution()) % ENTRY_HASH_MODULUS;
        self.entry_count += 1;
        Ok(())
    }
}

/// Consumes transactions in order, producing entry detail records and the
/// batch totals.
#[derive(Debug)]
pub struct BatchAccumulator<'a> {
    default_name: &'a str,
    totals: BatchTotals,
}

impl<'a> BatchAccumulator<'a> {
    /// Creates an empty accumulator. `default_name` fills the individual
    /// name of entries that carry none.
    pub fn new(default_name: &'a str) -> Self {
        BatchAccumulator {
            default_name,
            totals: BatchTotals::default(),
        }
    }

    /// Encodes the next entry and adds it to the totals.
    ///
    /// Totals are only updated once the record has been encoded, so a failed
    /// entry leaves the accumulator unchanged.
    pub fn push(&mut self, tx: &Transaction) -> Result<Record> {
        let sequence = self.totals.entry_count + 1;
        let record = record::entry_detail(tx, sequence, self.default_name)?;

        let mut next = self.totals;
        next.add(tx)?;
        self.totals = next;

        debug!(
            "Entry {}: {} {} to {}",
            sequence,
            tx.transaction_type(),
            tx.amount(),
            tx.routing_number()
        );
        Ok(record)
    }

    /// Ends the batch.
    pub fn finish(self) -> BatchTotals {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(routing: &str, cents: u64, kind: TransactionType) -> Transaction {
        Transaction::new(routing, "1234567890", Amount::from_cents(cents), kind).unwrap()
    }

    #[test]
    fn test_accumulates_two_entries() {
        let mut acc = BatchAccumulator::new("CUSTOMER");
        let first = acc
            .push(&tx("123456789", 10050, TransactionType::Credit))
            .unwrap();
        let second = acc
            .push(&tx("987654321", 7525, TransactionType::Debit))
            .unwrap();

        assert_eq!(&first.as_str()[79..86], "0000001");
        assert_eq!(&second.as_str()[79..86], "0000002");

        let totals = acc.finish();
        assert_eq!(totals.entry_count, 2);
        assert_eq!(totals.truncated_entry_hash(), 111_111_110);
        assert_eq!(totals.total_credit.cents(), 10050);
        assert_eq!(totals.total_debit.cents(), 7525);
        assert_eq!(totals.total_amount(), Some(Amount::from_cents(17575)));
    }

    #[test]
    fn test_entry_hash_wraps_to_ten_digits() {
        let mut acc = BatchAccumulator::new("CUSTOMER");
        for _ in 0..200 {
            acc.push(&tx("999999999", 1, TransactionType::Credit)).unwrap();
        }

        let totals = acc.finish();
        // 200 * 99_999_999 = 19_999_999_800
        assert_eq!(totals.truncated_entry_hash(), 9_999_999_800);
        assert_eq!(totals.entry_count, 200);
    }

    #[test]
    fn test_failed_entry_leaves_totals_unchanged() {
        let mut acc = BatchAccumulator::new("CUSTOMER");
        acc.push(&tx("123456789", 100, TransactionType::Debit)).unwrap();

        let oversized = tx("123456789", 10_000_000_000, TransactionType::Debit);
        assert!(acc.push(&oversized).is_err());

        let totals = acc.finish();
        assert_eq!(totals.entry_count, 1);
        assert_eq!(totals.total_debit.cents(), 100);
    }

    #[test]
    fn test_empty_accumulator() {
        let totals = BatchAccumulator::new("CUSTOMER").finish();
        assert_eq!(totals, BatchTotals::default());
        assert_eq!(totals.total_amount(), Some(Amount::ZERO));
    }
}
