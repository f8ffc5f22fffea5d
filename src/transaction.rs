//! Transaction models for CSV parsing and internal representation.

use crate::amount::Amount;
use crate::error::{AchError, Result};
use crate::field::{check_digits, check_text};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ROUTING_NUMBER_LEN: usize = 9;
pub const ACCOUNT_NUMBER_MAX: usize = 17;
pub const INDIVIDUAL_ID_MAX: usize = 15;
pub const INDIVIDUAL_NAME_MAX: usize = 22;

/// Raw transaction record as read from CSV.
///
/// Everything is kept as text until [`parse`](Self::parse) validates it.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub routing_number: String,

    pub account_number: String,

    pub amount: String,

    /// DEBIT or CREDIT, any case
    pub transaction_type: String,

    #[serde(default)]
    pub individual_id: Option<String>,

    #[serde(default)]
    pub individual_name: Option<String>,
}

impl TransactionRecord {
    /// Validates the raw record into a typed transaction.
    pub fn parse(&self) -> Result<Transaction> {
        let transaction_type = TransactionType::from_str(&self.transaction_type)?;
        let amount = Amount::from_str(&self.amount)?;

        let mut tx = Transaction::new(
            self.routing_number.trim(),
            self.account_number.trim(),
            amount,
            transaction_type,
        )?;
        if let Some(id) = non_blank(&self.individual_id) {
            tx = tx.with_individual_id(id)?;
        }
        if let Some(name) = non_blank(&self.individual_name) {
            tx = tx.with_individual_name(name)?;
        }
        Ok(tx)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Direction of the money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Pull funds from the receiver's account.
    Debit,

    /// Push funds into the receiver's account.
    Credit,
}

impl TransactionType {
    /// Two-digit transaction code for a checking account entry.
    pub fn transaction_code(self) -> &'static str {
        match self {
            TransactionType::Credit => "22",
            TransactionType::Debit => "27",
        }
    }
}

impl FromStr for TransactionType {
    type Err = AchError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("DEBIT") {
            Ok(TransactionType::Debit)
        } else if trimmed.eq_ignore_ascii_case("CREDIT") {
            Ok(TransactionType::Credit)
        } else {
            Err(AchError::validation(
                "transaction type",
                format!("'{}' is neither DEBIT nor CREDIT", trimmed),
            ))
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Debit => f.write_str("DEBIT"),
            TransactionType::Credit => f.write_str("CREDIT"),
        }
    }
}

/// A validated transaction ready for encoding.
///
/// Fields are private so that every instance has passed the width and
/// format checks in [`Transaction::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    routing_number: String,
    account_number: String,
    amount: Amount,
    transaction_type: TransactionType,
    individual_id: Option<String>,
    individual_name: Option<String>,
}

impl Transaction {
    /// Creates a transaction, rejecting any field that would not fit the
    /// entry detail record.
    pub fn new(
        routing_number: impl Into<String>,
        account_number: impl Into<String>,
        amount: Amount,
        transaction_type: TransactionType,
    ) -> Result<Self> {
        let routing_number = routing_number.into();
        let account_number = account_number.into();

        check_digits("routing number", &routing_number, ROUTING_NUMBER_LEN)?;
        if account_number.is_empty() {
            return Err(AchError::validation("account number", "is empty"));
        }
        check_text("account number", &account_number, ACCOUNT_NUMBER_MAX)?;

        Ok(Transaction {
            routing_number,
            account_number,
            amount,
            transaction_type,
            individual_id: None,
            individual_name: None,
        })
    }

    /// Attaches the receiver's identification number.
    pub fn with_individual_id(mut self, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        check_text("individual id", &id, INDIVIDUAL_ID_MAX)?;
        self.individual_id = Some(id);
        Ok(self)
    }

    /// Attaches the receiver's name.
    pub fn with_individual_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_text("individual name", &name, INDIVIDUAL_NAME_MAX)?;
        self.individual_name = Some(name);
        Ok(self)
    }

    pub fn routing_number(&self) -> &str {
        &self.routing_number
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn individual_id(&self) -> Option<&str> {
        self.individual_id.as_deref()
    }

    pub fn individual_name(&self) -> Option<&str> {
        self.individual_name.as_deref()
    }

    /// Receiving DFI identification: the first 8 digits of the routing number.
    pub fn receiving_dfi(&self) -> &str {
        &self.routing_number[..8]
    }

    /// The routing number's check digit.
    pub fn check_digit(&self) -> &str {
        &self.routing_number[8..]
    }

    /// Receiving DFI identification as a number, the unit summed into the
    /// entry hash.
    pub fn hash_contribution(&self) -> u64 {
        self.receiving_dfi()
            .bytes()
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
    }
}
