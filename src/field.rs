//! Fixed-width field formatting.
//!
//! A [`Field`] describes one slot of a record: its name (used in error
//! messages), width, justification and fill character. Values that do not
//! fit are rejected; nothing is ever silently truncated.

use crate::error::{AchError, Result};
use chrono::{NaiveDate, NaiveTime};

/// Side of the slot the value is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

/// Character used to fill unused positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Space,
    Zero,
}

impl Fill {
    fn as_char(self) -> char {
        match self {
            Fill::Space => ' ',
            Fill::Zero => '0',
        }
    }
}

/// Layout of a single fixed-width slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: usize,
    pub justify: Justify,
    pub fill: Fill,
}

impl Field {
    /// Left-justified, space-filled text.
    pub const fn alpha(name: &'static str, width: usize) -> Self {
        Field {
            name,
            width,
            justify: Justify::Left,
            fill: Fill::Space,
        }
    }

    /// Right-justified, space-filled identifier.
    pub const fn right(name: &'static str, width: usize) -> Self {
        Field {
            name,
            width,
            justify: Justify::Right,
            fill: Fill::Space,
        }
    }

    /// Right-justified, zero-filled number.
    pub const fn numeric(name: &'static str, width: usize) -> Self {
        Field {
            name,
            width,
            justify: Justify::Right,
            fill: Fill::Zero,
        }
    }

    /// Renders text into the slot.
    ///
    /// Only printable ASCII is accepted, since every character must occupy
    /// exactly one byte of the record.
    pub fn format(&self, value: &str) -> Result<String> {
        check_text(self.name, value, self.width)?;

        let padding = self.width - value.len();
        let fill: String = std::iter::repeat(self.fill.as_char()).take(padding).collect();

        Ok(match self.justify {
            Justify::Left => format!("{}{}", value, fill),
            Justify::Right => format!("{}{}", fill, value),
        })
    }

    /// Renders a non-negative integer into the slot.
    pub fn format_number(&self, value: u64) -> Result<String> {
        let digits = value.to_string();
        if digits.len() > self.width {
            return Err(AchError::FieldOverflow {
                field: self.name,
                width: self.width,
                value,
            });
        }
        self.format(&digits)
    }
}

/// Checks that `value` is printable ASCII of at most `max` characters.
pub fn check_text(field: &'static str, value: &str, max: usize) -> Result<()> {
    if let Some(c) = value.chars().find(|c| !(c.is_ascii() && !c.is_ascii_control())) {
        return Err(AchError::validation(
            field,
            format!("'{}' contains unsupported character {:?}", value, c),
        ));
    }
    if value.len() > max {
        return Err(AchError::validation(
            field,
            format!("'{}' is {} characters, maximum is {}", value, value.len(), max),
        ));
    }
    Ok(())
}

/// Checks that `value` consists of exactly `len` ASCII digits.
pub fn check_digits(field: &'static str, value: &str, len: usize) -> Result<()> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AchError::validation(
            field,
            format!("'{}' must be exactly {} digits", value, len),
        ));
    }
    Ok(())
}

/// Renders a date as `YYMMDD`.
pub fn date(value: NaiveDate) -> String {
    value.format("%y%m%d").to_string()
}

/// Renders a time of day as `HHMM`.
pub fn time(value: NaiveTime) -> String {
    value.format("%H%M").to_string()
}

/// A run of spaces.
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}
