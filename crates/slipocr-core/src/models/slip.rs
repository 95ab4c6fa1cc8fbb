//! Structured data extracted from a bank transfer slip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fields guessed from the recognized text lines of a transfer slip.
///
/// Every field is independently optional; a field the heuristics could not
/// locate serializes as JSON `null`. The heuristics are not mutually
/// exclusive, so two fields may legitimately point at the same source line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlipFields {
    /// Transfer amount, parsed from `amount_line`.
    pub amount: Option<Decimal>,

    /// Full text of the line that yielded `amount`.
    pub amount_line: Option<String>,

    /// First distinct account-shaped token (sender, by slip layout convention).
    pub from_account: Option<String>,

    /// Second distinct account-shaped token (receiver).
    pub to_account: Option<String>,

    /// First line judged to contain a date and time.
    pub datetime_line: Option<String>,

    /// First line judged to contain a transaction reference.
    pub txn_id: Option<String>,
}
