//! Heuristic field extraction from recognized slip lines.
//!
//! The rules here are deliberately literal-minded: they reproduce the
//! behavior of scanning confidence-filtered OCR lines with a handful of
//! regexes and character-class predicates. They are known to be imprecise
//! (the txn-id rule will happily pick an account line that comes first)
//! and that imprecision is part of the contract.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{ACCOUNT_PATTERN, AMOUNT_PATTERN};
use crate::models::slip::SlipFields;

/// Slip field extractor.
///
/// Pure and infallible: a predicate that matches nothing leaves the
/// corresponding field absent, never errors. Safe to share across request
/// handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlipFieldExtractor;

impl SlipFieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all slip fields from an ordered list of recognized lines.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> SlipFields {
        let mut fields = SlipFields::default();

        self.extract_amount(lines, &mut fields);
        self.extract_accounts(lines, &mut fields);
        self.extract_datetime_line(lines, &mut fields);
        self.extract_txn_id(lines, &mut fields);

        fields
    }

    /// Amounts cluster near the bottom of a slip (totals and fees follow
    /// the transfer details), so scan from the last line backward and take
    /// the first line that parses.
    fn extract_amount<S: AsRef<str>>(&self, lines: &[S], fields: &mut SlipFields) {
        for line in lines.iter().rev() {
            let line = line.as_ref();
            let Some(caps) = AMOUNT_PATTERN.captures(line) else {
                continue;
            };

            let integer_part = caps[1].replace(',', "");
            let amount_str = match caps.get(2) {
                Some(fraction) => format!("{}.{}", integer_part, fraction.as_str()),
                None => integer_part,
            };

            // Guarded: the pattern should always parse, but a failure only
            // skips this line rather than aborting the extraction.
            if let Ok(amount) = Decimal::from_str(&amount_str) {
                fields.amount = Some(amount);
                fields.amount_line = Some(line.to_string());
                return;
            }
        }
    }

    /// First distinct account-shaped token becomes the sender, the second
    /// the receiver. Slip layouts usually list source before destination;
    /// a heuristic, not a guarantee.
    fn extract_accounts<S: AsRef<str>>(&self, lines: &[S], fields: &mut SlipFields) {
        let mut seen: Vec<String> = Vec::new();

        for line in lines {
            for m in ACCOUNT_PATTERN.find_iter(line.as_ref()) {
                let token = m.as_str().to_string();
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
        }

        let mut accounts = seen.into_iter();
        fields.from_account = accounts.next();
        fields.to_account = accounts.next();
    }

    /// A colon plus at least four digits is a cheap discriminator for
    /// `HH:MM` next to a numeric date. Known to false-positive on
    /// reference codes that happen to contain a colon.
    fn extract_datetime_line<S: AsRef<str>>(&self, lines: &[S], fields: &mut SlipFields) {
        for line in lines {
            let line = line.as_ref();
            let digit_count = line.chars().filter(|c| c.is_numeric()).count();
            if line.contains(':') && digit_count >= 4 {
                fields.datetime_line = Some(line.to_string());
                return;
            }
        }
    }

    /// First line of at least ten characters mixing letters and digits.
    /// Low precision: Thai script counts as alphabetic, so a labeled
    /// account line often qualifies before the actual reference.
    fn extract_txn_id<S: AsRef<str>>(&self, lines: &[S], fields: &mut SlipFields) {
        for line in lines {
            let line = line.as_ref();
            if line.chars().count() >= 10
                && line.chars().any(|c| c.is_alphabetic())
                && line.chars().any(|c| c.is_numeric())
            {
                fields.txn_id = Some(line.to_string());
                return;
            }
        }
    }
}

/// Extract slip fields from recognized text lines.
pub fn extract_slip_fields<S: AsRef<str>>(lines: &[S]) -> SlipFields {
    SlipFieldExtractor::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn thai_slip_lines() -> Vec<&'static str> {
        vec![
            "โอนเงินสำเร็จ",
            "บัญชีต้นทาง xxx-xxx-1111",
            "บัญชีปลายทาง xxx-xxx-2222",
            "09/10/2024 14:30",
            "จำนวนเงิน 1,234.56 บาท",
            "Ref: AB123456789",
        ]
    }

    #[test]
    fn test_extract_thai_slip() {
        let fields = extract_slip_fields(&thai_slip_lines());

        assert_eq!(fields.amount, Some(Decimal::from_str("1234.56").unwrap()));
        assert_eq!(fields.amount_line.as_deref(), Some("จำนวนเงิน 1,234.56 บาท"));
        assert_eq!(fields.from_account.as_deref(), Some("xxx-xxx-1111"));
        assert_eq!(fields.to_account.as_deref(), Some("xxx-xxx-2222"));
        assert_eq!(fields.datetime_line.as_deref(), Some("09/10/2024 14:30"));
        // The txn-id rule fires on the first long mixed line, which here is
        // the labeled source-account line, not the Ref line. Expected.
        assert_eq!(fields.txn_id.as_deref(), Some("บัญชีต้นทาง xxx-xxx-1111"));
    }

    #[test]
    fn test_no_matches_leaves_all_fields_absent() {
        let fields = extract_slip_fields(&["โอนเงิน", "hello"]);
        assert_eq!(fields, SlipFields::default());
    }

    #[test]
    fn test_amount_prefers_last_qualifying_line() {
        let fields = extract_slip_fields(&["1.00 fee", "total 500.00"]);
        assert_eq!(fields.amount, Some(Decimal::from_str("500.00").unwrap()));
        assert_eq!(fields.amount_line.as_deref(), Some("total 500.00"));
    }

    #[test]
    fn test_amount_comma_decimal_separator() {
        let fields = extract_slip_fields(&["49,00"]);
        assert_eq!(fields.amount, Some(Decimal::from_str("49.00").unwrap()));
    }

    #[test]
    fn test_amount_without_fraction() {
        let fields = extract_slip_fields(&["1,234 THB"]);
        assert_eq!(fields.amount, Some(Decimal::from_str("1234").unwrap()));
    }

    #[test]
    fn test_no_amount_in_reference_code() {
        let fields = extract_slip_fields(&["Ref: AB123456789"]);
        assert_eq!(fields.amount, None);
        assert_eq!(fields.amount_line, None);
    }

    #[test]
    fn test_single_account_leaves_to_account_absent() {
        let fields = extract_slip_fields(&["บัญชี xxx-xxx-1111"]);
        assert_eq!(fields.from_account.as_deref(), Some("xxx-xxx-1111"));
        assert_eq!(fields.to_account, None);
    }

    #[test]
    fn test_repeated_account_deduplicates() {
        let fields = extract_slip_fields(&["from xxx-xxx-1111", "to xxx-xxx-1111"]);
        assert_eq!(fields.from_account.as_deref(), Some("xxx-xxx-1111"));
        assert_eq!(fields.to_account, None);
    }

    #[test]
    fn test_two_accounts_on_one_line() {
        let fields = extract_slip_fields(&["111-222-3333 -> 444-555-6666"]);
        assert_eq!(fields.from_account.as_deref(), Some("111-222-3333"));
        assert_eq!(fields.to_account.as_deref(), Some("444-555-6666"));
    }

    #[test]
    fn test_datetime_requires_colon_and_four_digits() {
        let fields = extract_slip_fields(&["time 1:3", "date: 09/10/2024"]);
        assert_eq!(fields.datetime_line.as_deref(), Some("date: 09/10/2024"));
    }

    #[test]
    fn test_datetime_counts_digits_anywhere_in_line() {
        // Digits need not be adjacent to the colon.
        let fields = extract_slip_fields(&["2024 note: 99"]);
        assert_eq!(fields.datetime_line.as_deref(), Some("2024 note: 99"));
    }

    #[test]
    fn test_txn_id_requires_length_and_mixed_content() {
        // Nine characters: too short.
        let fields = extract_slip_fields(&["AB1234567"]);
        assert_eq!(fields.txn_id, None);

        // Ten, but digits only.
        let fields = extract_slip_fields(&["1234567890"]);
        assert_eq!(fields.txn_id, None);

        let fields = extract_slip_fields(&["AB12345678"]);
        assert_eq!(fields.txn_id.as_deref(), Some("AB12345678"));
    }

    #[test]
    fn test_txn_id_counts_unicode_scalars_not_bytes() {
        // Thai text is multi-byte per character; length is in characters.
        let fields = extract_slip_fields(&["อ้างอิง A1"]);
        assert_eq!(fields.txn_id.as_deref(), Some("อ้างอิง A1"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let lines = thai_slip_lines();
        let first = extract_slip_fields(&lines);
        let second = extract_slip_fields(&lines);
        assert_eq!(first, second);
    }
}
