//! Regex patterns for slip field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Money literal: 49.00, 500.00, 1,234.56. Grouped integer part with an
    // optional two-digit fraction after either separator.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"\b(\d{1,3}(?:,\d{3})*)(?:[.,](\d{2}))?\b"
    ).unwrap();

    // Account-shaped token, three dash-separated groups. Digits plus the
    // x/X masking characters used on privacy-redacted slips (xxx-xxx-1234).
    pub static ref ACCOUNT_PATTERN: Regex = Regex::new(
        r"[0-9xX]{2,}-[0-9xX]{2,}-[0-9xX]{2,}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_pattern_matches_money_literals() {
        for s in ["49.00", "500.00", "1,234.56", "12,345,678.90", "49,00"] {
            assert!(AMOUNT_PATTERN.is_match(s), "expected match: {}", s);
        }
    }

    #[test]
    fn test_amount_pattern_skips_embedded_digit_runs() {
        // A reference code like AB123456789 has no word boundary before
        // its digits, so it must not yield an amount.
        assert!(!AMOUNT_PATTERN.is_match("Ref: AB123456789"));
    }

    #[test]
    fn test_account_pattern() {
        assert!(ACCOUNT_PATTERN.is_match("xxx-xxx-1111"));
        assert!(ACCOUNT_PATTERN.is_match("123-456-7890"));
        assert!(ACCOUNT_PATTERN.is_match("XX-12-34"));
        assert!(!ACCOUNT_PATTERN.is_match("x-xx-1111"));
        assert!(!ACCOUNT_PATTERN.is_match("12-34"));
    }
}
