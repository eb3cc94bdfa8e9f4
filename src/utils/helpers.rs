//! Helper functions and utilities
//!
//! Amount parsing and formatting, access-code generation and other small
//! helpers shared by the dialogue and persistence layers.

use std::sync::LazyLock;
use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;

static NON_AMOUNT_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\d,.]").expect("static amount pattern is valid")
});

/// Largest amount a single expense may have, the range of a `NUMERIC(10,2)`
pub const MAX_AMOUNT: f64 = 99_999_999.99;

/// Parse a user-typed amount such as `"R$ 42,50"` or `"12.3"`.
///
/// Everything except digits, `,` and `.` is dropped and `,` is read as the
/// decimal separator. Returns `None` unless the result is a finite, positive
/// number no larger than [`MAX_AMOUNT`].
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = NON_AMOUNT_CHARS.replace_all(text, "").replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }

    let amount = cleaned.parse::<f64>().ok()?;
    if amount.is_finite() && amount > 0.0 && amount <= MAX_AMOUNT {
        Some(amount)
    } else {
        None
    }
}

/// Convert an amount to integer cents, rounding half away from zero
pub fn amount_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Format cents as Brazilian reais, e.g. `R$ 42,50`
pub fn format_cents(cents: i64) -> String {
    format_total_cents(i128::from(cents))
}

/// Format a sum of cents, which may exceed the range of a single amount
pub fn format_total_cents(cents: i128) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}R$ {},{:02}", sign, abs / 100, abs % 100)
}

/// Format a decimal amount as Brazilian reais
pub fn format_amount(amount: f64) -> String {
    format_cents(amount_to_cents(amount))
}

/// Format a date for display (`dd/mm/yyyy`)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Generate a random numeric access code of the given length
pub fn generate_access_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42,50"), Some(42.5));
        assert_eq!(parse_amount("R$ 12.30"), Some(12.3));
        assert_eq!(parse_amount("  7 "), Some(7.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), Some(5.0));
        assert_eq!(parse_amount("1.234,56"), None);
    }

    #[test]
    fn test_parse_amount_upper_bound() {
        assert_eq!(parse_amount("99999999,99"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("100000000"), None);
        assert_eq!(parse_amount("99999999999999999999"), None);
        assert_eq!(amount_to_cents(MAX_AMOUNT), 9_999_999_999);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(42.5), "R$ 42,50");
        assert_eq!(format_cents(5), "R$ 0,05");
        assert_eq!(format_cents(-1050), "-R$ 10,50");
        assert_eq!(amount_to_cents(19.999), 2000);
        assert_eq!(format_total_cents(2 * i64::MAX as i128), "R$ 184467440737095516,14");
    }

    #[test]
    fn test_generate_access_code() {
        let code = generate_access_code(6);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Almoço no restaurante", 10), "Almoço ...");
    }
}
