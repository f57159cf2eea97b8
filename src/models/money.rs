//! Monetary amount formatting and parsing
//!
//! Amounts are IEEE doubles throughout the ledger. This module owns the one
//! display format every report uses (US digit grouping, one decimal) and the
//! parser used by the command line.

use crate::error::{WalletError, WalletResult};

/// Format an amount with comma grouping and one decimal place
///
/// # Examples
/// ```
/// use wallet_ledger::models::money::format_amount;
/// assert_eq!(format_amount(63000.0), "63,000.0");
/// assert_eq!(format_amount(-500.0), "-500.0");
/// ```
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let tenths = (amount.abs() * 10.0).round() as u64;
    let whole = tenths / 10;
    let fraction = tenths % 10;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.0" reads as noise for tiny negative residues
    let sign = if amount < 0.0 && tenths != 0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Format a share as a whole percentage, e.g. `85%`
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.0}%", percentage)
}

/// Parse an amount typed by the user
///
/// Accepts plain decimals (`1500`, `1500.50`) and tolerates grouping commas
/// (`1,500.50`). Non-finite values are rejected.
pub fn parse_amount(s: &str) -> WalletResult<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| WalletError::InvalidArgument(format!("Invalid amount: {}", s.trim())))?;

    if !value.is_finite() {
        return Err(WalletError::InvalidArgument(format!(
            "Invalid amount: {}",
            s.trim()
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouping() {
        assert_eq!(format_amount(0.0), "0.0");
        assert_eq!(format_amount(999.0), "999.0");
        assert_eq!(format_amount(1000.0), "1,000.0");
        assert_eq!(format_amount(1234567.89), "1,234,567.9");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(-500.0), "-500.0");
        assert_eq!(format_amount(-3200.0), "-3,200.0");
        assert_eq!(format_amount(-0.01), "0.0");
    }

    #[test]
    fn test_format_rounds_to_tenths() {
        assert_eq!(format_amount(10.25), "10.3");
        assert_eq!(format_amount(10.04), "10.0");
        assert_eq!(format_amount(99.96), "100.0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(85.0), "85%");
        assert_eq!(format_percentage(120.4), "120%");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_amount("1500").unwrap(), 1500.0);
        assert_eq!(parse_amount(" 10.5 ").unwrap(), 10.5);
        assert_eq!(parse_amount("1,500.25").unwrap(), 1500.25);
        assert_eq!(parse_amount("-20").unwrap(), -20.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_amount("abc"),
            Err(WalletError::InvalidArgument(_))
        ));
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("").is_err());
    }
}
