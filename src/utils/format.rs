//! Presentation helpers for amounts and percentages.

/// Currency symbols whose amounts are shown without minor units.
const ZERO_DECIMAL_SYMBOLS: &[&str] = &["¥", "円", "₩", "JPY", "KRW"];

/// Formats `amount` with thousands separators, e.g. `¥1,700` or `$1,234.50`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let decimals = if ZERO_DECIMAL_SYMBOLS.contains(&symbol) {
        0
    } else {
        2
    };
    let rendered = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && rendered.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}

/// Formats a percentage with one decimal place, e.g. `70.6%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yen_has_no_minor_units() {
        assert_eq!(format_amount(1700.0, "¥"), "¥1,700");
        assert_eq!(format_amount(80000.0, "¥"), "¥80,000");
        assert_eq!(format_amount(500.0, "¥"), "¥500");
    }

    #[test]
    fn other_symbols_use_two_decimals() {
        assert_eq!(format_amount(1234.5, "$"), "$1,234.50");
        assert_eq!(format_amount(0.0, "€"), "€0.00");
        assert_eq!(format_amount(1_000_000.0, "$"), "$1,000,000.00");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_amount(-1500.0, "¥"), "-¥1,500");
        assert_eq!(format_amount(-0.001, "$"), "$0.00");
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(format_percentage(70.588), "70.6%");
    }
}
