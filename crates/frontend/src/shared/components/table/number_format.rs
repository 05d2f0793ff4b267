//! Number formatting for table cells (vi-VN: dot groups thousands, comma marks decimals)

/// Groups the digits of an integer with dots
///
/// # Examples
///
/// ```
/// # use frontend::shared::components::table::format_number_int;
/// assert_eq!(format_number_int(1234567), "1.234.567");
/// ```
pub fn format_number_int(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// VND amount, no fractional part
pub fn format_money(value: i64) -> String {
    format_number_int(value)
}

/// VND amount with the currency suffix, e.g. "1.500.000 ₫"
pub fn format_money_with_currency(value: i64) -> String {
    format!("{} ₫", format_number_int(value))
}

/// Fractional number with grouped integer part and a decimal comma
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let integer: i64 = integer_part.parse().unwrap_or(0);
    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, format_number_int(integer), d),
        None => format!("{}{}", sign, format_number_int(integer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567), "1.234.567");
        assert_eq!(format_number_int(0), "0");
        assert_eq!(format_number_int(999), "999");
        assert_eq!(format_number_int(1000), "1.000");
        assert_eq!(format_number_int(-1234), "-1.234");
        assert_eq!(format_number_int(-50_000_000), "-50.000.000");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1_400_000), "1.400.000");
        assert_eq!(format_money_with_currency(1_500_000), "1.500.000 ₫");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(1.02, 2), "1,02");
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(-1234.5, 1), "-1.234,5");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0,00");
    }
}
