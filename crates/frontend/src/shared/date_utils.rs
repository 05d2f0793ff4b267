/// Date helpers for display (dd/mm/yyyy) and `<input type="date">` values
use chrono::{Datelike, Local, NaiveDate};

/// Browser-local current date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_month_year() -> (u32, i32) {
    let now = today();
    (now.month(), now.year())
}

/// Format ISO date string to DD/MM/YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => format_naive(date),
        Err(_) => date_str.to_string(),
    }
}

pub fn format_naive(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Value for `<input type="date">`
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parses an `<input type="date">` value; empty or invalid is `None`
pub fn from_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(from_input_value(""), None);
        assert_eq!(from_input_value("2024-13-01"), None);
    }

    #[test]
    fn test_input_value_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(to_input_value(Some(date)), "2024-03-05");
        assert_eq!(from_input_value("2024-03-05"), Some(date));
        assert_eq!(to_input_value(None), "");
    }
}
