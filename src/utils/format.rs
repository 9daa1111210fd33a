/// Format a decimal amount string as euros for display.
/// Amounts arrive from the gateway as strings and are shown as-is with the
/// currency symbol appended; unparsable input is passed through unchanged.
pub fn format_euro(amount: &str) -> String {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    format!("{}€", trimmed)
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

/// Format a gateway timestamp as dd/mm/yyyy.
/// Falls back to the date prefix for plain YYYY-MM-DD strings and to the
/// original input when nothing parses.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%d/%m/%Y").to_string()
    } else if let Ok(d) = chrono::NaiveDate::parse_from_str(&date.chars().take(10).collect::<String>(), "%Y-%m-%d") {
        d.format("%d/%m/%Y").to_string()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro("12000.00"), "12000.00€");
        assert_eq!(format_euro("  275.50 "), "275.50€");
        assert_eq!(format_euro(""), "-");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(
            format_optional(&Some("Auto".to_string()), "Non specificata"),
            "Auto"
        );
        assert_eq!(format_optional(&None, "Non specificata"), "Non specificata");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-11-05T09:30:00.000Z"), "05/11/2024");
        assert_eq!(format_date("1988-04-02"), "02/04/1988");
        assert_eq!(format_date("not a date"), "not a date");
    }
}
