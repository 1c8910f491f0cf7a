/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an amount as whole currency units with `,` thousands separators.
///
/// `15000.0` becomes `"15,000"`, `2499.6` becomes `"2,500"`.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(15000.0), "15,000");
        assert_eq!(format_price(1500.0), "1,500");
        assert_eq!(format_price(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_price_small_values() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(999.0), "999");
    }

    #[test]
    fn test_format_price_rounds_to_whole_units() {
        assert_eq!(format_price(2499.6), "2,500");
        assert_eq!(format_price(1800.4), "1,800");
    }
}
