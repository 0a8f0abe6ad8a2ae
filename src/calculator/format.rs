//! Result formatting.

/// Format a number for display: rounded to two decimal places, then stripped
/// of trailing zeros and a trailing decimal point.
///
/// `5.0` renders as `"5"`, `5.5` as `"5.5"` and `1.0/3.0` as `"0.33"`.
pub fn format_result(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    // Rounding can leave a negative zero behind ("-0.00" -> "-0")
    if trimmed == "-0" || trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_have_no_decimal_point() {
        assert_eq!(format_result(5.0), "5");
        assert_eq!(format_result(220.0), "220");
        assert_eq!(format_result(-180.0), "-180");
        assert_eq!(format_result(1000000.0), "1000000");
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        assert_eq!(format_result(5.5), "5.5");
        assert_eq!(format_result(0.1), "0.1");
        assert_eq!(format_result(2.25), "2.25");
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(format_result(1.0 / 3.0), "0.33");
        assert_eq!(format_result(2.0 / 3.0), "0.67");
        assert_eq!(format_result(4.999), "5");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(-0.001), "0");
    }

    #[test]
    fn test_zero_integer_part_kept() {
        // "0.00" must not be trimmed down to an empty string
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(0.004), "0");
    }
}
