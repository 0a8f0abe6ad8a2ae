//! Shape checks over neutral-digit expression text.
//!
//! The evaluators only ever see text that has already been transcoded to
//! neutral digits; these helpers decide which evaluation path applies and
//! where an expression should be split.

use super::token::Operator;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings built only from characters the calculator can type.
    /// Allows: neutral digits, the decimal point, operators and percent.
    static ref CALCULATOR_CHARS: Regex = Regex::new(
        r"^[0-9\.\+\-\*/×÷%]*$"
    ).unwrap();

    /// Matches an expression with exactly one percent sign, at the end.
    static ref TRAILING_PERCENT: Regex = Regex::new(
        r"^([^%]*)%$"
    ).unwrap();
}

/// Check if the input contains only characters the keypad can produce.
pub fn is_calculator_text(input: &str) -> bool {
    CALCULATOR_CHARS.is_match(input)
}

/// Check if the percentage evaluator should handle this input.
pub fn has_percent(input: &str) -> bool {
    input.contains('%')
}

/// The part before a single trailing `%`, or `None` when the input does not
/// end in exactly one percent sign.
pub fn percent_operand(input: &str) -> Option<&str> {
    TRAILING_PERCENT
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Check if the last character is an operator.
pub fn ends_with_operator(input: &str) -> bool {
    input
        .chars()
        .next_back()
        .is_some_and(|c| Operator::from_char(c).is_some())
}

/// Remove every dangling operator from the end of the input.
pub fn strip_trailing_operators(input: &str) -> &str {
    input.trim_end_matches(|c| Operator::from_char(c).is_some())
}

/// Find the rightmost operator in the input.
///
/// Returns the byte offset of the operator together with the operator. The
/// position alone decides the split point; there is no precedence.
pub fn last_operator(input: &str) -> Option<(usize, Operator)> {
    input
        .char_indices()
        .rev()
        .find_map(|(idx, c)| Operator::from_char(c).map(|op| (idx, op)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_text() {
        assert!(is_calculator_text("12.5+3×4÷2-1%"));
        assert!(is_calculator_text(""));
        assert!(!is_calculator_text("2+(3)"));
        assert!(!is_calculator_text("१+२"));
    }

    #[test]
    fn test_percent_operand() {
        assert_eq!(percent_operand("10%"), Some("10"));
        assert_eq!(percent_operand("200+10%"), Some("200+10"));
        assert_eq!(percent_operand("%"), Some(""));
        assert_eq!(percent_operand("5%%"), None);
        assert_eq!(percent_operand("5%3"), None);
        assert_eq!(percent_operand("53"), None);
    }

    #[test]
    fn test_strip_trailing_operators() {
        assert_eq!(strip_trailing_operators("5+×"), "5");
        assert_eq!(strip_trailing_operators("5+3"), "5+3");
        assert_eq!(strip_trailing_operators("+-"), "");
        assert_eq!(strip_trailing_operators(""), "");
    }

    #[test]
    fn test_last_operator_is_rightmost() {
        assert_eq!(last_operator("200+10"), Some((3, Operator::Add)));
        assert_eq!(last_operator("2×3-4"), Some((4, Operator::Subtract)));
        assert_eq!(last_operator("-5"), Some((0, Operator::Subtract)));
        assert_eq!(last_operator("42"), None);
    }

    #[test]
    fn test_last_operator_multibyte() {
        // '×' is two bytes wide
        let (idx, op) = last_operator("6×50").unwrap();
        assert_eq!(op, Operator::Multiply);
        assert_eq!(&"6×50"[..idx], "6");
        assert_eq!(&"6×50"[idx + '×'.len_utf8()..], "50");
    }

    #[test]
    fn test_ends_with_operator() {
        assert!(ends_with_operator("5÷"));
        assert!(!ends_with_operator("5"));
        assert!(!ends_with_operator(""));
    }
}
