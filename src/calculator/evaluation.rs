//! Expression evaluation.
//!
//! Expressions are tokenized into numbers and operators and folded strictly
//! left to right: `2+3×4` is `(2+3)×4 = 20`. There are no parentheses and no
//! operator precedence. Input is neutral-digit text; callers transcode
//! before evaluating.

use super::detection::{has_percent, is_calculator_text, strip_trailing_operators};
use super::format::format_result;
use super::percentage::evaluate_percentage;
use super::token::Operator;
use crate::error::CalcError;
use tracing::debug;

/// The literal result token shown when evaluation fails.
pub const ERROR_TOKEN: &str = "Error";

/// Result of committing an expression with "=".
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The neutral expression that was evaluated.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Rounded and trimmed for display, neutral digits.
        display_result: String,
    },
    /// Nothing left to evaluate once dangling operators were removed.
    Empty,
    /// Evaluation failed; shown to the user as "Error".
    Error {
        /// The neutral expression that was evaluated.
        expression: String,
        error: CalcError,
    },
}

impl CalcResult {
    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string in neutral digits: the result, "0" or "Error".
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Empty => "0",
            Self::Error { .. } => ERROR_TOKEN,
        }
    }

    /// Only successful calculations are written to history.
    pub fn should_record(&self) -> bool {
        self.is_success()
    }
}

/// Evaluate a neutral expression the way "=" does.
///
/// Input containing `%` goes to the percentage evaluator; anything else has
/// its trailing operators removed and is evaluated left to right.
pub fn calculate(input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    let outcome = if has_percent(&expression) {
        evaluate_percentage(&expression)
    } else {
        let stripped = strip_trailing_operators(&expression);
        if stripped.is_empty() {
            debug!(input, "nothing to evaluate");
            return CalcResult::Empty;
        }
        evaluate(stripped)
    };

    match outcome {
        Ok(value) => CalcResult::Success {
            display_result: format_result(value),
            value,
            expression,
        },
        Err(error) => {
            debug!(input, %error, "evaluation failed");
            CalcResult::Error { expression, error }
        }
    }
}

/// An element of a tokenized expression.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Term {
    Number(f64),
    Op(Operator),
}

/// Split neutral text into numbers and operators.
///
/// A `+` or `-` at the start, or straight after another operator, is the sign
/// of the number that follows it.
fn tokenize(input: &str) -> Result<Vec<Term>, CalcError> {
    let malformed = || CalcError::MalformedExpression(input.to_string());

    if !is_calculator_text(input) || has_percent(input) {
        return Err(malformed());
    }

    let mut terms = Vec::new();
    let mut number = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        let op = Operator::from_char(c).ok_or_else(malformed)?;
        let expects_operand = number.is_empty();

        if expects_operand {
            let after_operator = matches!(terms.last(), None | Some(Term::Op(_)));
            if after_operator && matches!(op, Operator::Add | Operator::Subtract) {
                number.push(op.symbol());
                continue;
            }
            return Err(malformed());
        }

        terms.push(Term::Number(parse_number(&number).ok_or_else(malformed)?));
        number.clear();
        terms.push(Term::Op(op));
    }

    if number.is_empty() {
        return Err(malformed());
    }
    terms.push(Term::Number(parse_number(&number).ok_or_else(malformed)?));

    Ok(terms)
}

/// Parse a signed decimal number. Requires at least one digit.
fn parse_number(text: &str) -> Option<f64> {
    let digits = text.trim_start_matches(['+', '-']);
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Fold a tokenized expression left to right.
fn evaluate(input: &str) -> Result<f64, CalcError> {
    let terms = tokenize(input)?;
    let mut iter = terms.into_iter();

    let Some(Term::Number(mut acc)) = iter.next() else {
        return Err(CalcError::MalformedExpression(input.to_string()));
    };

    while let Some(term) = iter.next() {
        let (Term::Op(op), Some(Term::Number(rhs))) = (term, iter.next()) else {
            return Err(CalcError::MalformedExpression(input.to_string()));
        };

        if op == Operator::Divide && rhs == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        acc = op.apply(acc, rhs);
    }

    if !acc.is_finite() {
        return Err(CalcError::Overflow);
    }

    debug!(input, value = acc, "evaluated");
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(input: &str) -> String {
        calculate(input).display().to_string()
    }

    #[test]
    fn test_basic_evaluation() {
        let result = calculate("2+3");
        assert!(result.is_success());
        assert_eq!(result.display(), "5");
        assert_eq!(display("10-4"), "6");
        assert_eq!(display("6×7"), "42");
        assert_eq!(display("6*7"), "42");
        assert_eq!(display("7÷2"), "3.5");
        assert_eq!(display("7/2"), "3.5");
    }

    #[test]
    fn test_left_to_right() {
        assert_eq!(display("2+3×4"), "20");
        assert_eq!(display("10-2÷4"), "2");
    }

    #[test]
    fn test_division_by_zero() {
        let result = calculate("2÷0");
        assert!(!result.is_success());
        assert_eq!(result.display(), "Error");
        assert!(matches!(
            result,
            CalcResult::Error {
                error: CalcError::DivisionByZero,
                ..
            }
        ));
        assert_eq!(display("5÷0.0"), "Error");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(display("10%"), "0.1");
        assert_eq!(display("200+10%"), "220");
        assert_eq!(display("200-10%"), "180");
        assert_eq!(display("200×10%"), "20");
        assert_eq!(display("200÷0%"), "Error");
    }

    #[test]
    fn test_huge_percentage_is_error() {
        let result = calculate(&("9".repeat(400) + "%"));
        assert_eq!(result.display(), ERROR_TOKEN);
        assert!(!result.should_record());
        assert_eq!(display("nan%"), ERROR_TOKEN);
    }

    #[test]
    fn test_trailing_operators_removed() {
        assert_eq!(display("5+"), "5");
        assert_eq!(display("5+×"), "5");
        assert_eq!(calculate("+"), CalcResult::Empty);
        assert_eq!(calculate(""), CalcResult::Empty);
        assert_eq!(display(""), "0");
    }

    #[test]
    fn test_signed_numbers() {
        assert_eq!(display("-5+3"), "-2");
        assert_eq!(display("5×-3"), "-15");
        assert_eq!(display("-5-3"), "-8");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(display("0.1+0.2"), "0.3");
        assert_eq!(display(".5+.5"), "1");
        assert_eq!(display("1÷3"), "0.33");
    }

    #[test]
    fn test_malformed_expressions() {
        for input in ["1.2.3+1", "5%3", "2++-3", "×5", ".", "2+.", "5-×3"] {
            let result = calculate(input);
            assert_eq!(result.display(), "Error", "input {input:?}");
            assert!(!result.should_record());
        }
    }

    #[test]
    fn test_success_keeps_expression() {
        match calculate("12×3") {
            CalcResult::Success {
                expression,
                value,
                display_result,
            } => {
                assert_eq!(expression, "12×3");
                assert_eq!(value, 36.0);
                assert_eq!(display_result, "36");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
