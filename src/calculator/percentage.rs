//! Percentage evaluation.
//!
//! A `%` typed at the end of the input turns the expression into one of two
//! forms:
//!
//! - `v%` is `v / 100`.
//! - `left <op> right%` treats `right` as a percentage relative to the
//!   operator: `200+10%` is 220, `200-10%` is 180, `200×10%` is 20 and
//!   `200÷10%` is 2000.
//!
//! The split point is the rightmost operator in the text, whatever it is.

use super::detection::{is_calculator_text, last_operator, percent_operand};
use super::token::Operator;
use crate::error::CalcError;
use tracing::debug;

/// Evaluate a neutral-digit expression ending in a single `%`.
pub fn evaluate_percentage(input: &str) -> Result<f64, CalcError> {
    if !is_calculator_text(input) {
        return Err(CalcError::MalformedExpression(input.to_string()));
    }
    let operand = percent_operand(input)
        .ok_or_else(|| CalcError::MalformedExpression(input.to_string()))?;

    let value = match operand.parse::<f64>() {
        // Plain "v%" (a leading sign is part of the number)
        Ok(value) => value / 100.0,
        Err(_) if operand.is_empty() => 0.0,
        Err(_) => relative_percentage(operand, input)?,
    };

    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }

    debug!(input, value, "percentage");
    Ok(value)
}

/// `left <op> right%`, split at the rightmost operator.
fn relative_percentage(operand: &str, input: &str) -> Result<f64, CalcError> {
    let (idx, op) = last_operator(operand)
        .ok_or_else(|| CalcError::MalformedExpression(input.to_string()))?;
    let op_len = operand[idx..].chars().next().map_or(1, char::len_utf8);

    let left = parse_operand(&operand[..idx], input)?;
    let right = parse_operand(&operand[idx + op_len..], input)?;
    let right_pct = right / 100.0;

    debug!(input, %op, left, right, "relative percentage");
    match op {
        Operator::Add => Ok(left + left * right_pct),
        Operator::Subtract => Ok(left - left * right_pct),
        Operator::Multiply => Ok(left * right_pct),
        Operator::Divide if right_pct == 0.0 => Err(CalcError::DivisionByZero),
        Operator::Divide => Ok(left / right_pct),
    }
}

/// Parse one side of a relative percentage. A missing side counts as zero.
fn parse_operand(text: &str, input: &str) -> Result<f64, CalcError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse::<f64>()
        .map_err(|_| CalcError::MalformedExpression(input.to_string()))
}
