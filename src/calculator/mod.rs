//! Calculator module for evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Classify keystrokes into tokens
//! - Decide which evaluation path an expression takes
//! - Evaluate percentage expressions and plain left-to-right arithmetic
//! - Format results for display

mod detection;
mod evaluation;
mod format;
mod percentage;
mod token;

pub use detection::{ends_with_operator, strip_trailing_operators};
pub use evaluation::{CalcResult, ERROR_TOKEN, calculate};
pub use format::format_result;
pub use percentage::evaluate_percentage;
pub use token::{Operator, Token};
