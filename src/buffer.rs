//! The in-progress input and the last result, as shown on the display.
//!
//! Both strings are held in the active script. They are transcoded to
//! neutral digits only at evaluation time and converted wholesale when the
//! active script changes.

use crate::calculator::{
    ERROR_TOKEN, Operator, Token, calculate, ends_with_operator, evaluate_percentage,
    format_result,
};
use crate::numeral::{DigitScript, convert, from_neutral, to_neutral};
use tracing::debug;

/// Coarse state of the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferState {
    /// No input and nothing but "0" on the result line.
    Empty,
    /// The user is typing an expression.
    Accumulating,
    /// No input; the result line holds the last answer (or "Error").
    ShowingResult,
}

/// A finished calculation that should be written to history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// The expression exactly as it was on the display.
    pub expression: String,
    /// The displayed result.
    pub result: String,
    /// Script both strings are written in.
    pub script: DigitScript,
}

#[derive(Clone, Debug)]
pub struct ExpressionBuffer {
    input: String,
    result: String,
    script: DigitScript,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new(DigitScript::default())
    }
}

impl ExpressionBuffer {
    pub fn new(script: DigitScript) -> Self {
        Self {
            input: String::new(),
            result: from_neutral("0", script),
            script,
        }
    }

    /// Current input, in the active script.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current result line, in the active script.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn script(&self) -> DigitScript {
        self.script
    }

    pub fn state(&self) -> BufferState {
        if !self.input.is_empty() {
            BufferState::Accumulating
        } else if to_neutral(&self.result, self.script) == "0" {
            BufferState::Empty
        } else {
            BufferState::ShowingResult
        }
    }

    /// Check if the last thing typed was an operator.
    pub fn last_was_operator(&self) -> bool {
        ends_with_operator(&self.input)
    }

    /// Apply one token. Returns the calculation to record, if any.
    pub fn press(&mut self, token: Token) -> Option<Commit> {
        debug!(?token, input = %self.input, "token");

        match token {
            Token::Digit(value) => {
                if let Some(glyph) = self.script.glyph(value) {
                    self.input.push(glyph);
                }
                None
            }
            Token::DecimalPoint => {
                self.input.push('.');
                None
            }
            Token::Operator(op) => {
                self.push_operator(op);
                None
            }
            Token::Percent => {
                self.input.push('%');
                self.preview_percentage();
                None
            }
            Token::ClearAll => {
                self.clear_all();
                None
            }
            Token::DeleteFirst => {
                if !self.input.is_empty() {
                    self.input.remove(0);
                }
                None
            }
            Token::Backspace => {
                self.input.pop();
                None
            }
            Token::Equals => self.commit(),
        }
    }

    /// Re-render input and result in another script.
    pub fn set_script(&mut self, script: DigitScript) {
        if script == self.script {
            return;
        }

        self.input = convert(&self.input, self.script, script);
        self.result = convert(&self.result, self.script, script);
        debug!(from = %self.script, to = %script, "script switched");
        self.script = script;
    }

    fn clear_all(&mut self) {
        self.input.clear();
        self.result = from_neutral("0", self.script);
    }

    /// The prior result can seed a new calculation unless it is "0" or "Error".
    fn has_chainable_result(&self) -> bool {
        let neutral = to_neutral(&self.result, self.script);
        !neutral.is_empty() && neutral != "0" && neutral != ERROR_TOKEN
    }

    fn push_operator(&mut self, op: Operator) {
        if self.input.is_empty() {
            if self.has_chainable_result() {
                self.input = format!("{}{op}", self.result);
            }
            return;
        }

        if self.last_was_operator() {
            self.input.pop();
        }
        self.input.push(op.symbol());
    }

    /// Live evaluation when `%` is typed. Never records and never shows "Error".
    fn preview_percentage(&mut self) {
        let neutral = to_neutral(&self.input, self.script);

        match evaluate_percentage(&neutral) {
            Ok(value) => {
                self.result = from_neutral(&format_result(value), self.script);
                self.input.clear();
            }
            Err(error) => {
                debug!(input = %neutral, %error, "percentage preview failed");
                self.result = from_neutral("0", self.script);
            }
        }
    }

    fn commit(&mut self) -> Option<Commit> {
        if self.input.is_empty() {
            self.result = from_neutral("0", self.script);
            return None;
        }

        let typed = std::mem::take(&mut self.input);
        let outcome = calculate(&to_neutral(&typed, self.script));
        self.result = from_neutral(outcome.display(), self.script);

        outcome.should_record().then(|| Commit {
            expression: typed,
            result: self.result.clone(),
            script: self.script,
        })
    }
}
