//! Classification of single keystrokes.

use crate::error::TokenError;
use crate::numeral::DigitScript;
use std::fmt;
use std::str::FromStr;

/// One of the four arithmetic operators a user can type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Accepts the ASCII spellings `*` and `/` as well as `×` and `÷`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' | '*' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// The glyph shown on the display.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A logical input unit fed to the expression buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A digit with its value, in whichever script it was typed.
    Digit(u32),
    DecimalPoint,
    Operator(Operator),
    Percent,
    /// "AC"
    ClearAll,
    /// "DEL": drops the first character of the input.
    DeleteFirst,
    /// "⌫": drops the last character of the input.
    Backspace,
    Equals,
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        match trimmed.to_uppercase().as_str() {
            "AC" => return Ok(Self::ClearAll),
            "DEL" => return Ok(Self::DeleteFirst),
            "⌫" | "BS" | "BACKSPACE" => return Ok(Self::Backspace),
            _ => {}
        }

        let mut chars = trimmed.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(TokenError::Unknown(s.to_string()));
        };

        if let Some((_, value)) = DigitScript::classify(c) {
            return Ok(Self::Digit(value));
        }

        match c {
            '.' => Ok(Self::DecimalPoint),
            '%' => Ok(Self::Percent),
            '=' => Ok(Self::Equals),
            _ => Operator::from_char(c)
                .map(Self::Operator)
                .ok_or_else(|| TokenError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!("AC".parse::<Token>().unwrap(), Token::ClearAll);
        assert_eq!("DEL".parse::<Token>().unwrap(), Token::DeleteFirst);
        assert_eq!("⌫".parse::<Token>().unwrap(), Token::Backspace);
        assert_eq!("bs".parse::<Token>().unwrap(), Token::Backspace);
        assert_eq!("=".parse::<Token>().unwrap(), Token::Equals);
        assert_eq!("%".parse::<Token>().unwrap(), Token::Percent);
    }

    #[test]
    fn test_digits_in_every_script() {
        assert_eq!("7".parse::<Token>().unwrap(), Token::Digit(7));
        assert_eq!("७".parse::<Token>().unwrap(), Token::Digit(7));
        assert_eq!("᥍".parse::<Token>().unwrap(), Token::Digit(7));
    }

    #[test]
    fn test_operator_aliases() {
        assert_eq!(
            "*".parse::<Token>().unwrap(),
            Token::Operator(Operator::Multiply)
        );
        assert_eq!(
            "÷".parse::<Token>().unwrap(),
            Token::Operator(Operator::Divide)
        );
    }

    #[test]
    fn test_unknown_tokens() {
        assert!("".parse::<Token>().is_err());
        assert!("12".parse::<Token>().is_err());
        assert!("x".parse::<Token>().is_err());
        assert!("(".parse::<Token>().is_err());
    }
}
