//! Digit transcoding between the supported numeral scripts.
//!
//! Every script maps the neutral digits `0`-`9` onto its own ten glyphs.
//! Anything that is not a digit (operators, the decimal point, separators,
//! the literal "Error") passes through untouched, so a whole expression or
//! timestamp can be converted in one call.

use crate::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ENGLISH_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const NEPALI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];
const LIMBU_DIGITS: [char; 10] = ['᥆', '᥇', '᥈', '᥉', '᥊', '᥋', '᥌', '᥍', '᥎', '᥏'];

/// A numeral script the calculator can display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitScript {
    /// Western-Arabic digits. This is also the neutral form used for evaluation.
    English,
    /// Devanagari digits.
    Nepali,
    /// Limbu digits.
    #[default]
    Limbu,
}

impl DigitScript {
    pub const ALL: [DigitScript; 3] = [Self::English, Self::Nepali, Self::Limbu];

    /// The ten glyphs of this script, indexed by digit value.
    pub fn digits(self) -> &'static [char; 10] {
        match self {
            Self::English => &ENGLISH_DIGITS,
            Self::Nepali => &NEPALI_DIGITS,
            Self::Limbu => &LIMBU_DIGITS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Nepali => "nepali",
            Self::Limbu => "limbu",
        }
    }

    /// Value of `c` if it is one of this script's digits.
    pub fn digit_value(self, c: char) -> Option<u32> {
        self.digits()
            .iter()
            .position(|&d| d == c)
            .map(|idx| idx as u32)
    }

    /// Glyph for a digit value in `0..=9`.
    pub fn glyph(self, value: u32) -> Option<char> {
        self.digits().get(value as usize).copied()
    }

    /// Find which script a digit character belongs to, and its value.
    pub fn classify(c: char) -> Option<(DigitScript, u32)> {
        Self::ALL
            .iter()
            .find_map(|&script| script.digit_value(c).map(|value| (script, value)))
    }
}

impl fmt::Display for DigitScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigitScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "eng" | "en" => Ok(Self::English),
            "nepali" | "nep" | "ne" => Ok(Self::Nepali),
            "limbu" | "lim" => Ok(Self::Limbu),
            _ => Err(ScriptError::Unknown(s.to_string())),
        }
    }
}

/// Replace every digit of `script` in `text` with its neutral digit.
pub fn to_neutral(text: &str, script: DigitScript) -> String {
    if script == DigitScript::English {
        return text.to_string();
    }

    text.chars()
        .map(|c| {
            script
                .digit_value(c)
                .and_then(|value| char::from_digit(value, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Replace every ASCII digit in `text` with the matching glyph of `script`.
pub fn from_neutral(text: &str, script: DigitScript) -> String {
    if script == DigitScript::English {
        return text.to_string();
    }

    text.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|value| script.glyph(value))
                .unwrap_or(c)
        })
        .collect()
}

/// Re-render `text` from one script into another through the neutral form.
pub fn convert(text: &str, from: DigitScript, to: DigitScript) -> String {
    if from == to {
        return text.to_string();
    }
    from_neutral(&to_neutral(text, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PUNCTUATION: [char; 8] = ['+', '-', '×', '÷', '%', '.', ' ', '|'];

    fn script_text(script: DigitScript) -> impl Strategy<Value = String> {
        let mut alphabet: Vec<char> = script.digits().to_vec();
        alphabet.extend_from_slice(&PUNCTUATION);
        prop::collection::vec(prop::sample::select(alphabet), 0..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    fn any_script() -> impl Strategy<Value = DigitScript> {
        prop::sample::select(DigitScript::ALL.to_vec())
    }

    #[test]
    fn test_to_neutral() {
        assert_eq!(to_neutral("१२+३", DigitScript::Nepali), "12+3");
        assert_eq!(to_neutral("᥇᥆%", DigitScript::Limbu), "10%");
        assert_eq!(to_neutral("7÷2", DigitScript::English), "7÷2");
    }

    #[test]
    fn test_from_neutral() {
        assert_eq!(from_neutral("2024-01-05 | 09:30:00", DigitScript::Nepali), "२०२४-०१-०५ | ०९:३०:००");
        assert_eq!(from_neutral("5.5", DigitScript::Limbu), "᥋.᥋");
        assert_eq!(from_neutral("Error", DigitScript::Limbu), "Error");
    }

    #[test]
    fn test_foreign_digits_pass_through() {
        // Nepali digits are not Limbu digits
        assert_eq!(to_neutral("१", DigitScript::Limbu), "१");
    }

    #[test]
    fn test_classify() {
        assert_eq!(DigitScript::classify('७'), Some((DigitScript::Nepali, 7)));
        assert_eq!(DigitScript::classify('᥏'), Some((DigitScript::Limbu, 9)));
        assert_eq!(DigitScript::classify('3'), Some((DigitScript::English, 3)));
        assert_eq!(DigitScript::classify('+'), None);
    }

    #[test]
    fn test_parse_script() {
        assert_eq!("Nepali".parse::<DigitScript>().unwrap(), DigitScript::Nepali);
        assert_eq!("lim".parse::<DigitScript>().unwrap(), DigitScript::Limbu);
        assert!("klingon".parse::<DigitScript>().is_err());
    }

    proptest! {
        #[test]
        fn round_trip_through_neutral(
            (script, text) in any_script().prop_flat_map(|s| (Just(s), script_text(s)))
        ) {
            prop_assert_eq!(from_neutral(&to_neutral(&text, script), script), text);
        }

        #[test]
        fn convert_there_and_back(
            (from, to, text) in (any_script(), any_script())
                .prop_flat_map(|(a, b)| (Just(a), Just(b), script_text(a)))
        ) {
            let there = convert(&text, from, to);
            prop_assert_eq!(convert(&there, to, from), text);
        }

        #[test]
        fn convert_to_same_script_is_identity(
            (script, text) in any_script().prop_flat_map(|s| (Just(s), script_text(s)))
        ) {
            prop_assert_eq!(convert(&text, script, script), text);
        }
    }
}
