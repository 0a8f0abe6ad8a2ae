//! A single stored calculation.

use crate::numeral::{DigitScript, from_neutral};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Layout of every stored timestamp, before digit substitution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d | %H:%M:%S";

/// The insertion time, rendered once per script when the record is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Timestamps {
    pub english: String,
    pub nepali: String,
    pub limbu: String,
}

impl Timestamps {
    pub fn render(at: NaiveDateTime) -> Self {
        let english = at.format(TIMESTAMP_FORMAT).to_string();
        Self {
            nepali: from_neutral(&english, DigitScript::Nepali),
            limbu: from_neutral(&english, DigitScript::Limbu),
            english,
        }
    }

    pub fn get(&self, script: DigitScript) -> &str {
        match script {
            DigitScript::English => &self.english,
            DigitScript::Nepali => &self.nepali,
            DigitScript::Limbu => &self.limbu,
        }
    }
}

/// A calculation in the history log. Records are never edited, only deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub id: i64,
    /// The expression as typed, with its digits in neutral form.
    pub expression: String,
    /// The result, neutral digits.
    pub result: String,
    pub timestamps: Timestamps,
}

impl HistoryRecord {
    pub fn expression_in(&self, script: DigitScript) -> String {
        from_neutral(&self.expression, script)
    }

    pub fn result_in(&self, script: DigitScript) -> String {
        from_neutral(&self.result, script)
    }

    pub fn timestamp_in(&self, script: DigitScript) -> &str {
        self.timestamps.get(script)
    }
}
