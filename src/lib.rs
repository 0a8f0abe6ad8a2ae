//! Calculator core for English, Nepali and Limbu digits.
//!
//! Keystrokes go into an [`buffer::ExpressionBuffer`] held in the active
//! script. On "=" (or a typed `%`) the input is transcoded to neutral digits,
//! evaluated, and the result converted back for display. Committed
//! calculations are written to a [`history::HistoryStore`].

pub mod buffer;
pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod numeral;
pub mod session;

pub use numeral::DigitScript;
pub use session::{Calculator, DisplayState};
