//! The calculator as seen by a presentation layer.
//!
//! [`Calculator`] ties the expression buffer to the history store. Every
//! call runs to completion on the caller's thread; there is no background
//! work and nothing to cancel.

use crate::buffer::{BufferState, ExpressionBuffer};
use crate::calculator::Token;
use crate::config::Config;
use crate::error::{StorageError, TokenError};
use crate::history::{
    DeleteOutcome, HistoryCursor, HistoryPage, HistoryStore, PAGE_SIZE, PendingDelete,
};
use crate::numeral::DigitScript;
use serde::Serialize;
use tracing::{debug, warn};

/// What the display should show after an action, in the active script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub input: String,
    pub result: String,
}

pub struct Calculator {
    buffer: ExpressionBuffer,
    history: Option<HistoryStore>,
    cursor: HistoryCursor,
}

impl Calculator {
    /// Create a calculator. Without a store, calculations still work but
    /// nothing is recorded.
    pub fn new(script: DigitScript, history: Option<HistoryStore>) -> Self {
        Self {
            buffer: ExpressionBuffer::new(script),
            history,
            cursor: HistoryCursor::new(),
        }
    }

    /// Create a calculator from configuration, opening its history database.
    ///
    /// A database that cannot be opened is logged and the calculator runs
    /// without history.
    pub fn from_config(config: &Config) -> Self {
        let path = config.database_path();
        let history = match HistoryStore::open(&path) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "History unavailable");
                None
            }
        };
        Self::new(config.script, history)
    }

    pub fn display(&self) -> DisplayState {
        DisplayState {
            input: self.buffer.input().to_string(),
            result: self.buffer.result().to_string(),
        }
    }

    pub fn state(&self) -> BufferState {
        self.buffer.state()
    }

    pub fn active_script(&self) -> DigitScript {
        self.buffer.script()
    }

    /// Feed one logical input unit, e.g. `"7"`, `"×"`, `"%"`, `"AC"`, `"="`.
    pub fn on_token(&mut self, token: &str) -> Result<DisplayState, TokenError> {
        let token: Token = token.parse()?;
        Ok(self.press(token))
    }

    /// Feed a typed word such as `"AC"` or `"200"`. A word that is not a
    /// single token is split into one token per character. Nothing is applied
    /// unless every character is a valid token.
    pub fn on_word(&mut self, word: &str) -> Result<DisplayState, TokenError> {
        let tokens = match word.parse::<Token>() {
            Ok(token) => vec![token],
            Err(_) => word
                .chars()
                .map(|c| c.to_string().parse::<Token>())
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut display = self.display();
        for token in tokens {
            display = self.press(token);
        }
        Ok(display)
    }

    pub fn press(&mut self, token: Token) -> DisplayState {
        if let Some(commit) = self.buffer.press(token)
            && let Some(store) = &self.history
        {
            store.append(&commit.expression, &commit.result, commit.script);
        }
        self.display()
    }

    /// Switch the display to another script, converting what is shown.
    pub fn set_active_script(&mut self, script: DigitScript) -> DisplayState {
        self.buffer.set_script(script);
        self.display()
    }

    fn store(&self) -> Result<&HistoryStore, StorageError> {
        self.history.as_ref().ok_or(StorageError::NotOpen)
    }

    /// One page of history starting `offset` records from the newest.
    pub fn history_page(&self, offset: usize) -> Result<HistoryPage, StorageError> {
        self.store()?.page(offset, PAGE_SIZE)
    }

    /// Enter the history view: back to the first page.
    pub fn open_history(&mut self) -> Result<HistoryPage, StorageError> {
        self.cursor.reset();
        let page = self.history_page(0)?;
        self.cursor.observe(&page);
        Ok(page)
    }

    /// The next page of the history view, or `None` when there is none.
    pub fn load_more(&mut self) -> Result<Option<HistoryPage>, StorageError> {
        if !self.cursor.advance() {
            return Ok(None);
        }
        let page = self.history_page(self.cursor.offset())?;
        self.cursor.observe(&page);
        Ok(Some(page))
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    /// First phase of a delete. Nothing is changed until the returned request
    /// is passed to [`Calculator::confirm_delete`].
    pub fn history_delete(&self, id: i64) -> PendingDelete {
        debug!(id, "delete requested");
        PendingDelete::new(id)
    }

    /// Second phase of a delete: actually remove the record.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> Result<DeleteOutcome, StorageError> {
        let outcome = self.store()?.delete(pending.id())?;
        self.cursor.reset();
        Ok(outcome)
    }
}
