//! Daily memo domain model.
//!
//! # Invariants
//! - Exactly one memo per calendar date; the date is the identity.
//! - A blank memo is never stored; saving one removes the entry.

use crate::model::idea::ValidationError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Key namespace shared by every persisted memo.
pub const DAILY_MEMO_KEY_PREFIX: &str = "daily-memo-";

const MEMO_DATE_FORMAT: &str = "%Y-%m-%d";

static MEMO_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^daily-memo-(\d{4}-\d{2}-\d{2})$").expect("valid memo key regex")
});

/// Free-text journal entry for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMemo {
    pub date: NaiveDate,
    pub memo: String,
}

impl DailyMemo {
    pub fn new(date: NaiveDate, memo: impl Into<String>) -> Self {
        Self {
            date,
            memo: memo.into(),
        }
    }

    /// Whether saving this memo means deleting the entry.
    pub fn is_blank(&self) -> bool {
        self.memo.trim().is_empty()
    }
}

/// Storage key for the memo of `date`, e.g. `daily-memo-2024-03-01`.
pub fn memo_key(date: NaiveDate) -> String {
    format!("{DAILY_MEMO_KEY_PREFIX}{}", date.format(MEMO_DATE_FORMAT))
}

/// Extracts the date from a memo storage key.
///
/// Returns `None` for keys outside the memo namespace or with an invalid date.
pub fn parse_memo_key(key: &str) -> Option<NaiveDate> {
    let caps = MEMO_KEY_RE.captures(key)?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), MEMO_DATE_FORMAT).ok()
}

/// Parses an ISO `YYYY-MM-DD` date supplied by a caller.
pub fn parse_memo_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), MEMO_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidMemoDate(value.to_string()))
}
