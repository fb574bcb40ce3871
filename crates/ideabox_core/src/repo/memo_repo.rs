//! Daily memo mini-repository.
//!
//! # Responsibility
//! - Persist one free-text memo per calendar date under its own key.
//! - List memos newest date first.
//!
//! # Invariants
//! - Keys are `daily-memo-YYYY-MM-DD`; nothing else is read or written.
//! - Saving a blank memo removes the entry instead of storing empty text.
//! - Independent of the idea collection; no shared read-modify-write.

use crate::clock::Clock;
use crate::model::memo::{memo_key, parse_memo_date, parse_memo_key, DailyMemo, DAILY_MEMO_KEY_PREFIX};
use crate::repo::idea_repo::RepoResult;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;
use log::{info, warn};

pub struct DailyMemoRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DailyMemoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the memo stored for `date`, if any.
    pub fn get(&self, date: NaiveDate) -> RepoResult<Option<DailyMemo>> {
        let memo = self
            .store
            .get(&memo_key(date))?
            .filter(|text| !text.is_empty())
            .map(|text| DailyMemo::new(date, text));
        Ok(memo)
    }

    /// Returns the stored memo for `date`, or an empty draft to edit.
    pub fn entry_for(&self, date: NaiveDate) -> RepoResult<DailyMemo> {
        Ok(self
            .get(date)?
            .unwrap_or_else(|| DailyMemo::new(date, String::new())))
    }

    /// [`Self::entry_for`] the clock's current calendar date.
    pub fn entry_for_today(&self, clock: &dyn Clock) -> RepoResult<DailyMemo> {
        self.entry_for(clock.today())
    }

    /// Stores `memo` for `date`. Blank text deletes the entry and yields `None`.
    pub fn save(&mut self, date: NaiveDate, memo: &str) -> RepoResult<Option<DailyMemo>> {
        let entry = DailyMemo::new(date, memo);
        if entry.is_blank() {
            self.delete(date)?;
            return Ok(None);
        }

        self.store.set(&memo_key(date), &entry.memo)?;
        info!("event=memo_save module=memo_repo status=ok date={date}");
        Ok(Some(entry))
    }

    /// Like [`Self::save`], with the date given as `YYYY-MM-DD` text.
    pub fn save_for_date_str(&mut self, date: &str, memo: &str) -> RepoResult<Option<DailyMemo>> {
        let date = parse_memo_date(date)?;
        self.save(date, memo)
    }

    /// Removes the memo for `date`; absent entries are a no-op.
    pub fn delete(&mut self, date: NaiveDate) -> RepoResult<()> {
        self.store.remove(&memo_key(date))?;
        info!("event=memo_delete module=memo_repo status=ok date={date}");
        Ok(())
    }

    /// All stored memos, newest date first.
    pub fn list(&self) -> RepoResult<Vec<DailyMemo>> {
        let mut memos = Vec::new();
        for key in self.store.keys_with_prefix(DAILY_MEMO_KEY_PREFIX)? {
            let Some(date) = parse_memo_key(&key) else {
                warn!("event=memo_list module=memo_repo status=skip reason=malformed_key");
                continue;
            };
            if let Some(memo) = self.get(date)? {
                memos.push(memo);
            }
        }
        memos.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(memos)
    }
}
