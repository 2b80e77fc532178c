//! The workout store.
//!
//! Owns the current user's workouts for the length of a session. Every
//! successful mutation writes the full list back to durable storage under
//! the `workouts` key. Persistence is best-effort: a failed write is logged
//! and recorded in [`SyncState`], and the in-memory list stays authoritative.
//!
//! Stored data the store cannot understand is never silently replaced:
//! - entries that do not parse as a workout are written back untouched
//! - a value that is not a JSON array is copied to `workouts.corrupt` first
//! - if the value could not be read at all, nothing is written

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::FitError;
use crate::storage::{KeyValueStore, WORKOUTS_BACKUP_KEY, WORKOUTS_KEY};

use super::seed::seed_workouts;
use super::types::{format_timestamp, sort_newest_first, NewWorkout, WorkoutPatch, WorkoutRecord};

/// Outcome of the most recent load or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Durable storage matches memory.
    Synced,
    /// The last load or save failed; memory is ahead of (or apart from) storage.
    Unsynced {
        /// Why the storage operation failed.
        reason: String,
    },
}

impl SyncState {
    /// Whether storage matches memory.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// Single source of truth for one user's workouts.
pub struct WorkoutStore<S: KeyValueStore> {
    storage: S,
    records: Vec<WorkoutRecord>,
    sync: SyncState,
    /// Stored entries that are not valid workouts, kept for write-back.
    unreadable: Vec<Value>,
    /// Unparseable stored value, copied to the backup key on the next save.
    corrupt: Option<String>,
    /// Set when the stored value could not be read; blocks all writes.
    read_error: Option<String>,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    /// Load persisted workouts, seeding example data on first run.
    #[must_use]
    pub fn open(storage: S, now: DateTime<Utc>) -> Self {
        Self::open_with(storage, now, true)
    }

    /// Load persisted workouts; when nothing is stored, seed only if `seed` is set.
    ///
    /// Unreadable or corrupt data never aborts the load. Entries that are not
    /// valid workouts are skipped and kept for write-back. A value that is not
    /// a JSON array, or a failed read, leaves the store empty and
    /// [`SyncState::Unsynced`].
    #[must_use]
    pub fn open_with(storage: S, now: DateTime<Utc>, seed: bool) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
            sync: SyncState::Synced,
            unreadable: Vec::new(),
            corrupt: None,
            read_error: None,
        };

        match store.storage.get(WORKOUTS_KEY) {
            Ok(Some(raw)) => store.load(raw),
            Ok(None) if seed => {
                store.records = seed_workouts(now);
                tracing::info!(count = store.records.len(), "seeded example workouts");
                store.persist();
            }
            Ok(None) => {}
            Err(e) => {
                let reason = e.to_string();
                store.read_error = Some(reason.clone());
                store.mark_unsynced(reason);
            }
        }

        store
    }

    fn load(&mut self, raw: String) {
        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                self.corrupt = Some(raw);
                self.mark_unsynced(format!(
                    "Stored workouts are unreadable ({e}); they will be kept under '{WORKOUTS_BACKUP_KEY}'"
                ));
                return;
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<WorkoutRecord>(entry.clone()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable stored workout");
                    self.unreadable.push(entry);
                }
            }
        }

        self.records = dedupe_ids(records);
        tracing::debug!(count = self.records.len(), "loaded workouts");

        if !self.unreadable.is_empty() {
            self.mark_unsynced(format!(
                "{} stored workout(s) could not be read and are kept unchanged",
                self.unreadable.len()
            ));
        }
    }

    /// All workouts, in insertion order.
    #[must_use]
    pub fn list(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// Look up a workout by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Stored entries that could not be read as workouts.
    ///
    /// They are not part of [`list`](Self::list) but are written back on save.
    #[must_use]
    pub fn unreadable(&self) -> &[Value] {
        &self.unreadable
    }

    /// Number of workouts held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no workouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new workout and persist.
    ///
    /// The id is derived from `now`; the date defaults to `now` when absent.
    pub fn add(&mut self, workout: NewWorkout, now: DateTime<Utc>) -> WorkoutRecord {
        let record = WorkoutRecord {
            id: self.next_id(now),
            kind: workout.kind,
            description: workout.description,
            duration_minutes: workout.duration_minutes,
            calories: workout.calories,
            date: format_timestamp(workout.date.unwrap_or(now)),
        };

        tracing::info!(id = %record.id, kind = %record.kind, "added workout");
        self.records.push(record.clone());
        self.persist();
        record
    }

    /// Merge `patch` into the workout with `id` and persist.
    ///
    /// # Errors
    ///
    /// Returns `FitError::NotFound` if no workout has that id.
    pub fn update(&mut self, id: &str, patch: &WorkoutPatch) -> Result<WorkoutRecord, FitError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;

        patch.apply(record);
        let updated = record.clone();

        tracing::info!(id, "updated workout");
        self.persist();
        Ok(updated)
    }

    /// Remove the workout with `id` and persist. Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns `FitError::NotFound` if no workout has that id.
    pub fn delete(&mut self, id: &str) -> Result<WorkoutRecord, FitError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = self.records.remove(index);

        tracing::info!(id, "deleted workout");
        self.persist();
        Ok(removed)
    }

    /// Workouts whose type or description contains `term`, newest first.
    ///
    /// Workouts without a readable date sort last.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&WorkoutRecord> {
        let mut found: Vec<_> = self.records.iter().filter(|r| r.matches(term)).collect();
        sort_newest_first(&mut found);
        found
    }

    /// The `limit` most recent workouts, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&WorkoutRecord> {
        let mut all: Vec<_> = self.records.iter().collect();
        sort_newest_first(&mut all);
        all.truncate(limit);
        all
    }

    /// Write the full list to storage now.
    ///
    /// Entries that could not be read on load are appended unchanged. A
    /// stored value that was not a JSON array is first copied to
    /// `workouts.corrupt`.
    ///
    /// # Errors
    ///
    /// Returns `FitError::Persistence` (or the backend's error) if the write
    /// fails, or if the stored value could not be read when the store opened.
    /// The in-memory list is unaffected either way.
    pub fn save(&mut self) -> Result<(), FitError> {
        let result = self.write_through();

        match &result {
            Ok(()) => {
                tracing::debug!(count = self.records.len(), "saved workouts");
                self.sync = SyncState::Synced;
            }
            Err(e) => self.mark_unsynced(e.to_string()),
        }
        result
    }

    /// Outcome of the last load or save.
    #[must_use]
    pub const fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    /// Give back the storage backend, discarding the in-memory list.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn write_through(&mut self) -> Result<(), FitError> {
        if let Some(reason) = &self.read_error {
            return Err(FitError::Persistence(format!(
                "not overwriting stored workouts that could not be read ({reason})"
            )));
        }

        if let Some(raw) = &self.corrupt {
            self.storage.set(WORKOUTS_BACKUP_KEY, raw)?;
            tracing::warn!(key = WORKOUTS_BACKUP_KEY, "backed up unreadable workouts");
        }

        let mut entries = self
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        entries.extend(self.unreadable.iter().cloned());

        let json = serde_json::to_string(&entries)?;
        self.storage.set(WORKOUTS_KEY, &json)?;
        self.corrupt = None;
        Ok(())
    }

    /// Best-effort save after a mutation.
    fn persist(&mut self) {
        // Failures are already recorded in `self.sync` by `save`.
        let _ = self.save();
    }

    fn mark_unsynced(&mut self, reason: String) {
        tracing::warn!(%reason, "workout storage is out of sync");
        self.sync = SyncState::Unsynced { reason };
    }

    /// `workout-<millis>`, bumped until it does not collide with any stored id.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = format!("workout-{millis}");
            let taken = self.get(&candidate).is_some()
                || self
                    .unreadable
                    .iter()
                    .any(|entry| entry.get("id").and_then(Value::as_str) == Some(candidate.as_str()));
            if !taken {
                return candidate;
            }
            millis += 1;
        }
    }
}

fn not_found(id: &str) -> FitError {
    FitError::NotFound(format!("Workout '{id}'"))
}

/// Drop later records that reuse an earlier id.
fn dedupe_ids(records: Vec<WorkoutRecord>) -> Vec<WorkoutRecord> {
    let mut seen = HashSet::new();
    let before = records.len();
    let unique: Vec<_> = records
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();

    if unique.len() != before {
        tracing::warn!(dropped = before - unique.len(), "dropped workouts with duplicate ids");
    }
    unique
}
