use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::sentiment::SentimentScorer;
use crate::types::{EntryUpdate, JournalEntry, NewEntry};

pub const MIN_MOOD: i64 = 1;
pub const MAX_MOOD: i64 = 5;

const SELECT_COLUMNS: &str = "id, date, content, mood, mood_factors, sentiment, \
                              entry_type, ai_insight, weather_data";

/// CRUD over the `entries` table. Owns the process's single connection;
/// the schema is expected to be in place already (see [`super::Store::open`]).
///
/// Not safe for concurrent writers: no statement spans more than one
/// write and nothing serialises callers.
pub struct EntryStore {
    conn: Connection,
    scorer: Box<dyn SentimentScorer>,
}

impl EntryStore {
    pub fn new(conn: Connection, scorer: Box<dyn SentimentScorer>) -> Self {
        Self { conn, scorer }
    }

    /// Insert a new entry and return its id. Sentiment and date are derived
    /// here, never taken from the caller.
    pub fn add_entry(&self, entry: &NewEntry) -> Result<i64, StoreError> {
        validate(&entry.content, entry.mood)?;
        if entry.entry_type.trim().is_empty() {
            return Err(StoreError::InvalidInput("entry_type is empty".into()));
        }

        let sentiment = self.scorer.polarity(&entry.content);
        let weather = entry
            .weather
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            "INSERT INTO entries \
             (date, content, mood, mood_factors, sentiment, entry_type, ai_insight, weather_data) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                now_timestamp(),
                entry.content,
                entry.mood,
                entry.mood_factors,
                sentiment,
                entry.entry_type,
                entry.ai_insight,
                weather,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(log_added(id, self.count_entries()))
    }

    /// Rewrite the mutable fields of entry `id`, re-deriving sentiment from
    /// the new content. `date` is left as created.
    pub fn update_entry(&self, id: i64, update: &EntryUpdate) -> Result<(), StoreError> {
        validate(&update.content, update.mood)?;

        let sentiment = self.scorer.polarity(&update.content);
        let changed = self.conn.execute(
            "UPDATE entries \
             SET content = ?1, mood = ?2, mood_factors = ?3, sentiment = ?4, ai_insight = ?5 \
             WHERE id = ?6",
            params![
                update.content,
                update.mood,
                update.mood_factors,
                sentiment,
                update.ai_insight,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(id, "entry updated");
        Ok(())
    }

    pub fn delete_entry(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(id, "entry deleted");
        Ok(())
    }

    /// Newest entries first, at most `limit`.
    pub fn get_entries(&self, limit: usize) -> Result<Vec<JournalEntry>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY date DESC, id DESC LIMIT ?1",
            SELECT_COLUMNS
        ))?;
        let cap = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![cap], entry_from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        debug!(count = entries.len(), limit, "entries fetched");
        Ok(entries)
    }

    pub fn get_entry(&self, id: i64) -> Result<JournalEntry, StoreError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                entry_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    pub fn count_entries(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Content must be non-blank and mood within `MIN_MOOD..=MAX_MOOD`.
pub fn validate(content: &str, mood: i64) -> Result<(), StoreError> {
    if content.trim().is_empty() {
        return Err(StoreError::InvalidInput("content is empty".into()));
    }
    if !(MIN_MOOD..=MAX_MOOD).contains(&mood) {
        return Err(StoreError::InvalidInput(format!(
            "mood {} is outside {}..={}",
            mood, MIN_MOOD, MAX_MOOD
        )));
    }
    Ok(())
}

/// The row is committed before the total is read, so a failed count is
/// only worth a warning.
fn log_added(id: i64, total: Result<u64, StoreError>) -> i64 {
    match total {
        Ok(total) => info!(id, total, "entry added"),
        Err(e) => warn!(id, "entry added, counting entries failed: {}", e),
    }
    id
}

/// Fixed-width UTC timestamp so lexical order on `date` is chronological.
fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id: row.get(0)?,
        date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        mood: row.get(3)?,
        mood_factors: row.get(4)?,
        sentiment: row.get(5)?,
        entry_type: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        ai_insight: row.get(7)?,
        weather_data: row.get(8)?,
    })
}
