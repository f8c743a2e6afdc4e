pub mod schema;
pub mod sqlite;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::StoreError;
use crate::sentiment::{SentimentScorer, VaderScorer};

pub use schema::SchemaStatus;
pub use sqlite::EntryStore;

/// An opened journal database: the schema has been checked (and created or
/// migrated) on the same connection the entry store then keeps.
pub struct Store {
    pub path: PathBuf,
    pub db: EntryStore,
    pub schema: SchemaStatus,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::open_with_scorer(path, Box::new(VaderScorer::new()))
    }

    pub fn open_with_scorer(
        path: &Path,
        scorer: Box<dyn SentimentScorer>,
    ) -> Result<Self, StoreError> {
        let existed = path.exists();
        tracing::info!("opening journal database at {}", path.display());
        let conn = Connection::open(path)?;

        let schema = schema::ensure_schema(&conn, existed)?;
        tracing::info!("schema check: {}", schema);

        Ok(Self {
            path: path.to_path_buf(),
            db: EntryStore::new(conn, scorer),
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewEntry;

    #[test]
    fn open_creates_then_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reflections.db");

        let store = Store::open(&path).unwrap();
        assert_eq!(store.schema, SchemaStatus::Created);
        store.db.add_entry(&NewEntry::text("first", 3)).unwrap();
        drop(store);

        let store = Store::open(&path).unwrap();
        assert_eq!(store.schema, SchemaStatus::UpToDate);
        assert_eq!(store.db.count_entries().unwrap(), 1);
    }

    struct Fixed(f64);

    impl SentimentScorer for Fixed {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn custom_scorer_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            Store::open_with_scorer(&dir.path().join("j.db"), Box::new(Fixed(0.25))).unwrap();
        let id = store.db.add_entry(&NewEntry::text("anything", 3)).unwrap();
        assert_eq!(store.db.get_entry(id).unwrap().sentiment, Some(0.25));
    }
}
