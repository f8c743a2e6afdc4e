use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use rusqlite::Connection;
use tracing::{info, warn};

use crate::error::SchemaError;

pub const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        content TEXT NOT NULL,
        mood INTEGER NOT NULL,
        mood_factors TEXT,
        sentiment REAL,
        entry_type TEXT NOT NULL,
        ai_insight TEXT,
        weather_data TEXT
    );
";

/// Canonical columns with the type affinity used when a migration has to
/// add them. Must match `CREATE_TABLE_SQL`.
pub const COLUMNS: &[(&str, &str)] = &[
    ("id", "INTEGER"),
    ("date", "TEXT"),
    ("content", "TEXT"),
    ("mood", "INTEGER"),
    ("mood_factors", "TEXT"),
    ("sentiment", "REAL"),
    ("entry_type", "TEXT"),
    ("ai_insight", "TEXT"),
    ("weather_data", "TEXT"),
];

/// Outcome of [`ensure_database`]. `Display` renders the line the schema
/// tool prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    Created,
    CreatedMissingTable,
    UpToDate,
    /// Names of the added columns, sorted.
    Migrated(Vec<String>),
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaStatus::Created => write!(f, "Database created."),
            SchemaStatus::CreatedMissingTable => {
                write!(f, "Database created (missing table detected).")
            }
            SchemaStatus::UpToDate => write!(f, "Database already up-to-date."),
            SchemaStatus::Migrated(added) => {
                write!(f, "Migration applied - added columns: {}.", added.join(", "))
            }
        }
    }
}

pub fn expected_columns() -> BTreeSet<String> {
    COLUMNS.iter().map(|(name, _)| name.to_string()).collect()
}

/// Column names currently on the `entries` table; empty when the table
/// does not exist.
pub fn current_columns(conn: &Connection) -> Result<BTreeSet<String>, SchemaError> {
    let mut stmt = conn.prepare("PRAGMA table_info(entries)")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut columns = BTreeSet::new();
    for row in rows {
        columns.insert(row?);
    }
    Ok(columns)
}

/// Make sure the database file at `path` exists and carries the canonical
/// `entries` schema, creating or migrating it as needed.
pub fn ensure_database(path: &Path) -> Result<SchemaStatus, SchemaError> {
    let existed = path.exists();
    let conn = Connection::open(path)?;
    ensure_schema(&conn, existed)
}

/// Schema check against an already-open connection. `existed` says whether
/// the file was on disk before the connection created it.
pub fn ensure_schema(conn: &Connection, existed: bool) -> Result<SchemaStatus, SchemaError> {
    if !existed {
        info!("database file not found, creating full schema");
        create_table(conn)?;
        return Ok(SchemaStatus::Created);
    }

    let current = current_columns(conn)?;
    if current.is_empty() {
        warn!("database file exists but entries table is missing, recreating");
        create_table(conn)?;
        return Ok(SchemaStatus::CreatedMissingTable);
    }

    let expected = expected_columns();
    if current == expected {
        info!("database already has the expected schema");
        return Ok(SchemaStatus::UpToDate);
    }

    let unexpected: Vec<String> = current.difference(&expected).cloned().collect();
    if !unexpected.is_empty() {
        return Err(SchemaError::UnexpectedColumns(unexpected));
    }

    let missing: Vec<String> = expected.difference(&current).cloned().collect();
    info!(columns = ?missing, "entries table is missing columns, migrating");
    migrate(conn, &missing)?;
    Ok(SchemaStatus::Migrated(missing))
}

fn create_table(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(CREATE_TABLE_SQL)?;
    Ok(())
}

/// Add each missing column as nullable so existing rows read NULL.
fn migrate(conn: &Connection, missing: &[String]) -> Result<(), SchemaError> {
    if missing.iter().any(|name| name == "id") {
        return Err(SchemaError::MissingPrimaryKey);
    }

    let tx = conn.unchecked_transaction()?;
    for name in missing {
        let affinity = COLUMNS
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, affinity)| *affinity)
            .unwrap_or("TEXT");
        tx.execute_batch(&format!(
            "ALTER TABLE entries ADD COLUMN {} {}",
            name, affinity
        ))?;
    }
    tx.commit()?;
    Ok(())
}
