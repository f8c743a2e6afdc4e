pub mod config;
pub mod error;
pub mod insight;
pub mod journal;
pub mod sentiment;
pub mod store;
pub mod types;
pub mod weather;

pub use error::{InsightError, SchemaError, StoreError, WeatherError};
pub use insight::InsightProvider;
pub use journal::{EntryDraft, Journal};
pub use store::{EntryStore, SchemaStatus, Store};
pub use types::{EntryUpdate, JournalEntry, NewEntry, WeatherRecord};
