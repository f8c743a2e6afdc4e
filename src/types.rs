use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default `entry_type` for entries written from text input.
pub const TEXT_ENTRY: &str = "text";

/// One persisted journal record, as read back from the `entries` table.
///
/// Rows that predate a migration may hold NULL in any column but `id`;
/// those read back as an empty `date`/`content`/`entry_type` and a `None` mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: i64,
    pub date: String,
    pub content: String,
    pub mood: Option<i64>,
    pub mood_factors: Option<String>,
    pub sentiment: Option<f64>,
    pub entry_type: String,
    pub ai_insight: Option<String>,
    pub weather_data: Option<String>,
}

impl JournalEntry {
    /// Decode `weather_data` back into a record. Rows written by older
    /// versions may hold text that is not a weather record; those yield `None`.
    pub fn weather(&self) -> Option<WeatherRecord> {
        self.weather_data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

/// Caller-supplied fields for a new entry. Sentiment, id and date are
/// always derived by the store.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub content: String,
    pub mood: i64,
    pub mood_factors: Option<String>,
    pub ai_insight: Option<String>,
    pub weather: Option<WeatherRecord>,
    pub entry_type: String,
}

impl NewEntry {
    pub fn text(content: impl Into<String>, mood: i64) -> Self {
        Self {
            content: content.into(),
            mood,
            mood_factors: None,
            ai_insight: None,
            weather: None,
            entry_type: TEXT_ENTRY.to_string(),
        }
    }

    pub fn with_factors(mut self, factors: impl Into<String>) -> Self {
        self.mood_factors = Some(factors.into());
        self
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.ai_insight = Some(insight.into());
        self
    }

    pub fn with_weather(mut self, weather: WeatherRecord) -> Self {
        self.weather = Some(weather);
        self
    }
}

/// Mutable fields of an existing entry.
#[derive(Debug, Clone)]
pub struct EntryUpdate {
    pub content: String,
    pub mood: i64,
    pub mood_factors: Option<String>,
    pub ai_insight: Option<String>,
}

/// Current conditions, flattened from the weather provider's payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    /// Degrees Fahrenheit, rounded.
    pub temperature: i64,
    pub description: String,
    /// Relative humidity, percent.
    pub humidity: i64,
    /// When the fetch happened, not the provider's observation time.
    pub timestamp: DateTime<Utc>,
}
