use tracing::{info, warn};

use crate::config::WeatherConfig;
use crate::error::StoreError;
use crate::insight::InsightProvider;
use crate::store::sqlite::validate;
use crate::store::EntryStore;
use crate::types::{JournalEntry, NewEntry};
use crate::weather::WeatherClient;

/// What the user wrote, before enrichment.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub content: String,
    pub mood: i64,
    pub mood_factors: Option<String>,
}

/// Where to look up weather for new entries.
pub struct WeatherSource {
    pub client: WeatherClient,
    pub zip_code: String,
    pub country_code: String,
}

impl WeatherSource {
    pub fn from_config(config: &WeatherConfig) -> Self {
        Self {
            client: WeatherClient::new(config.api_key.clone()),
            zip_code: config.zip_code.clone(),
            country_code: config.country_code.clone(),
        }
    }
}

/// Result of a submission: the stored row plus the reflection shown to the user.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub entry: JournalEntry,
    pub reflection: String,
}

/// Entry submission flow: optional weather, then a reflection, then the insert.
/// Enrichment faults are logged and skipped; only storage faults surface.
pub struct Journal<'a> {
    store: &'a EntryStore,
    insight: &'a InsightProvider,
    weather: Option<WeatherSource>,
}

impl<'a> Journal<'a> {
    pub fn new(store: &'a EntryStore, insight: &'a InsightProvider) -> Self {
        Self {
            store,
            insight,
            weather: None,
        }
    }

    pub fn with_weather(mut self, source: WeatherSource) -> Self {
        self.weather = Some(source);
        self
    }

    pub async fn submit(&self, draft: EntryDraft) -> Result<Submitted, StoreError> {
        validate(&draft.content, draft.mood)?;

        let mut entry = NewEntry::text(draft.content, draft.mood);
        entry.mood_factors = draft.mood_factors.filter(|f| !f.trim().is_empty());

        if let Some(source) = &self.weather {
            match source
                .client
                .get_weather(&source.zip_code, &source.country_code)
                .await
            {
                Ok(record) => entry.weather = Some(record),
                Err(e) => warn!("submitting entry without weather: {}", e),
            }
        }

        let reflection = self
            .insight
            .analyze_entry(&entry.content, entry.mood, entry.mood_factors.as_deref())
            .await;
        entry.ai_insight = Some(reflection.clone());

        let id = self.store.add_entry(&entry)?;
        info!(id, with_weather = entry.weather.is_some(), "journal entry submitted");

        Ok(Submitted {
            entry: self.store.get_entry(id)?,
            reflection,
        })
    }
}
