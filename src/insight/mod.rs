pub mod anthropic;
pub mod ollama;
pub mod prompts;

use async_trait::async_trait;
use rand_core::{OsRng, RngCore};
use tracing::{error, info, warn};

use crate::config::InsightConfig;
use crate::error::InsightError;

pub use anthropic::AnthropicBackend;
pub use ollama::OllamaBackend;

pub const FALLBACK_QUOTES: [&str; 4] = [
    "\"The only journey is the one within.\" - Rainer Maria Rilke",
    "\"Know thyself.\" - Socrates",
    "\"Self-awareness is the key to self-mastery.\" - Gretchen Rubin",
    "\"Reflection is the lamp of the heart.\" - Al-Ghazali",
];

pub const FALLBACK_ANALYSIS: &str = "I'm currently unable to provide insights, but I appreciate \
you sharing your thoughts. Consider reflecting on what you've written and be kind to yourself. 🌱";

/// A language model that turns a prompt into text. Each backend unwraps its
/// own response shape; trimming and emptiness checks happen in
/// [`InsightProvider`].
#[async_trait]
pub trait InsightBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, InsightError>;
}

/// Build the backend named by `config.backend`.
pub fn build_backend(config: &InsightConfig) -> Result<Box<dyn InsightBackend>, InsightError> {
    match config.backend.to_lowercase().as_str() {
        "ollama" | "local" => Ok(Box::new(OllamaBackend::new(&config.ollama_url)?)),
        "anthropic" | "hosted" => Ok(Box::new(AnthropicBackend::new(
            config.anthropic_api_key.as_deref(),
        )?)),
        other => Err(InsightError::UnknownBackend(other.to_string())),
    }
}

/// Daily quotes and entry reflections, with fixed fallbacks whenever the
/// backend is missing or fails.
pub struct InsightProvider {
    backend: Option<Box<dyn InsightBackend>>,
}

impl InsightProvider {
    /// A backend that fails to initialise leaves the provider disabled;
    /// every call then returns a fallback.
    pub fn from_config(config: &InsightConfig) -> Self {
        match build_backend(config) {
            Ok(backend) => {
                info!("insight backend initialised: {}", backend.name());
                Self::with_backend(backend)
            }
            Err(e) => {
                error!("insight backend unavailable, using fallbacks: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn with_backend(backend: Box<dyn InsightBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn try_daily_quote(&self) -> Result<String, InsightError> {
        self.ask(prompts::DAILY_QUOTE).await
    }

    pub async fn try_analyze_entry(
        &self,
        content: &str,
        mood: i64,
        mood_factors: Option<&str>,
    ) -> Result<String, InsightError> {
        self.ask(&prompts::entry_analysis(content, mood, mood_factors))
            .await
    }

    /// A short attributed quote, or one of [`FALLBACK_QUOTES`].
    pub async fn generate_daily_quote(&self) -> String {
        match self.try_daily_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("daily quote failed, using fallback: {}", e);
                fallback_quote().to_string()
            }
        }
    }

    /// An empathetic reflection on an entry, or [`FALLBACK_ANALYSIS`].
    pub async fn analyze_entry(
        &self,
        content: &str,
        mood: i64,
        mood_factors: Option<&str>,
    ) -> String {
        match self.try_analyze_entry(content, mood, mood_factors).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("entry analysis failed, using fallback: {}", e);
                FALLBACK_ANALYSIS.to_string()
            }
        }
    }

    async fn ask(&self, prompt: &str) -> Result<String, InsightError> {
        let backend = self.backend.as_ref().ok_or(InsightError::Disabled)?;
        let text = backend.complete(prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(InsightError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

fn fallback_quote() -> &'static str {
    let index = OsRng.next_u32() as usize % FALLBACK_QUOTES.len();
    FALLBACK_QUOTES[index]
}
