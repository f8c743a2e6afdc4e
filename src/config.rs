use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "REFLECTIONS_DB_PATH";
pub const DEFAULT_DB_FILE: &str = "reflections.db";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_COUNTRY: &str = "US";

/// Runtime configuration, read from the environment (and `.env` if the
/// binary loaded one).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub insight: InsightConfig,
    pub weather: Option<WeatherConfig>,
}

#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// `ollama`/`local` or `anthropic`/`hosted`.
    pub backend: String,
    pub ollama_url: String,
    pub anthropic_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub zip_code: String,
    pub country_code: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: resolve_db_path(),
            insight: InsightConfig::from_env(),
            weather: WeatherConfig::from_env(),
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Self {
        Self {
            backend: env_or("REFLECTIONS_AI_BACKEND", "ollama"),
            ollama_url: env_or("OLLAMA_BASE_URL", DEFAULT_OLLAMA_URL),
            anthropic_api_key: non_empty_env("ANTHROPIC_API_KEY"),
        }
    }
}

impl WeatherConfig {
    /// `None` unless both an API key and a zip code are configured.
    pub fn from_env() -> Option<Self> {
        let api_key = non_empty_env("WEATHER_API_KEY")?;
        let zip_code = non_empty_env("REFLECTIONS_ZIP")?;
        Some(Self {
            api_key,
            zip_code,
            country_code: env_or("REFLECTIONS_COUNTRY", DEFAULT_COUNTRY),
        })
    }
}

/// `REFLECTIONS_DB_PATH` if set, else `reflections.db` in the working directory.
pub fn resolve_db_path() -> PathBuf {
    match non_empty_env(DB_PATH_ENV) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_DB_FILE),
    }
}

fn env_or(key: &str, default: &str) -> String {
    non_empty_env(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
