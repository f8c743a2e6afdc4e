//! Current-conditions lookup against WeatherAPI.
//!
//! One GET per call: no retry, no caching, and the HTTP client's default
//! timeout.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::WeatherError;
use crate::types::WeatherRecord;

pub const DEFAULT_ENDPOINT: &str = "http://api.weatherapi.com/v1/current.json";

pub struct WeatherClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_f: f64,
    humidity: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch current conditions for a zip code. The provider resolves the
    /// zip itself; `country_code` is recorded in the logs only.
    pub async fn get_weather(
        &self,
        zip_code: &str,
        country_code: &str,
    ) -> Result<WeatherRecord, WeatherError> {
        match self.fetch(zip_code).await {
            Ok(record) => {
                info!(zip_code, country_code, "weather fetched");
                Ok(record)
            }
            Err(e) => {
                error!(zip_code, country_code, "error fetching weather: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, zip_code: &str) -> Result<WeatherRecord, WeatherError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", zip_code), ("aqi", "no")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(WeatherError::Status(resp.status().as_u16()));
        }

        let data: CurrentResponse = resp
            .json()
            .await
            .map_err(|e| WeatherError::Malformed(e.to_string()))?;

        Ok(WeatherRecord {
            temperature: data.current.temp_f.round() as i64,
            description: capitalize(&data.current.condition.text),
            humidity: data.current.humidity.round() as i64,
            timestamp: Utc::now(),
        })
    }
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
