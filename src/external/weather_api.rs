use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const PLACEHOLDER_KEY: &str = "your_weatherapi_key_here";

/// Current conditions as reported by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: Option<f64>,
    pub humidity: Option<i32>,
    pub wind_kph: Option<f64>,
    pub wind_degree: Option<f64>,
    pub condition: String,
    pub precip_mm: Option<f64>,
    pub visibility_km: Option<f64>,
    /// Unmodified response body.
    pub raw: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// False when no credential is set; callers must not call `current`.
    fn is_configured(&self) -> bool;

    async fn current(&self, location: &str) -> AppResult<WeatherReading>;
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: Option<f64>,
    humidity: Option<f64>,
    wind_kph: Option<f64>,
    wind_degree: Option<f64>,
    condition: Option<Condition>,
    precip_mm: Option<f64>,
    vis_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

/// Maps a WeatherAPI.com `current.json` body.
pub fn parse_current(body: &str) -> AppResult<WeatherReading> {
    let parsed: CurrentResponse = serde_json::from_str(body).map_err(|e| {
        AppError::ExternalApiError(format!("Unparsable weather provider response: {e}"))
    })?;
    let current = parsed.current;

    Ok(WeatherReading {
        temperature_c: current.temp_c,
        humidity: current.humidity.map(|h| h.round() as i32),
        wind_kph: current.wind_kph,
        wind_degree: current.wind_degree,
        condition: current.condition.map(|c| c.text).unwrap_or_default(),
        precip_mm: current.precip_mm,
        visibility_km: current.vis_km,
        raw: body.to_string(),
    })
}

#[derive(Clone)]
pub struct WeatherApiClient {
    http: Client,
    cfg: WeatherConfig,
}

impl WeatherApiClient {
    pub fn new(cfg: WeatherConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("fairway-backend/weather")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Cannot build weather client: {e}")))?;
        Ok(Self { http, cfg })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    fn is_configured(&self) -> bool {
        let key = self.cfg.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_KEY
    }

    async fn current(&self, location: &str) -> AppResult<WeatherReading> {
        let url = format!("{}/current.json", self.cfg.api_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.cfg.api_key.as_str()), ("q", location), ("aqi", "no")])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Weather provider returned HTTP {}",
                status.as_u16()
            )));
        }

        parse_current(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "location": {"name": "Pune"},
        "current": {
            "temp_c": 28.4,
            "humidity": 62,
            "wind_kph": 14.8,
            "wind_degree": 100,
            "condition": {"text": "Partly cloudy", "code": 1003},
            "precip_mm": 0.1,
            "vis_km": 10.0
        }
    }"#;

    #[test]
    fn test_parse_current() {
        let reading = parse_current(SAMPLE).unwrap();
        assert_eq!(reading.temperature_c, Some(28.4));
        assert_eq!(reading.humidity, Some(62));
        assert_eq!(reading.wind_degree, Some(100.0));
        assert_eq!(reading.condition, "Partly cloudy");
        assert_eq!(reading.visibility_km, Some(10.0));
        assert_eq!(reading.raw, SAMPLE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_current("<html>oops</html>"),
            Err(AppError::ExternalApiError(_))
        ));
        assert!(parse_current(r#"{"error": {"code": 1006}}"#).is_err());
    }

    #[test]
    fn test_placeholder_key_is_unconfigured() {
        let mut cfg = WeatherConfig::default();
        assert!(!WeatherApiClient::new(cfg.clone()).unwrap().is_configured());
        cfg.api_key = PLACEHOLDER_KEY.to_string();
        assert!(!WeatherApiClient::new(cfg.clone()).unwrap().is_configured());
        cfg.api_key = "real".to_string();
        assert!(WeatherApiClient::new(cfg).unwrap().is_configured());
    }
}
