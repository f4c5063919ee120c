use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::network::{TimingsApi, HTTP_CLIENT};
use crate::prayer::Prayer;
use crate::schedule::Schedule;
use crate::settings::Location;

/// Possible errors when querying prayer times.
#[derive(Error, Debug)]
pub enum TimingsError {
    /// Wrong endpoint, non-success HTTP status, or maybe not available right now.
    #[error("prayer times request failed")]
    RequestError(#[from] reqwest::Error),

    /// The payload is missing expected fields.
    #[error("failed to parse prayer times response")]
    ParseError(#[from] serde_json::Error),

    /// The payload signals an error, f.e. for an unknown city.
    #[error("prayer times API responded with code {0}")]
    BadStatus(u16),

    /// A prayer time is not in `HH:MM` format.
    #[error("invalid time '{value}' for {prayer}")]
    InvalidTime { prayer: Prayer, value: String },
}

/// Client for the Aladhan prayer times API.
///
/// Reference: https://aladhan.com/prayer-times-api
pub struct AladhanApi {
    base_url: String,
    method: u8,
    timeout: Duration,
}

impl AladhanApi {
    pub fn new(config: &Config) -> Self {
        AladhanApi {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            method: config.calculation_method,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn request(&self, date: NaiveDate, location: &Location) -> reqwest::RequestBuilder {
        let date = date.format("%d-%m-%Y");
        let method = self.method.to_string();
        let builder = match location {
            Location::City { city, country } => HTTP_CLIENT
                .get(&format!("{}/timingsByCity/{}", self.base_url, date))
                .query(&[("city", city.as_str()), ("country", country.as_str())]),
            Location::Coordinates {
                latitude,
                longitude,
            } => HTTP_CLIENT
                .get(&format!("{}/timings/{}", self.base_url, date))
                .query(&[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                ]),
        };
        builder
            .query(&[("method", method.as_str())])
            .timeout(self.timeout)
    }
}

#[async_trait]
impl TimingsApi for AladhanApi {
    async fn timings(&self, date: NaiveDate, location: &Location) -> Result<Schedule, TimingsError> {
        log::debug!("fetch prayer times for '{}' on {}", location, date);
        let json: String = self
            .request(date, location)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_timings(&json)
    }
}

#[derive(Deserialize, Debug)]
struct TimingsResponse {
    code: u16,

    /// An object on success, but an error string otherwise.
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize, Debug)]
struct TimingsData {
    timings: Timings,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Timings {
    fajr: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

/// Read the schedule from an API response body.
pub(crate) fn parse_timings(json: &str) -> Result<Schedule, TimingsError> {
    let response: TimingsResponse = serde_json::from_str(json)?;
    if response.code != 200 {
        return Err(TimingsError::BadStatus(response.code));
    }

    let data: TimingsData = serde_json::from_value(response.data)?;
    let Timings {
        fajr,
        dhuhr,
        asr,
        maghrib,
        isha,
    } = data.timings;

    Ok(Schedule::new([
        parse_time(Prayer::Fajr, &fajr)?,
        parse_time(Prayer::Dhuhr, &dhuhr)?,
        parse_time(Prayer::Asr, &asr)?,
        parse_time(Prayer::Maghrib, &maghrib)?,
        parse_time(Prayer::Isha, &isha)?,
    ]))
}

/// Parse `HH:MM`, ignoring any suffix like a timezone, f.e. `"05:30 (CEST)"`.
fn parse_time(prayer: Prayer, value: &str) -> Result<NaiveTime, TimingsError> {
    value
        .split_whitespace()
        .next()
        .and_then(|hm| NaiveTime::parse_from_str(hm, "%H:%M").ok())
        .ok_or_else(|| TimingsError::InvalidTime {
            prayer,
            value: value.to_string(),
        })
}
