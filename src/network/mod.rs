use async_trait::async_trait;
use chrono::NaiveDate;
use lazy_static::*;

pub use aladhan::*;

use crate::constants::USER_AGENT;
use crate::schedule::Schedule;
use crate::settings::Location;

mod aladhan;

lazy_static! {
    /// The client used for all HTTP requests.
    /// Timeouts are set per request.
    static ref HTTP_CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to build http client");
}

/// A service that knows the prayer times for any day and location.
#[async_trait]
pub trait TimingsApi: Send + Sync {
    /// Fetch the prayer times at the given location for the given day.
    async fn timings(&self, date: NaiveDate, location: &Location) -> Result<Schedule, TimingsError>;
}
