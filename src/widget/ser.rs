use chrono::NaiveTime;
use serde::Serializer;

use crate::schedule::format_time;

/// Display prayer times as `HH:MM`, dropping seconds.
pub fn format_prayer_time<S>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format_time(*t))
}

