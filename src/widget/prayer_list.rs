use chrono::NaiveTime;
use serde::Serialize;

use crate::widget::ser::format_prayer_time;
use crate::widget::Widget;

/// A list of prayer cards, one for each displayed prayer.
///
/// # Sending
/// - Send this widget whenever the schedule changes.
/// - Has to be re-sent whenever the next prayer changes, or
///   the display settings are changed.
#[derive(Serialize, Debug)]
pub struct PrayerListWidget {
    pub entries: Vec<PrayerEntry>,
}

#[derive(Serialize, Debug)]
pub struct PrayerEntry {
    pub icon: &'static str,

    /// The name in the widget's language.
    pub name: &'static str,

    /// The name in the secondary language, if enabled.
    pub secondary_name: Option<&'static str>,

    /// The name in Arabic script, if enabled.
    pub native_name: Option<&'static str>,

    #[serde(serialize_with = "format_prayer_time")]
    pub time: NaiveTime,

    /// Highlight the next prayer.
    pub is_next: bool,
}

impl Widget for PrayerListWidget {
    const FILE: &'static str = "prayer_list.j2";
}
