use serde::Serialize;

use crate::widget::Widget;

/// Names the next prayer above the countdown.
///
/// # Sending
/// - Send this widget whenever the next prayer changes.
/// - Hide it while the countdown is disabled.
#[derive(Serialize, Debug)]
pub struct NextPrayerWidget<'a> {
    /// f.e. "Maghreb dans"
    pub label: &'a str,
}

impl Widget for NextPrayerWidget<'_> {
    const FILE: &'static str = "next_prayer.j2";
}

/// The time remaining until the next prayer.
///
/// # Sending
/// - Send this widget every second.
#[derive(Serialize, Debug)]
pub struct CountdownWidget<'a> {
    /// f.e. "01:02:03" or "05:09"
    pub countdown: &'a str,
}

impl Widget for CountdownWidget<'_> {
    const FILE: &'static str = "countdown.j2";
}
