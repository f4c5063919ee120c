use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike};

use crate::constants::FALLBACK_TIMES;
use crate::prayer::Prayer;

/// The times of the five daily prayers for one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    times: [NaiveTime; 5],
}

impl Schedule {
    /// Times are expected in the daily order of `Prayer::ALL`.
    pub fn new(times: [NaiveTime; 5]) -> Self {
        Schedule { times }
    }

    /// The schedule displayed whenever the actual times cannot be fetched.
    pub fn fallback() -> Self {
        let times = FALLBACK_TIMES
            .map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).expect("invalid fallback time"));
        Schedule { times }
    }

    pub fn time(&self, prayer: Prayer) -> NaiveTime {
        self.times[prayer.index()]
    }

    /// Returns the index of the first prayer that is later than `now`,
    /// or the index of Fajr if all prayers of this day have passed.
    pub fn find_next(&self, now: NaiveTime) -> usize {
        self.times.iter().position(|t| *t > now).unwrap_or(0)
    }

    /// The moment the prayer at the given index occurs next.
    ///
    /// If its time has already passed (or is exactly `now`),
    /// this is the same time tomorrow.
    pub fn next_occurrence<Tz: TimeZone>(&self, next_idx: usize, now: &DateTime<Tz>) -> DateTime<Tz> {
        let time = self.times[next_idx % self.times.len()];
        let today = now.date_naive();
        let next = resolve_local(now, today.and_time(time));
        if next <= *now {
            resolve_local(now, (today + Duration::days(1)).and_time(time))
        } else {
            next
        }
    }

    /// The remaining time until the prayer at the given index.
    ///
    /// This is the elapsed time, which differs from the difference of
    /// wall-clock times if the clocks change in between.
    pub fn countdown<Tz: TimeZone>(&self, next_idx: usize, now: &DateTime<Tz>) -> Duration {
        self.next_occurrence(next_idx, now) - now.clone()
    }
}

/// The moment a wall-clock time occurs in the time zone of `now`.
///
/// A time that occurs twice resolves to the first occurrence. A time that is
/// skipped when clocks are set forward resolves with the offset of `now`,
/// which lands after the skipped interval.
fn resolve_local<Tz: TimeZone>(now: &DateTime<Tz>, local: NaiveDateTime) -> DateTime<Tz> {
    let tz = now.timezone();
    tz.from_local_datetime(&local).earliest().unwrap_or_else(|| {
        let offset = Duration::seconds(i64::from(now.offset().fix().local_minus_utc()));
        tz.from_utc_datetime(&(local - offset))
    })
}

/// Controls which prayers are displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// All prayers of the day, in daily order.
    All,

    /// The upcoming prayers until the end of the day.
    Remaining,

    /// A fixed number of upcoming prayers, continuing into the next day.
    Count(usize),
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Count(2)
    }
}

impl FromStr for DisplayMode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(DisplayMode::All),
            "remaining" => Ok(DisplayMode::Remaining),
            n => n.parse::<usize>().map(DisplayMode::Count),
        }
    }
}

/// Select the prayers to display, given the index of the next prayer.
pub fn select_display_set(mode: DisplayMode, next_idx: usize) -> Vec<Prayer> {
    let n = Prayer::ALL.len();
    match mode {
        DisplayMode::All => Prayer::ALL.to_vec(),
        DisplayMode::Remaining => Prayer::ALL[next_idx.min(n)..].to_vec(),
        DisplayMode::Count(count) => (0..count.min(n))
            .map(|i| Prayer::ALL[(next_idx + i) % n])
            .collect(),
    }
}

/// Format a countdown as `HH:MM:SS`, or `MM:SS` if less than an hour remains.
///
/// Sub-second remainders are truncated.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Format a prayer time as `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
