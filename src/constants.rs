use lazy_static::*;
use semver::Version;

lazy_static! {
    /// Widget version.
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION"))
        .expect("failed to parse our own SemVer");
}

/// User-Agent header for outgoing requests.
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    ", (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// The environment variable that may point to a TOML config file.
pub const CONFIG_ENV_VAR: &str = "SALAH_CONFIG";

/// The Aladhan API, which computes prayer times for a date and location.
///
/// Reference: https://aladhan.com/prayer-times-api
pub const DEFAULT_API_URL: &str = "https://api.aladhan.com/v1";

/// The calculation method requested from the prayer times API.
///
/// `2` is the method of the Islamic Society of North America (ISNA).
pub const DEFAULT_CALCULATION_METHOD: u8 = 2;

/// Outgoing requests are abandoned after this many seconds, which
/// lets a hung request end up with the fallback schedule.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// The countdown is refreshed at this interval.
pub const DEFAULT_TICK_MILLIS: u64 = 1000;

/// The error status stays visible for this long before the
/// fallback schedule is displayed.
pub const DEFAULT_FALLBACK_DELAY_MILLIS: u64 = 2000;

/// The host tags settings messages with this type.
pub const SETTINGS_UPDATE_TYPE: &str = "SETTINGS_UPDATE";

/// Settings messages from any other source are ignored.
pub const HOST_SOURCE: &str = "MyWallpaperHost";

/// The schedule that is displayed when the prayer times cannot be fetched,
/// as `(hour, minute)` for Fajr, Dhuhr, Asr, Maghrib, Isha.
pub const FALLBACK_TIMES: [(u32, u32); 5] = [(5, 30), (12, 45), (16, 15), (19, 30), (21, 0)];
