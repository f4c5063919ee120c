use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::prayer::Language;
use crate::schedule::DisplayMode;

/// Widget settings, which are controlled by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Place name used when no coordinates are set.
    pub city: String,
    pub country: String,

    /// Coordinates take precedence over the place name.
    pub geolocation: Option<Coordinates>,

    pub display_mode: DisplayMode,

    /// Show the countdown to the next prayer.
    pub show_countdown: bool,

    /// Show today's date in the header.
    pub show_current_time: bool,

    /// Show prayer names in the secondary language as well.
    pub show_secondary_name: bool,

    /// Show prayer names in Arabic script.
    pub show_native_name: bool,

    pub language: Language,

    /// Presentation only, forwarded to the rendered style untouched.
    pub primary_color: String,
    pub font_family: Option<String>,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            city: "Paris".to_string(),
            country: "France".to_string(),
            geolocation: None,
            display_mode: DisplayMode::default(),
            show_countdown: true,
            show_current_time: true,
            show_secondary_name: true,
            show_native_name: true,
            language: Language::French,
            primary_color: "#2d7c47".to_string(),
            font_family: None,
            theme: "modern".to_string(),
        }
    }
}

impl Settings {
    /// The location prayer times are fetched for.
    pub fn location(&self) -> Location {
        match self.geolocation {
            Some(Coordinates {
                latitude,
                longitude,
            }) => Location::Coordinates {
                latitude,
                longitude,
            },
            None => Location::City {
                city: self.city.clone(),
                country: self.country.clone(),
            },
        }
    }

    /// Merge the fields of an update into these settings.
    ///
    /// Fields that are not part of the update are kept. The returned
    /// list describes which parts of the widget are affected.
    pub fn merge(&mut self, update: SettingsUpdate) -> Vec<SettingsDiff> {
        use SettingsDiff::*;

        let prev = self.clone();

        let SettingsUpdate {
            city,
            country,
            geolocation,
            display_mode,
            show_countdown,
            show_current_time,
            show_secondary_name,
            show_native_name,
            language,
            primary_color,
            font_family,
            theme,
        } = update;

        if let Some(v) = city {
            self.city = v;
        }
        if let Some(v) = country {
            self.country = v;
        }
        if let Some(v) = geolocation {
            self.geolocation = v;
        }
        if let Some(v) = display_mode {
            self.display_mode = v;
        }
        if let Some(v) = show_countdown {
            self.show_countdown = v;
        }
        if let Some(v) = show_current_time {
            self.show_current_time = v;
        }
        if let Some(v) = show_secondary_name {
            self.show_secondary_name = v;
        }
        if let Some(v) = show_native_name {
            self.show_native_name = v;
        }
        if let Some(v) = language {
            self.language = v;
        }
        if let Some(v) = primary_color {
            self.primary_color = v;
        }
        if let Some(v) = font_family {
            self.font_family = v;
        }
        if let Some(v) = theme {
            self.theme = v;
        }

        let mut diffs = Vec::new();

        let location = self.location();
        if location != prev.location() {
            diffs.push(NewLocation(location));
        }

        if self.primary_color != prev.primary_color
            || self.font_family != prev.font_family
            || self.theme != prev.theme
        {
            diffs.push(NewPresentation);
        }

        if self.display_mode != prev.display_mode
            || self.show_countdown != prev.show_countdown
            || self.show_current_time != prev.show_current_time
            || self.show_secondary_name != prev.show_secondary_name
            || self.show_native_name != prev.show_native_name
            || self.language != prev.language
        {
            diffs.push(NewDisplay);
        }

        diffs
    }
}

/// Describes which part of the settings changed after a merge.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsDiff {
    /// Prayer times have to be fetched for this location.
    NewLocation(Location),

    /// Color, font or theme changed.
    NewPresentation,

    /// Which prayers, names or labels are displayed changed.
    NewDisplay,
}

/// Geographic coordinates in decimal degrees.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,

    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

/// The location prayer times are computed for.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    City { city: String, country: String },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
            Location::City { city, country } if country.is_empty() => f.write_str(city),
            Location::City { city, country } => write!(f, "{}, {}", city, country),
        }
    }
}

/// A partial settings update. Every field that is `None` is left untouched
/// when merging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsUpdate {
    pub city: Option<String>,
    pub country: Option<String>,

    /// `Some(None)` clears the coordinates, so that the place name is used again.
    pub geolocation: Option<Option<Coordinates>>,

    pub display_mode: Option<DisplayMode>,
    pub show_countdown: Option<bool>,
    pub show_current_time: Option<bool>,
    pub show_secondary_name: Option<bool>,
    pub show_native_name: Option<bool>,
    pub language: Option<Language>,
    pub primary_color: Option<String>,

    /// `Some(None)` resets the font to the theme's default.
    pub font_family: Option<Option<String>>,

    pub theme: Option<String>,
}

impl SettingsUpdate {
    /// Read the recognized keys of a settings object sent by the host.
    ///
    /// Keys are read one by one: unknown keys, and values of an unexpected
    /// type, are skipped without affecting the other keys.
    pub fn from_json(value: &Value) -> SettingsUpdate {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                log::warn!("ignoring settings that are not an object: {}", value);
                return SettingsUpdate::default();
            }
        };

        for key in obj.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::debug!("ignoring unknown setting '{}'", key);
            }
        }

        SettingsUpdate {
            city: field(obj, "city"),
            country: field(obj, "country"),
            geolocation: nullable_field(obj, "geolocation"),
            display_mode: display_mode_field(obj),
            show_countdown: field(obj, "showCountdown"),
            show_current_time: field(obj, "showCurrentTime"),
            show_secondary_name: field(obj, "showSecondaryName"),
            show_native_name: field(obj, "showNativeName"),
            language: field::<String>(obj, "language").and_then(|tag| {
                let lang = Language::from_tag(&tag);
                if lang.is_none() {
                    log::warn!("ignoring unsupported language '{}'", tag);
                }
                lang
            }),
            primary_color: field(obj, "primaryColor"),
            font_family: nullable_field(obj, "fontFamily"),
            theme: field(obj, "theme"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SettingsUpdate::default()
    }
}

/// The settings keys understood by this widget.
const KNOWN_KEYS: [&str; 12] = [
    "city",
    "country",
    "geolocation",
    "displayCount",
    "showCountdown",
    "showCurrentTime",
    "showSecondaryName",
    "showNativeName",
    "language",
    "primaryColor",
    "fontFamily",
    "theme",
];

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    let value = obj.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring setting '{}' = {}: {}", key, value, e);
            None
        }
    }
}

/// Like `field`, but `null` is a valid value that clears the setting.
fn nullable_field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<Option<T>> {
    match obj.get(key)? {
        Value::Null => Some(None),
        _ => field::<T>(obj, key).map(Some),
    }
}

/// The display count is either "all", "remaining", or a number
/// that may or may not be quoted.
fn display_mode_field(obj: &Map<String, Value>) -> Option<DisplayMode> {
    let value = obj.get("displayCount")?;
    let mode = match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64().map(|n| DisplayMode::Count(n as usize)),
        _ => None,
    };
    if mode.is_none() {
        log::warn!("ignoring setting 'displayCount' = {}", value);
    }
    mode
}
