use std::fmt;

/// The five daily prayers, in the order they occur throughout a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in daily order.
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The position of this prayer in `Prayer::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The key used by the prayer times API, f.e. "Maghrib".
    pub fn key(self) -> &'static str {
        use Prayer::*;
        match self {
            Fajr => "Fajr",
            Dhuhr => "Dhuhr",
            Asr => "Asr",
            Maghrib => "Maghrib",
            Isha => "Isha",
        }
    }

    /// The transliterated name in the given language.
    pub fn name(self, lang: Language) -> &'static str {
        use Prayer::*;
        match (lang, self) {
            (Language::English, _) => self.key(),
            (Language::French, Fajr) => "Fadjr",
            (Language::French, Dhuhr) => "Dhohr",
            (Language::French, Asr) => "Asr",
            (Language::French, Maghrib) => "Maghreb",
            (Language::French, Isha) => "Icha",
        }
    }

    /// The name in Arabic script.
    pub fn native_name(self) -> &'static str {
        use Prayer::*;
        match self {
            Fajr => "الفجر",
            Dhuhr => "الظهر",
            Asr => "العصر",
            Maghrib => "المغرب",
            Isha => "العشاء",
        }
    }

    pub fn icon(self) -> &'static str {
        use Prayer::*;
        match self {
            Fajr | Maghrib => "🌅",
            Dhuhr => "☀️",
            Asr => "🌤️",
            Isha => "🌙",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The language of the widget's labels.
///
/// The "secondary" language is always the other one, so that
/// both transliterations can be shown next to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    English,
    French,
}

impl Language {
    pub fn secondary(self) -> Language {
        match self {
            Language::English => Language::French,
            Language::French => Language::English,
        }
    }

    /// Parse a language tag, f.e. "fr" or "fr-FR".
    pub fn from_tag(tag: &str) -> Option<Language> {
        let primary = tag.split(|c: char| c == '-' || c == '_').next()?;
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            _ => None,
        }
    }

    pub(crate) fn locale(self) -> chrono::Locale {
        match self {
            Language::English => chrono::Locale::en_US,
            Language::French => chrono::Locale::fr_FR,
        }
    }

    /// Status text while prayer times are being fetched.
    pub fn loading_text(self, place: &str) -> String {
        match self {
            Language::English => format!("📍 Loading prayer times for {}...", place),
            Language::French => format!("📍 Chargement des heures pour {}...", place),
        }
    }

    /// Status text when prayer times could not be fetched.
    pub fn error_text(self) -> &'static str {
        match self {
            Language::English => "❌ Failed to load prayer times",
            Language::French => "❌ Erreur de chargement des heures de prière",
        }
    }

    /// Label above the countdown, f.e. "Maghreb dans".
    pub fn next_prayer_text(self, prayer: Prayer) -> String {
        match self {
            Language::English => format!("{} in", prayer.name(self)),
            Language::French => format!("{} dans", prayer.name(self)),
        }
    }
}
