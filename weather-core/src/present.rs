//! Pure presentation mapping: weather attributes to themes, icons, and
//! derived labels. All functions are deterministic and order-sensitive —
//! the first matching rule wins.

/// Background theme derived from the primary weather description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Stormy,
    Snowy,
    Rainy,
    Foggy,
    Overcast,
    PartlyCloudyDay,
    PartlyCloudyNight,
    ClearDay,
    ClearNight,
    DefaultDay,
    DefaultNight,
}

fn contains_any(description: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| description.contains(needle))
}

impl Theme {
    /// Match the lower-cased description against substring rules in priority
    /// order. The "partly cloudy" test runs before the generic cloudy test,
    /// otherwise it could never match.
    pub fn for_conditions(description: &str, is_day: bool) -> Self {
        let desc = description.to_lowercase();

        if contains_any(&desc, &["thunder", "storm"]) {
            Theme::Stormy
        } else if contains_any(&desc, &["snow", "blizzard", "sleet"]) {
            Theme::Snowy
        } else if contains_any(&desc, &["rain", "drizzle", "shower"]) {
            Theme::Rainy
        } else if contains_any(&desc, &["fog", "mist", "haze"]) {
            Theme::Foggy
        } else if desc.contains("partly cloudy") {
            if is_day { Theme::PartlyCloudyDay } else { Theme::PartlyCloudyNight }
        } else if contains_any(&desc, &["overcast", "cloudy"]) {
            Theme::Overcast
        } else if contains_any(&desc, &["clear", "sunny"]) {
            if is_day { Theme::ClearDay } else { Theme::ClearNight }
        } else if is_day {
            Theme::DefaultDay
        } else {
            Theme::DefaultNight
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Stormy => "stormy",
            Theme::Snowy => "snowy",
            Theme::Rainy => "rainy",
            Theme::Foggy => "foggy",
            Theme::Overcast => "overcast",
            Theme::PartlyCloudyDay => "partly-cloudy-day",
            Theme::PartlyCloudyNight => "partly-cloudy-night",
            Theme::ClearDay => "clear-day",
            Theme::ClearNight => "clear-night",
            Theme::DefaultDay => "default-day",
            Theme::DefaultNight => "default-night",
        }
    }
}

/// Pictographic category, mapped independently from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Storm,
    Snow,
    Rain,
    Fog,
    Cloud,
    Sun,
    DefaultCloud,
}

impl Icon {
    pub fn for_description(description: &str) -> Self {
        let desc = description.to_lowercase();

        if contains_any(&desc, &["thunder", "storm"]) {
            Icon::Storm
        } else if contains_any(&desc, &["snow", "blizzard", "sleet"]) {
            Icon::Snow
        } else if contains_any(&desc, &["rain", "drizzle", "shower"]) {
            Icon::Rain
        } else if contains_any(&desc, &["fog", "mist", "haze"]) {
            Icon::Fog
        } else if contains_any(&desc, &["overcast", "cloudy"]) {
            Icon::Cloud
        } else if contains_any(&desc, &["clear", "sunny"]) {
            Icon::Sun
        } else {
            Icon::DefaultCloud
        }
    }
}

/// UV risk tier with its severity color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLabel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLabel {
    pub fn for_index(uv_index: u8) -> Self {
        match uv_index {
            0..=2 => UvLabel::Low,
            3..=5 => UvLabel::Moderate,
            6..=7 => UvLabel::High,
            8..=10 => UvLabel::VeryHigh,
            _ => UvLabel::Extreme,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UvLabel::Low => "Low",
            UvLabel::Moderate => "Moderate",
            UvLabel::High => "High",
            UvLabel::VeryHigh => "Very High",
            UvLabel::Extreme => "Extreme",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            UvLabel::Low => "green",
            UvLabel::Moderate => "yellow",
            UvLabel::High => "orange",
            UvLabel::VeryHigh => "red",
            UvLabel::Extreme => "purple",
        }
    }
}

pub fn humidity_comment(humidity: u8) -> &'static str {
    if humidity > 70 {
        "High moisture"
    } else if humidity > 40 {
        "Comfortable"
    } else {
        "Dry air"
    }
}

pub fn visibility_comment(visibility_km: f64) -> &'static str {
    if visibility_km >= 10.0 {
        "Crystal clear"
    } else if visibility_km >= 5.0 {
        "Good"
    } else {
        "Poor visibility"
    }
}

pub fn pressure_comment(pressure_hpa: f64) -> &'static str {
    if pressure_hpa >= 1013.0 { "High pressure" } else { "Low pressure" }
}
