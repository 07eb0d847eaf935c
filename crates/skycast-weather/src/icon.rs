//! Condition-to-icon mapping.
//!
//! Pure function of the condition string: the same input always yields
//! the same glyph.

/// Fixed lookup table, ordered longest key first so compound condition
/// strings ("Partly Cloudy conditions") match their most specific entry
/// before a shorter key ("cloudy") can.
const WEATHER_ICONS: &[(&str, &str)] = &[
    ("partly cloudy", "⛅"),
    ("thunderstorm", "⛈️"),
    ("cloudy", "☁️"),
    ("clear", "☀️"),
    ("sunny", "☀️"),
    ("rain", "🌧️"),
    ("snow", "❄️"),
    ("fog", "🌫️"),
];

/// Default glyph when no key matches or the condition is empty.
const DEFAULT_ICON: &str = "🌤️";

/// Map a condition string to its display glyph.
///
/// Matching is a case-insensitive substring test against the fixed table;
/// the first (longest) matching key wins.
pub fn icon_for(condition: &str) -> &'static str {
    let lower = condition.to_lowercase();
    WEATHER_ICONS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
