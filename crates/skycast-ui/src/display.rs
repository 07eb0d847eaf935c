//! Controller-owned display state.
//!
//! `DisplayState` is the UI-owned projection of the latest successful
//! weather snapshot plus the status line and last-updated stamp. It is
//! mutated only by the presentation controller after a workflow
//! completes; the render layer reads it through the model's properties.
//!
//! The snapshot is replaced wholesale on success and left untouched on
//! failure, so the projection always reflects exactly one completed
//! fetch (or the never-loaded sentinel).

use chrono::{DateTime, Local};
use skycast_weather::WeatherSnapshot;

/// Status line shown before any workflow has run.
pub const STATUS_READY: &str = "Ready";

/// Status line shown after a successful fetch.
pub const STATUS_LOADED: &str = "Weather data loaded successfully";

/// Trim a raw location input, returning `None` when nothing usable
/// remains. Workflows must not dispatch any background work for a `None`.
pub fn normalized_location(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Monotonic workflow generation counter.
///
/// Every dispatched workflow captures a generation; starting a new
/// workflow bumps the counter, so completions of superseded workflows can
/// be recognized and discarded instead of racing on the display state.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    /// Start a new workflow, invalidating all earlier generations.
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// True when `generation` belongs to the most recently started workflow.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }
}

#[derive(Debug, Clone)]
pub struct DisplayState {
    snapshot: Option<WeatherSnapshot>,
    status: String,
    last_updated: Option<DateTime<Local>>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            snapshot: None,
            status: STATUS_READY.to_string(),
            last_updated: None,
        }
    }
}

impl DisplayState {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Set a plain lifecycle status message.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Apply a completed fetch: the snapshot, timestamp and status are
    /// replaced together as one unit.
    pub fn apply_snapshot(&mut self, snapshot: WeatherSnapshot, at: DateTime<Local>) {
        self.snapshot = Some(snapshot);
        self.last_updated = Some(at);
        self.status = STATUS_LOADED.to_string();
    }

    /// Record a warning: the status line mirrors the message; the
    /// snapshot is untouched.
    pub fn apply_warning(&mut self, message: &str) {
        self.status = format!("Warning: {}", message);
    }

    /// Record an error: the status line mirrors the message; the
    /// snapshot is untouched.
    pub fn apply_error(&mut self, message: &str) {
        self.status = format!("Error: {}", message);
    }

    /// Local wall-clock time of the last successful fetch, or "Never".
    pub fn last_updated_label(&self) -> String {
        match self.last_updated {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "Never".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skycast_weather::ForecastDay;

    fn snapshot(location: &str, condition: &str, temp: i32) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: location.to_string(),
            condition: condition.to_string(),
            temperature_c: temp,
            humidity_pct: 65,
            wind_speed_kmh: 12,
            wind_direction: "NW".to_string(),
            pressure_hpa: 1013,
            visibility_km: 10,
            forecast: vec![ForecastDay {
                date: "Day 1".to_string(),
                condition: condition.to_string(),
                max_temp_c: temp - 4,
                min_temp_c: temp - 14,
                humidity_pct: 61,
                wind_speed_kmh: 6,
            }],
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 8, 7, h, m, s)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn empty_sentinel() {
        let state = DisplayState::default();
        assert!(!state.has_data());
        assert!(state.snapshot().is_none());
        assert_eq!(state.status(), STATUS_READY);
        assert_eq!(state.last_updated_label(), "Never");
    }

    #[test]
    fn normalized_location_rejects_blank_input() {
        assert_eq!(normalized_location(""), None);
        assert_eq!(normalized_location("   "), None);
        assert_eq!(normalized_location("\t\n"), None);
    }

    #[test]
    fn normalized_location_trims() {
        assert_eq!(normalized_location("  Paris  "), Some("Paris".to_string()));
        assert_eq!(normalized_location("Paris"), Some("Paris".to_string()));
    }

    #[test]
    fn apply_snapshot_updates_everything_at_once() {
        let mut state = DisplayState::default();
        state.apply_snapshot(snapshot("Paris", "Sunny", 25), at(14, 30, 5));

        let snap = state.snapshot().expect("snapshot applied");
        assert_eq!(snap.location_name, "Paris");
        assert_eq!(snap.condition, "Sunny");
        assert_eq!(snap.temperature_c, 25);
        assert_eq!(state.status(), STATUS_LOADED);
        assert_eq!(state.last_updated_label(), "14:30:05");
    }

    #[test]
    fn new_snapshot_supersedes_old_wholesale() {
        let mut state = DisplayState::default();
        state.apply_snapshot(snapshot("Paris", "Sunny", 25), at(9, 0, 0));
        state.apply_snapshot(snapshot("Oslo", "Snow", -3), at(10, 15, 30));

        // All fields come from the second fetch; no mixing.
        let snap = state.snapshot().expect("snapshot applied");
        assert_eq!(snap.location_name, "Oslo");
        assert_eq!(snap.condition, "Snow");
        assert_eq!(snap.temperature_c, -3);
        assert_eq!(state.last_updated_label(), "10:15:30");
    }

    #[test]
    fn failure_leaves_previous_snapshot_untouched() {
        let mut state = DisplayState::default();
        state.apply_snapshot(snapshot("Paris", "Sunny", 25), at(9, 0, 0));

        state.apply_error("Error loading weather data for Oslo: unavailable");

        let snap = state.snapshot().expect("snapshot retained");
        assert_eq!(snap.location_name, "Paris");
        assert_eq!(state.last_updated_label(), "09:00:00");
        assert!(state.status().starts_with("Error: "));
    }

    #[test]
    fn warning_prefixes_status_without_touching_data() {
        let mut state = DisplayState::default();
        state.apply_warning("Please enter a location");
        assert_eq!(state.status(), "Warning: Please enter a location");
        assert!(!state.has_data());
    }

    #[test]
    fn generation_counter_discards_stale_workflows() {
        let mut generations = GenerationCounter::default();
        let first = generations.begin();
        assert!(generations.is_current(first));

        // A second workflow starts while the first is in flight; the
        // first workflow's completion must no longer be applied.
        let second = generations.begin();
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }

    #[test]
    fn generation_counter_latest_started_wins_regardless_of_finish_order() {
        let mut generations = GenerationCounter::default();
        let a = generations.begin();
        let b = generations.begin();

        // Completion order b then a: only b may be applied.
        assert!(generations.is_current(b));
        assert!(!generations.is_current(a));
    }
}
