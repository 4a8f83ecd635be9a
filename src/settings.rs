use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::model::task::GroupBy;
use crate::timeline::ZoomLevel;

/// First day of the week, for axis grouping and cell labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl WeekStart {
    pub const ALL: [WeekStart; 2] = [WeekStart::Monday, WeekStart::Sunday];

    pub fn label(self) -> &'static str {
        match self {
            WeekStart::Monday => "Monday",
            WeekStart::Sunday => "Sunday",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub week_start: WeekStart,
    pub default_zoom: ZoomLevel,
    pub default_group_by: GroupBy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            default_zoom: ZoomLevel::Weeks,
            default_group_by: GroupBy::None,
        }
    }
}

impl AppSettings {
    /// Load persisted settings, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("settings file {:?} unreadable: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist settings; best effort, failures are logged and ignored.
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("could not save settings to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("could not serialize settings: {}", e),
        }
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "Taskline")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_json() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.week_start, WeekStart::Monday);
        assert_eq!(back.default_zoom, ZoomLevel::Weeks);
        assert_eq!(back.default_group_by, GroupBy::None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: AppSettings = serde_json::from_str("{\"week_start\":\"sunday\"}").unwrap();
        assert_eq!(back.week_start, WeekStart::Sunday);
        assert_eq!(back.default_zoom, ZoomLevel::Weeks);
    }
}
