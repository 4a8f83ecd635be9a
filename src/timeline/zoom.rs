use serde::{Deserialize, Serialize};

/// Controls what scale the timeline displays.
///
/// Each level fixes the horizontal density and the header grouping; there is
/// no hidden state beyond the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    Days,
    Weeks,
    Months,
    Quarters,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::Days,
        ZoomLevel::Weeks,
        ZoomLevel::Months,
        ZoomLevel::Quarters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ZoomLevel::Days => "Days",
            ZoomLevel::Weeks => "Weeks",
            ZoomLevel::Months => "Months",
            ZoomLevel::Quarters => "Quarters",
        }
    }

    /// Horizontal density of the date axis.
    pub fn pixels_per_day(self) -> f32 {
        match self {
            ZoomLevel::Days => 80.0,
            ZoomLevel::Weeks => 28.0,
            ZoomLevel::Months => 18.0,
            ZoomLevel::Quarters => 10.0,
        }
    }

    /// Days covered by one header column at this zoom.
    pub fn days_per_column(self) -> i64 {
        match self {
            ZoomLevel::Days => 1,
            ZoomLevel::Weeks => 7,
            ZoomLevel::Months => 30,
            ZoomLevel::Quarters => 90,
        }
    }
}
