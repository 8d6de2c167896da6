use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive metadata for a recorded lap, used only for static labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Track / event name
    pub event_name: String,

    /// Event date, if the source knows it
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Driver shown in the title and legend
    pub driver: String,
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self {
            event_name: "Unknown Track".to_string(),
            date: None,
            driver: "Driver".to_string(),
        }
    }
}

impl SessionInfo {
    /// Date formatted as YYYY-MM-DD
    pub fn date_label(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "Unknown Date".to_string(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} - {} Lap Replay", self.driver, self.event_name)
    }

    /// Legend entries: driver marker, track outline, date
    pub fn legend(&self) -> Vec<String> {
        vec![
            self.driver.clone(),
            format!("{} Track", self.event_name),
            self.date_label(),
        ]
    }
}
