//! Behavioral event log (JSON lines)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::table::Cell;
use crate::error::{Error, Result};

/// Page name marking a confirmed cancellation
pub const CANCELLATION_PAGE: &str = "Cancellation Confirmation";

const MS_PER_DAY: i64 = 86_400_000;

fn deserialize_user_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Cell::deserialize(deserializer)?;
    Ok(cell.key().unwrap_or_default())
}

fn deserialize_millis<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).map(|v| v as i64))
}

/// One user interaction
#[derive(Clone, Debug, Deserialize)]
pub struct Event {
    #[serde(rename = "userId", deserialize_with = "deserialize_user_id")]
    pub user_id: String,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub page: String,
    /// Event time, ms since epoch
    #[serde(deserialize_with = "deserialize_millis", default)]
    pub ts: Option<i64>,
    /// Account registration time, ms since epoch
    #[serde(deserialize_with = "deserialize_millis", default)]
    pub registration: Option<i64>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl Event {
    pub fn is_cancellation(&self) -> bool {
        self.page == CANCELLATION_PAGE
    }
}

/// Whole days between two millisecond timestamps, floored
pub fn whole_days(from_ms: i64, to_ms: i64) -> i64 {
    (to_ms - from_ms).div_euclid(MS_PER_DAY)
}

/// Parse a JSON-lines event log. Events without a user id are dropped.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path)?;
    let mut events = Vec::new();
    let mut anonymous = 0usize;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(line).map_err(|e| {
            Error::Serialization(format!("{} line {}: {e}", path.display(), lineno + 1))
        })?;
        if event.user_id.is_empty() {
            anonymous += 1;
            continue;
        }
        events.push(event);
    }

    debug!(path = %path.display(), events = events.len(), anonymous, "loaded event log");

    if events.is_empty() {
        return Err(Error::DataIntegrity(format!(
            "event log {} has no attributable events",
            path.display()
        )));
    }
    Ok(events)
}
