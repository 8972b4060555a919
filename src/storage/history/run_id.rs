//! Timestamp-derived run identifiers

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `YYYYMMDD_HHMMSS`: zero-padded, so string order equals time order
pub const RUN_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Identifier of one retraining run, at whole-second resolution.
///
/// Ordering compares the timestamp, never the string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(NaiveDateTime);

impl RunId {
    /// Id for `at`, truncated to the second
    pub fn at(at: NaiveDateTime) -> Self {
        Self(at.with_nanosecond(0).unwrap_or(at))
    }

    /// Id for the current local time
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.0
    }

    /// The id one second later
    pub fn next(&self) -> Self {
        Self(self.0 + Duration::seconds(1))
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RUN_ID_FORMAT))
    }
}

impl FromStr for RunId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, RUN_ID_FORMAT)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("invalid run id '{s}': {e}")))
    }
}

impl TryFrom<String> for RunId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RunId> for String {
    fn from(id: RunId) -> Self {
        id.to_string()
    }
}
