//! Per-user behavioral feature aggregation

use std::collections::{BTreeMap, HashSet};

use super::events::{whole_days, Event};
use super::table::{Cell, Table};
use super::ID_COLUMN;
use crate::error::Result;

/// Aggregated feature columns, in output order
pub const FEATURE_COLUMNS: [&str; 17] = [
    "num_events",
    "num_sessions",
    "num_songs",
    "num_ads",
    "thumbs_up",
    "thumbs_down",
    "help_events",
    "error_events",
    "downgrade_events",
    "distinct_artists",
    "distinct_songs",
    "is_paid",
    "days_on_platform",
    "activity_span_days",
    "songs_per_session",
    "ads_per_session",
    "thumbs_up_ratio",
];

#[derive(Default)]
struct UserAccumulator<'a> {
    events: usize,
    sessions: HashSet<i64>,
    songs: usize,
    ads: usize,
    thumbs_up: usize,
    thumbs_down: usize,
    help: usize,
    errors: usize,
    downgrades: usize,
    artists: HashSet<&'a str>,
    distinct_songs: HashSet<&'a str>,
    paid: bool,
    first_ts: Option<i64>,
    last_ts: Option<i64>,
    first_registration: Option<i64>,
}

impl<'a> UserAccumulator<'a> {
    fn add(&mut self, event: &'a Event) {
        self.events += 1;
        if let Some(session) = event.session_id {
            self.sessions.insert(session);
        }
        match event.page.as_str() {
            "NextSong" => self.songs += 1,
            "Roll Advert" => self.ads += 1,
            "Thumbs Up" => self.thumbs_up += 1,
            "Thumbs Down" => self.thumbs_down += 1,
            "Help" => self.help += 1,
            "Error" => self.errors += 1,
            "Downgrade" => self.downgrades += 1,
            _ => {}
        }
        if let Some(artist) = event.artist.as_deref() {
            self.artists.insert(artist);
        }
        if let Some(song) = event.song.as_deref() {
            self.distinct_songs.insert(song);
        }
        self.paid |= event.level.as_deref() == Some("paid");
        if let Some(ts) = event.ts {
            self.first_ts = Some(self.first_ts.map_or(ts, |t| t.min(ts)));
            self.last_ts = Some(self.last_ts.map_or(ts, |t| t.max(ts)));
        }
        if let Some(reg) = event.registration {
            self.first_registration = Some(self.first_registration.map_or(reg, |r| r.min(reg)));
        }
    }

    fn row(&self, user_id: &str) -> Vec<Cell> {
        let sessions = self.sessions.len();
        let per_session = |n: usize| n as f64 / sessions.max(1) as f64;
        let days = |from: Option<i64>| match (from, self.last_ts) {
            (Some(from), Some(to)) => Cell::from(whole_days(from, to) as f64),
            _ => Cell::Null,
        };

        vec![
            Cell::from(user_id),
            Cell::from(self.events),
            Cell::from(sessions),
            Cell::from(self.songs),
            Cell::from(self.ads),
            Cell::from(self.thumbs_up),
            Cell::from(self.thumbs_down),
            Cell::from(self.help),
            Cell::from(self.errors),
            Cell::from(self.downgrades),
            Cell::from(self.artists.len()),
            Cell::from(self.distinct_songs.len()),
            Cell::from(if self.paid { 1.0 } else { 0.0 }),
            days(self.first_registration),
            days(self.first_ts),
            Cell::from(per_session(self.songs)),
            Cell::from(per_session(self.ads)),
            Cell::from(
                self.thumbs_up as f64 / (self.thumbs_up + self.thumbs_down + 1) as f64,
            ),
        ]
    }
}

/// One row per user, ordered by user id
pub fn aggregate_features(events: &[Event]) -> Result<Table> {
    let mut users: BTreeMap<&str, UserAccumulator<'_>> = BTreeMap::new();
    for event in events {
        users.entry(event.user_id.as_str()).or_default().add(event);
    }

    let mut table = Table::new(std::iter::once(ID_COLUMN).chain(FEATURE_COLUMNS));
    for (user_id, acc) in &users {
        table.push_row(acc.row(user_id))?;
    }
    Ok(table)
}
