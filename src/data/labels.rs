//! Churn label derivation

use std::collections::HashSet;

use super::events::Event;
use super::table::{Cell, Table};
use super::{ID_COLUMN, LABEL_COLUMN};
use crate::error::Result;

/// One row per user in first-appearance order; churn is 1 for users with a
/// cancellation confirmation event.
pub fn derive_labels(events: &[Event]) -> Result<Table> {
    let churned: HashSet<&str> =
        events.iter().filter(|e| e.is_cancellation()).map(|e| e.user_id.as_str()).collect();

    let mut seen = HashSet::new();
    let mut table = Table::new([ID_COLUMN, LABEL_COLUMN]);
    for event in events {
        if !seen.insert(event.user_id.as_str()) {
            continue;
        }
        let churn = if churned.contains(event.user_id.as_str()) { 1.0 } else { 0.0 };
        table.push_row(vec![Cell::from(event.user_id.as_str()), Cell::from(churn)])?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::CANCELLATION_PAGE;

    fn event(user: &str, page: &str) -> Event {
        serde_json::from_value(serde_json::json!({"userId": user, "page": page, "ts": 0})).unwrap()
    }

    #[test]
    fn test_labels_mark_cancelled_users() {
        let events = vec![
            event("b", "Home"),
            event("a", "NextSong"),
            event("b", CANCELLATION_PAGE),
            event("a", "Home"),
        ];
        let labels = derive_labels(&events).unwrap();

        assert_eq!(labels.n_rows(), 2);
        assert_eq!(labels.rows()[0], vec![Cell::from("b"), Cell::from(1.0)]);
        assert_eq!(labels.rows()[1], vec![Cell::from("a"), Cell::from(0.0)]);
    }
}
