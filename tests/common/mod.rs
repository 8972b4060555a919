//! Shared fixtures for integration tests

use std::fmt::Write as _;
use std::path::Path;

const DAY_MS: i64 = 86_400_000;

/// Write a JSON-lines event log for `users` users; every fourth user cancels.
///
/// Churners listen less and give more thumbs down, so a forest separates
/// the classes easily.
pub fn write_event_log(path: &Path, users: usize) {
    let mut out = String::new();
    for u in 0..users {
        let churned = u % 4 == 0;
        let songs = if churned { 4 + u % 3 } else { 30 + u };
        let thumbs_down = if churned { 5 } else { u % 2 };
        let registration = 0i64;
        let mut ts = 10 * DAY_MS + (u as i64) * 1000;

        for s in 0..songs {
            ts += 60_000;
            let _ = writeln!(
                out,
                r#"{{"userId":"{u}","sessionId":{},"page":"NextSong","ts":{ts},"registration":{registration},"artist":"artist{}","song":"song{s}","level":"{}"}}"#,
                s / 10,
                s % 7,
                if churned { "free" } else { "paid" }
            );
        }
        for _ in 0..thumbs_down {
            ts += 60_000;
            let _ = writeln!(
                out,
                r#"{{"userId":"{u}","sessionId":0,"page":"Thumbs Down","ts":{ts},"registration":{registration},"level":"free"}}"#
            );
        }
        if churned {
            ts += DAY_MS;
            let _ = writeln!(
                out,
                r#"{{"userId":"{u}","sessionId":0,"page":"Cancellation Confirmation","ts":{ts},"registration":{registration},"level":"free"}}"#
            );
        }
    }
    // Anonymous traffic is dropped by the loader
    let _ = writeln!(out, r#"{{"userId":"","page":"Home","ts":1}}"#);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, out).unwrap();
}
