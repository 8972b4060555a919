//! Durable file helpers shared by the stores

mod atomic;

pub use atomic::{read_json, write_atomic, write_json_atomic};
