//! Serving handle for the published churn model
//!
//! [`ModelHandle`] holds one loaded artifact. It does not watch the
//! `CURRENT` pointer; callers decide when to [`reload`](ModelHandle::reload).

mod handle;

pub use handle::{ModelHandle, Prediction};
