// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the timestamps stamped on articles and comments.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
