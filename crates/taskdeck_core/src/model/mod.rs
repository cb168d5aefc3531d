//! Domain model for tracked projects and their work items.
//!
//! # Responsibility
//! - Define the canonical records shared by query, aggregation and storage.
//!
//! # Invariants
//! - Every record is identified by a stable uuid.
//! - Derived display values (titles, colors) are resolved on read and never
//!   written back to the stored record.

pub mod item;
pub mod project;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clamps to zero when the system clock reports a pre-epoch time.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
