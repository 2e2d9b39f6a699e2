//! Shared types and result types for the database layer

pub mod errors;

use chrono::{SecondsFormat, Utc};

pub use errors::DatabaseError;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Current time as a fixed-width RFC 3339 UTC string.
///
/// Every timestamp column is written with this helper so that lexical order
/// on the stored text equals chronological order.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_fixed_width_and_sortable() {
        let first = now_timestamp();
        let second = now_timestamp();

        assert_eq!(first.len(), second.len());
        assert!(first.ends_with('Z'));
        assert!(first <= second);
    }
}
