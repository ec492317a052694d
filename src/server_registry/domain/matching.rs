//! Ordering of matching query results.

use super::ServerRecord;
use std::cmp::Ordering;

/// Order in which matching records are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchOrder {
    /// Ascending identifier.
    #[default]
    Identifier,
    /// Most remaining capacity first, ties by ascending identifier.
    MostAvailable,
}

impl MatchOrder {
    /// Compares two matching records.
    #[must_use]
    pub fn compare(self, left: &ServerRecord, right: &ServerRecord) -> Ordering {
        let by_identifier = left.identifier().cmp(right.identifier());
        match self {
            Self::Identifier => by_identifier,
            Self::MostAvailable => right
                .remaining_capacity()
                .cmp(&left.remaining_capacity())
                .then(by_identifier),
        }
    }

    /// Sorts matching records in place.
    pub fn sort(self, records: &mut [ServerRecord]) {
        records.sort_by(|left, right| self.compare(left, right));
    }
}
