//! Fetch kinds and their status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent catalog fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// First page of the listing.
    Primary,
    /// Following page appended to the primary listing.
    More,
    /// Name search.
    Search,
}

impl FetchKind {
    /// All kinds, in slot order.
    pub const ALL: [FetchKind; 3] = [FetchKind::Primary, FetchKind::More, FetchKind::Search];

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::More => "more",
            Self::Search => "search",
        }
    }

    /// User-visible message recorded when this kind fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Primary => "Failed to fetch starships",
            Self::More => "Failed to load more starships",
            Self::Search => "Failed to search starships",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        match self {
            Self::Primary => 0,
            Self::More => 1,
            Self::Search => 2,
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status of a fetch kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum FetchStatus {
    /// Never issued, or superseded before completing.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Last applied response succeeded.
    Success,
    /// Last applied response failed.
    Failure(String),
}

impl FetchStatus {
    /// Check if a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one issued request.
///
/// Sequence numbers grow per kind; only the ticket matching the latest issued
/// number may change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Fetch kind.
    pub kind: FetchKind,
    /// Sequence number within the kind.
    pub seq: u64,
}

/// Result of offering a response to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State was updated.
    Applied,
    /// A newer request of the same kind was issued; response discarded.
    Stale,
    /// Response was current but had nothing to attach to.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(FetchKind::Primary.failure_message(), "Failed to fetch starships");
        assert_eq!(FetchKind::More.failure_message(), "Failed to load more starships");
        assert_eq!(FetchKind::Search.failure_message(), "Failed to search starships");
    }

    #[test]
    fn test_slots_are_distinct() {
        let slots: Vec<usize> = FetchKind::ALL.iter().map(FetchKind::slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_status_helpers() {
        assert!(FetchStatus::Loading.is_loading());
        assert!(!FetchStatus::Idle.is_loading());
        assert_eq!(FetchStatus::Failure("boom".into()).error(), Some("boom"));
        assert_eq!(FetchStatus::Success.error(), None);
    }
}
