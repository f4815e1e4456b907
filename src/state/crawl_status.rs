/// Crawl status definitions for URL records
///
/// A URL moves `Queued -> Running -> {Completed | Error}`; a user "stop"
/// moves a running URL back to `Queued`.
use std::fmt;

/// Represents the externally visible crawl state of a URL record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrawlStatus {
    /// Waiting to be crawled (initial state, or after a stop)
    #[default]
    Queued,

    /// A crawl invocation is in flight
    Running,

    /// The last crawl finished and its result was persisted
    Completed,

    /// The last crawl failed; the error message is kept on the record
    Error,
}

impl CrawlStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [CrawlStatus; 4] = [
        Self::Queued,
        Self::Running,
        Self::Completed,
        Self::Error,
    ];

    /// Returns true if a "start" trigger is accepted from this status
    ///
    /// Only a crawl that is already running is rejected.
    pub fn can_start(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns true if a "stop" trigger is accepted from this status
    pub fn can_stop(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Checks whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlStatus) -> bool {
        match (self, next) {
            (from, Self::Running) => from.can_start(),
            (Self::Running, Self::Completed | Self::Error | Self::Queued) => true,
            _ => false,
        }
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(Self::Queued),
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_string_roundtrip() {
        for status in CrawlStatus::ALL {
            assert_eq!(
                CrawlStatus::from_db_string(status.to_db_string()),
                Some(status)
            );
        }
        assert_eq!(CrawlStatus::from_db_string("paused"), None);
    }

    #[test]
    fn test_start_rejected_only_while_running() {
        assert!(CrawlStatus::Queued.can_start());
        assert!(CrawlStatus::Error.can_start());
        assert!(CrawlStatus::Completed.can_start());
        assert!(!CrawlStatus::Running.can_start());
    }

    #[test]
    fn test_stop_only_while_running() {
        assert!(CrawlStatus::Running.can_stop());
        assert!(!CrawlStatus::Queued.can_stop());
        assert!(!CrawlStatus::Completed.can_stop());
    }

    #[test]
    fn test_transitions() {
        use CrawlStatus::*;

        assert!(Queued.can_transition_to(Running));
        assert!(Error.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Running.can_transition_to(Error));
        assert!(Running.can_transition_to(Queued));

        assert!(!Running.can_transition_to(Running));
        assert!(!Queued.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Error));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlStatus::Running.to_string(), "running");
        assert_eq!(CrawlStatus::default(), CrawlStatus::Queued);
    }
}
