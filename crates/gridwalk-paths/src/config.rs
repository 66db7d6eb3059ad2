use std::time::Duration;

/// Pause between search expansions unless configured otherwise.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(80);
/// Pause between path-trace steps unless configured otherwise.
pub const DEFAULT_PATH_DELAY: Duration = Duration::from_millis(170);

/// Step pacing for a [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub search_delay: Duration,
    pub path_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_delay: DEFAULT_SEARCH_DELAY,
            path_delay: DEFAULT_PATH_DELAY,
        }
    }
}

impl SearchConfig {
    /// No pauses at all; useful for headless runs.
    pub const fn instant() -> Self {
        Self {
            search_delay: Duration::ZERO,
            path_delay: Duration::ZERO,
        }
    }
}
