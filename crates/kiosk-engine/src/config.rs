//! # Engine Configuration
//!
//! Report knobs that were hardcoded constants at the original till. Both
//! default to the values operators are used to; deployments can override
//! them at construction.

use kiosk_core::{DEFAULT_REORDER_THRESHOLD, DEFAULT_TOP_SELLER_COUNT};

/// Engine configuration.
///
/// ## Example
/// ```rust
/// use kiosk_engine::EngineConfig;
///
/// let config = EngineConfig::default().reorder_threshold(10);
/// assert_eq!(config.reorder_threshold, 10);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Stock level at or below which a product lands on the reorder list.
    pub reorder_threshold: i64,

    /// Number of rows in the top-sellers ranking.
    pub top_seller_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            reorder_threshold: DEFAULT_REORDER_THRESHOLD,
            top_seller_count: DEFAULT_TOP_SELLER_COUNT,
        }
    }
}

impl EngineConfig {
    /// Sets the reorder threshold.
    pub fn reorder_threshold(mut self, threshold: i64) -> Self {
        self.reorder_threshold = threshold;
        self
    }

    /// Sets the top-seller row count.
    pub fn top_seller_count(mut self, count: usize) -> Self {
        self.top_seller_count = count;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_till_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.reorder_threshold, 5);
        assert_eq!(config.top_seller_count, 5);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .reorder_threshold(10)
            .top_seller_count(3);
        assert_eq!(config.reorder_threshold, 10);
        assert_eq!(config.top_seller_count, 3);
    }
}
