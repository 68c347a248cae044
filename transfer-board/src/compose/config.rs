//! Configuration for journey composition.

/// Configuration parameters for composing journeys.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Maximum number of second-leg lookups issued concurrently.
    /// 1 runs them strictly one after another.
    pub batch_size: usize,
}

impl ComposeConfig {
    /// Create a new configuration with the given batch size.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// One second-leg lookup at a time.
    pub fn sequential() -> Self {
        Self::new(1)
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self { batch_size: 4 }
    }
}
