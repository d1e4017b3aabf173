//! Engine configuration.

/// Limits applied to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Stop with [`RuntimeError::StepLimitExceeded`](crate::RuntimeError::StepLimitExceeded)
    /// after this many steps. `None` runs until `@`.
    pub max_steps: Option<u64>,
}

impl EngineConfig {
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }
}
