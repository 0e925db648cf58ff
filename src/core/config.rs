/*!
 * Kernel Configuration
 *
 * Construction-time settings for the dispatch core, loadable from the environment
 * or any serde source.
 */

use super::errors::ConfigError;
use super::limits::{DEFAULT_STACK_WORDS, MIN_STACK_WORDS};
use crate::scheduler::SchedulingPolicy;
use serde::{Deserialize, Serialize};

/// Kernel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Ready-queue ordering, fixed for the scheduler's lifetime (default: round robin)
    pub policy: SchedulingPolicy,

    /// Stack size for forked threads in machine words (default: 8Ki)
    pub stack_words: usize,
}

impl KernelConfig {
    /// Environment variable selecting the scheduling policy
    pub const POLICY_VAR: &'static str = "KERNEL_SCHED_POLICY";

    /// Environment variable overriding the thread stack size
    pub const STACK_WORDS_VAR: &'static str = "KERNEL_STACK_WORDS";

    pub fn new() -> Self {
        Self {
            policy: SchedulingPolicy::RoundRobin,
            stack_words: DEFAULT_STACK_WORDS,
        }
    }

    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_stack_words(mut self, stack_words: usize) -> Self {
        self.stack_words = stack_words;
        self
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(Self::POLICY_VAR) {
            config.policy = raw
                .parse()
                .map_err(|e: crate::core::SchedulerError| ConfigError::InvalidValue {
                    key: Self::POLICY_VAR.into(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(raw) = lookup(Self::STACK_WORDS_VAR) {
            config.stack_words =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: Self::STACK_WORDS_VAR.into(),
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the thread layer cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_words < MIN_STACK_WORDS {
            return Err(ConfigError::InvalidValue {
                key: Self::STACK_WORDS_VAR.into(),
                value: self.stack_words.to_string(),
                reason: format!("stacks need at least {} words", MIN_STACK_WORDS),
            });
        }
        Ok(())
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::new()
    }
}
