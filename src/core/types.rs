/*!
 * Core Types
 * Common types used across the dispatch core
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling priority (lower values run first under the priority policy)
pub type Priority = i32;

/// Caller-estimated CPU burst, kept for burst-ordered policies
pub type BurstTime = u32;

/// Timer ticks, the unit of sleep accounting
pub type Ticks = u32;

/// Stable thread identity used for diagnostics and queue membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(u64);

impl ThreadId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
