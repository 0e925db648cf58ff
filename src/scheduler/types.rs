/*!
 * Scheduler Types
 * Policy selection and its textual forms
 */

use crate::core::SchedulerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ready-queue ordering policy, chosen once when the scheduler is built
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// Strict FIFO; inserts append to the tail
    RoundRobin,
    /// FIFO-equivalent; inserts go through a comparator that always places them last
    FirstComeFirstServed,
    /// Lowest numeric priority first, insertion order among equals
    Priority,
    /// Reserved; no ordering is implemented and construction rejects it
    ShortestJobFirst,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 4] = [
        Self::RoundRobin,
        Self::FirstComeFirstServed,
        Self::Priority,
        Self::ShortestJobFirst,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::FirstComeFirstServed => "fcfs",
            Self::Priority => "priority",
            Self::ShortestJobFirst => "sjf",
        }
    }

    /// Whether the ready queue has an ordering for this policy
    #[inline]
    pub const fn is_implemented(&self) -> bool {
        !matches!(self, Self::ShortestJobFirst)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "fcfs" | "first_come_first_served" | "fifo" => Ok(Self::FirstComeFirstServed),
            "priority" | "prio" | "p" => Ok(Self::Priority),
            "sjf" | "shortest_job_first" => Ok(Self::ShortestJobFirst),
            _ => Err(SchedulerError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::RoundRobin
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
