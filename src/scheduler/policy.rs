/*!
 * Ready-Queue Ordering
 * One ordering strategy per implemented policy
 */

use super::entry::ReadyEntry;
use super::types::SchedulingPolicy;
use crate::core::{SchedulerError, SchedulerResult};

/// Insertion strategy derived from the policy at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadyOrdering {
    /// Plain append, no comparison (round robin)
    Append,
    /// Sorted insert whose comparator never ranks a newcomer ahead (FCFS)
    Arrival,
    /// Sorted insert, lower priority value first, stable among equals
    AscendingPriority,
}

impl ReadyOrdering {
    /// Resolve the strategy for a policy, refusing policies without one
    pub fn for_policy(policy: SchedulingPolicy) -> SchedulerResult<Self> {
        match policy {
            SchedulingPolicy::RoundRobin => Ok(Self::Append),
            SchedulingPolicy::FirstComeFirstServed => Ok(Self::Arrival),
            SchedulingPolicy::Priority => Ok(Self::AscendingPriority),
            SchedulingPolicy::ShortestJobFirst => Err(SchedulerError::UnsupportedPolicy(policy)),
        }
    }

    /// Whether `incoming` belongs ahead of the already queued `queued`
    ///
    /// Equal keys answer `false`, which keeps sorted inserts stable.
    #[inline]
    pub fn precedes(self, incoming: &ReadyEntry, queued: &ReadyEntry) -> bool {
        match self {
            Self::Append | Self::Arrival => false,
            Self::AscendingPriority => incoming.priority < queued.priority,
        }
    }

    #[inline]
    pub fn is_sorted(self) -> bool {
        !matches!(self, Self::Append)
    }
}
