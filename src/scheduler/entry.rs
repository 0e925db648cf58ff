/*!
 * Scheduler Entry Types
 * Queue records for ready and sleeping threads
 */

use crate::core::{Priority, ThreadId, Ticks};

/// Ready-queue record; the priority is captured when the thread is queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadyEntry {
    pub id: ThreadId,
    pub priority: Priority,
}

impl ReadyEntry {
    pub fn new(id: ThreadId, priority: Priority) -> Self {
        Self { id, priority }
    }
}

/// Sleep-queue record: a blocked thread and the ticks it still has to wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepEntry {
    pub(crate) id: ThreadId,
    pub(crate) remaining: Ticks,
}

impl SleepEntry {
    pub fn new(id: ThreadId, remaining: Ticks) -> Self {
        Self { id, remaining }
    }

    #[inline]
    pub fn thread(&self) -> ThreadId {
        self.id
    }

    #[inline]
    pub fn remaining(&self) -> Ticks {
        self.remaining
    }
}
