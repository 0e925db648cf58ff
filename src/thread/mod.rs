/*!
 * Thread State
 * Per-thread status, ordering attributes and machine context
 */

mod context;
mod stack;
mod table;

pub use context::MachineContext;
pub use stack::Stack;
pub use table::ThreadTable;

use crate::core::{BurstTime, Priority, ThreadId};
use crate::platform::AddressSpace;
use std::fmt;

/// Thread life-cycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadStatus {
    Ready,
    Running,
    Blocked,
    Finishing,
}

/// Kernel thread record
///
/// Queues refer to threads by [`ThreadId`]; the record itself lives in the
/// [`ThreadTable`] until the dispatcher moves it into the destruction slot.
pub struct Thread {
    id: ThreadId,
    name: String,
    status: ThreadStatus,
    priority: Priority,
    burst_time: BurstTime,
    context: MachineContext,
    stack: Option<Stack>,
    space: Option<Box<dyn AddressSpace>>,
}

impl Thread {
    /// Create a forked thread with its own stack, initially ready
    pub fn new(
        id: ThreadId,
        name: impl Into<String>,
        priority: Priority,
        burst_time: BurstTime,
        stack_words: usize,
    ) -> Self {
        let stack = Stack::new(stack_words);
        Self {
            id,
            name: name.into(),
            status: ThreadStatus::Ready,
            priority,
            burst_time,
            context: MachineContext::new(stack.top()),
            stack: Some(stack),
            space: None,
        }
    }

    /// Create the bootstrap thread, which already runs on the boot stack
    pub fn bootstrap(id: ThreadId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: ThreadStatus::Running,
            priority: 0,
            burst_time: 0,
            context: MachineContext::default(),
            stack: None,
            space: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ThreadId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn status(&self) -> ThreadStatus {
        self.status
    }

    #[inline]
    pub fn set_status(&mut self, status: ThreadStatus) {
        self.status = status;
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Takes effect the next time the thread is queued; a queued entry keeps
    /// the priority it was inserted with.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    #[inline]
    pub fn burst_time(&self) -> BurstTime {
        self.burst_time
    }

    pub fn set_burst_time(&mut self, burst_time: BurstTime) {
        self.burst_time = burst_time;
    }

    #[inline]
    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    #[inline]
    pub(crate) fn context_mut(&mut self) -> &mut MachineContext {
        &mut self.context
    }

    pub fn stack(&self) -> Option<&Stack> {
        self.stack.as_ref()
    }

    /// Attach a user address space; the dispatcher saves and restores it around switches
    pub fn attach_space(&mut self, space: Box<dyn AddressSpace>) {
        self.space = Some(space);
    }

    pub fn has_space(&self) -> bool {
        self.space.is_some()
    }

    pub(crate) fn save_user_state(&mut self) {
        if let Some(space) = self.space.as_mut() {
            space.save_state();
        }
    }

    pub(crate) fn restore_user_state(&mut self) {
        if let Some(space) = self.space.as_mut() {
            space.restore_state();
        }
    }

    /// Panic if the thread has run off the end of its stack
    #[track_caller]
    pub fn check_overflow(&self) {
        if let Some(stack) = &self.stack {
            assert!(
                stack.is_intact(),
                "thread {} ({}) overflowed its stack",
                self.id,
                self.name
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn stack_mut(&mut self) -> Option<&mut Stack> {
        self.stack.as_mut()
    }
}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .field("priority", &self.priority)
            .field("burst_time", &self.burst_time)
            .field("stack", &self.stack)
            .field("has_space", &self.space.is_some())
            .finish()
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}
