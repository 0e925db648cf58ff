/*!
 * Ready Queue
 * Threads eligible to run, ordered by the scheduler's policy
 */

use super::entry::ReadyEntry;
use super::policy::ReadyOrdering;
use super::Scheduler;
use crate::core::ThreadId;
use crate::interrupt::{self, InterruptControl};
use crate::kernel::Kernel;
use crate::platform::ContextSwitch;
use crate::thread::{ThreadStatus, ThreadTable};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug)]
pub(crate) struct ReadyQueue {
    entries: VecDeque<ReadyEntry>,
    ordering: ReadyOrdering,
}

impl ReadyQueue {
    pub fn new(ordering: ReadyOrdering) -> Self {
        Self {
            entries: VecDeque::new(),
            ordering,
        }
    }

    pub fn insert(&mut self, entry: ReadyEntry) {
        if !self.ordering.is_sorted() {
            self.entries.push_back(entry);
            return;
        }

        let ordering = self.ordering;
        match self
            .entries
            .iter()
            .position(|queued| ordering.precedes(&entry, queued))
        {
            Some(pos) => self.entries.insert(pos, entry),
            None => self.entries.push_back(entry),
        }
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<ReadyEntry> {
        self.entries.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ThreadId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadyEntry> {
        self.entries.iter()
    }
}

impl Scheduler {
    /// Mark a thread ready, but not running, and queue it per policy
    ///
    /// Interrupts must already be disabled.
    pub fn ready_to_run<I, S>(&mut self, cx: &mut Kernel<I, S>, id: ThreadId)
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        interrupt::assert_disabled(&cx.interrupt, "ReadyToRun");
        debug_assert!(!self.ready.contains(id), "thread {} is already ready", id);

        let thread = cx.threads.thread_mut(id);
        debug!(target: "thread", thread = %thread, "Putting thread on ready list");

        thread.set_status(ThreadStatus::Ready);
        self.ready.insert(ReadyEntry::new(id, thread.priority()));
    }

    /// Remove and return the next thread to dispatch, or `None` if nobody is ready
    ///
    /// Interrupts must already be disabled. The thread's status is left alone;
    /// [`Scheduler::run`] marks it running.
    pub fn find_next_to_run<I, S>(&mut self, cx: &Kernel<I, S>) -> Option<ThreadId>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        interrupt::assert_disabled(&cx.interrupt, "FindNextToRun");
        self.ready.pop_front().map(|entry| entry.id)
    }

    /// Log the ready list contents
    pub fn print<I, S>(&self, cx: &Kernel<I, S>)
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        info!("{}", self.ready_list(&cx.threads));
    }

    /// Displayable view of the ready list
    pub fn ready_list<'a>(&'a self, threads: &'a ThreadTable) -> ReadyList<'a> {
        ReadyList {
            scheduler: self,
            threads,
        }
    }

    /// Queued thread ids, head first
    pub fn ready_ids(&self) -> Vec<ThreadId> {
        self.ready.iter().map(|e| e.id).collect()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }
}

/// Ready list rendering used by [`Scheduler::print`]
pub struct ReadyList<'a> {
    scheduler: &'a Scheduler,
    threads: &'a ThreadTable,
}

impl fmt::Display for ReadyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ready list contents:")?;
        for entry in self.scheduler.ready.iter() {
            match self.threads.get(entry.id) {
                Some(thread) => write!(f, " {},", thread.name())?,
                None => write!(f, " {},", entry.id)?,
            }
        }
        Ok(())
    }
}
