/*!
 * Sleep Queue & Tick Driver
 * Bounded sleeps counted in timer ticks
 */

use super::entry::SleepEntry;
use super::Scheduler;
use crate::core::{SchedulerResult, ThreadId, Ticks};
use crate::interrupt::{self, IntStatus, InterruptControl};
use crate::kernel::Kernel;
use crate::platform::ContextSwitch;
use crate::thread::ThreadStatus;
use std::collections::VecDeque;
use tracing::debug;

/// Sleeping threads, kept sorted ascending by remaining ticks
#[derive(Debug, Default)]
pub(crate) struct SleepQueue {
    entries: VecDeque<SleepEntry>,
}

impl SleepQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after every entry with the same or fewer remaining ticks
    pub fn insert(&mut self, entry: SleepEntry) {
        let pos = self
            .entries
            .iter()
            .position(|queued| entry.remaining < queued.remaining)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }

    /// Advance every sleeper by one tick
    pub fn tick(&mut self) {
        for entry in self.entries.iter_mut() {
            debug_assert!(entry.remaining > 0, "expired sleeper left on the queue");
            entry.remaining = entry.remaining.saturating_sub(1);
        }
    }

    /// Pop the head if its sleep has run out
    pub fn pop_expired(&mut self) -> Option<SleepEntry> {
        match self.entries.front() {
            Some(head) if head.remaining == 0 => self.entries.pop_front(),
            _ => None,
        }
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

    pub fn iter(&self) -> impl Iterator<Item = &SleepEntry> {
        self.entries.iter()
    }

    pub fn is_sorted(&self) -> bool {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(a, b)| a.remaining <= b.remaining)
    }
}

impl Scheduler {
    /// Put the running thread to sleep for `ticks` timer ticks
    ///
    /// Disables interrupts itself, blocks through the dispatcher, and restores the
    /// caller's interrupt level once the thread has been rescheduled.
    pub fn go_sleep<I, S>(&mut self, cx: &mut Kernel<I, S>, id: ThreadId, ticks: Ticks) -> SchedulerResult<()>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        assert!(ticks > 0, "sleep duration must be at least one tick");
        let old_level = cx.interrupt.set_level(IntStatus::Off);

        assert_eq!(
            id,
            cx.current(),
            "only the running thread can put itself to sleep"
        );
        debug_assert!(!self.sleeping.contains(id), "thread {} is already asleep", id);

        self.sleeping.insert(SleepEntry::new(id, ticks));
        let thread = cx.threads.thread_mut(id);
        thread.set_status(ThreadStatus::Blocked);
        debug!(target: "thread", thread = %thread, ticks, "Going to sleep");

        let outcome = self.sleep_current(cx, false);

        cx.interrupt.set_level(old_level);
        outcome
    }

    /// Advance the sleep queue by one timer tick
    ///
    /// Interrupts must already be disabled. Every sleeper loses one tick, then
    /// expired sleepers move to the ready queue in the order they expired.
    /// Returns whether any thread woke.
    pub fn alarm_ticks<I, S>(&mut self, cx: &mut Kernel<I, S>) -> bool
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        interrupt::assert_disabled(&cx.interrupt, "AlarmTicks");

        self.woke_up = false;
        self.sleeping.tick();

        while let Some(entry) = self.sleeping.pop_expired() {
            debug!(target: "thread", thread = %entry.id, "Waking sleeper");
            self.ready_to_run(cx, entry.id);
            self.woke_up = true;
        }

        debug_assert!(self.sleeping.is_sorted());
        self.woke_up
    }

    /// Whether the most recent tick woke at least one thread
    #[inline]
    pub fn thread_woke_up(&self) -> bool {
        self.woke_up
    }

    /// Sleepers and their remaining ticks, soonest first
    pub fn sleeping(&self) -> Vec<SleepEntry> {
        self.sleeping.iter().copied().collect()
    }

    pub fn sleeping_len(&self) -> usize {
        self.sleeping.len()
    }

    pub fn is_sleeping(&self, id: ThreadId) -> bool {
        self.sleeping.contains(id)
    }
}
