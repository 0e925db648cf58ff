/*!
 * Thread Life Cycle
 * Fork, yield, block, and finish on top of the queues and the dispatcher
 */

use super::Scheduler;
use crate::core::{BurstTime, Priority, SchedulerError, SchedulerResult, ThreadId};
use crate::interrupt::{self, IntStatus, InterruptControl};
use crate::kernel::Kernel;
use crate::platform::ContextSwitch;
use crate::thread::ThreadStatus;
use tracing::{debug, warn};

impl Scheduler {
    /// Create a thread and make it ready to run
    pub fn fork<I, S>(
        &mut self,
        cx: &mut Kernel<I, S>,
        name: &str,
        priority: Priority,
        burst_time: BurstTime,
    ) -> ThreadId
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        let id = cx.spawn(name, priority, burst_time);

        let old_level = cx.interrupt.set_level(IntStatus::Off);
        self.ready_to_run(cx, id);
        cx.interrupt.set_level(old_level);

        id
    }

    /// Give up the processor if anyone else is ready
    ///
    /// The running thread goes back on the ready queue behind its peers.
    /// Returns the thread that was dispatched, or `None` if nobody was waiting.
    pub fn yield_cpu<I, S>(&mut self, cx: &mut Kernel<I, S>) -> Option<ThreadId>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        let old_level = cx.interrupt.set_level(IntStatus::Off);
        debug!(target: "thread", thread = %cx.current(), "Yielding");

        let next = self.find_next_to_run(cx);
        if let Some(next) = next {
            let current = cx.current();
            self.ready_to_run(cx, current);
            self.run(cx, next, false);
        }

        cx.interrupt.set_level(old_level);
        next
    }

    /// Relinquish the processor because the running thread blocked or finished
    ///
    /// Interrupts must already be disabled and the caller must have moved the
    /// running thread out of `Running`. Idles through timer ticks while the
    /// ready queue is empty; fails only when nothing can ever become ready.
    pub fn sleep_current<I, S>(&mut self, cx: &mut Kernel<I, S>, finishing: bool) -> SchedulerResult<()>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        interrupt::assert_disabled(&cx.interrupt, "Sleep");
        assert_ne!(
            cx.current_thread().status(),
            ThreadStatus::Running,
            "thread {} went to sleep while still marked running",
            cx.current()
        );

        let next = loop {
            match self.find_next_to_run(cx) {
                Some(next) => break next,
                None => self.idle(cx)?,
            }
        };

        self.run(cx, next, finishing);
        Ok(())
    }

    /// Retire the running thread
    ///
    /// Interrupts are left disabled; the next thread restores its own level
    /// when it resumes.
    pub fn finish_current<I, S>(&mut self, cx: &mut Kernel<I, S>) -> SchedulerResult<()>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        cx.interrupt.set_level(IntStatus::Off);

        let thread = cx.current_thread_mut();
        debug!(target: "thread", thread = %thread, "Finishing thread");
        thread.set_status(ThreadStatus::Finishing);

        self.sleep_current(cx, true)
    }

    /// Timer interrupt entry point
    ///
    /// Returns whether the tick woke a sleeper, in which case the caller
    /// should yield on return from the interrupt.
    pub fn timer_tick<I, S>(&mut self, cx: &mut Kernel<I, S>) -> bool
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        let old_level = cx.interrupt.set_level(IntStatus::Off);
        let woke = self.alarm_ticks(cx);
        cx.interrupt.set_level(old_level);
        woke
    }

    /// Wait for the next tick with nothing to run
    fn idle<I, S>(&mut self, cx: &mut Kernel<I, S>) -> SchedulerResult<()>
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        if self.sleeping.is_empty() {
            warn!(
                thread = %cx.current(),
                "No threads ready or sleeping; nothing left to run"
            );
            return Err(SchedulerError::NoRunnableThreads);
        }

        self.alarm_ticks(cx);
        Ok(())
    }
}
