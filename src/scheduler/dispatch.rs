/*!
 * Dispatcher
 * Handoff of the processor from the running thread to the next one
 */

use super::Scheduler;
use crate::core::ThreadId;
use crate::interrupt::{self, InterruptControl};
use crate::kernel::Kernel;
use crate::platform::ContextSwitch;
use crate::thread::{MachineContext, ThreadStatus};
use tracing::debug;

impl Scheduler {
    /// Dispatch the processor to `next`
    ///
    /// Interrupts must already be disabled and the outgoing thread's status must
    /// already be updated by the caller (ready, blocked, or finishing). With
    /// `finishing` set, the outgoing record moves into the destruction slot; it
    /// is dropped only after the switch, once nothing runs on its stack.
    ///
    /// On hardware this returns only when some later `run` picks the calling
    /// thread again.
    pub fn run<I, S>(&mut self, cx: &mut Kernel<I, S>, next: ThreadId, finishing: bool)
    where
        I: InterruptControl,
        S: ContextSwitch,
    {
        interrupt::assert_disabled(&cx.interrupt, "Run");
        assert!(
            cx.threads.contains(next),
            "dispatch target {} is not a live thread",
            next
        );

        let old = cx.current();

        let from: *mut MachineContext = if finishing {
            if let Some(pending) = &self.to_be_destroyed {
                panic!(
                    "thread {} is still awaiting destruction; cannot retire {}",
                    pending,
                    old
                );
            }
            assert_ne!(old, next, "a finishing thread cannot be dispatched to itself");

            let mut retiring = match cx.threads.remove(old) {
                Some(thread) => thread,
                None => panic!("running thread {} is not a live thread", old),
            };
            retiring.set_status(ThreadStatus::Finishing);
            retiring.save_user_state();
            retiring.check_overflow();

            let slot = self.to_be_destroyed.insert(retiring);
            slot.context_mut() as *mut MachineContext
        } else {
            let outgoing = cx.threads.thread_mut(old);
            outgoing.save_user_state();
            outgoing.check_overflow();
            outgoing.context_mut() as *mut MachineContext
        };

        cx.set_current(next);
        let incoming = cx.threads.thread_mut(next);
        incoming.set_status(ThreadStatus::Running);
        let to = if next == old {
            from as *const MachineContext
        } else {
            incoming.context() as *const MachineContext
        };

        debug!(target: "thread", from = %old, to = %next, finishing, "Switching threads");

        // SAFETY: both contexts live in boxed records (table or destruction slot)
        // that are neither moved nor dropped before the switch returns, and
        // interrupts are off.
        unsafe { cx.switcher.switch(from, to) };

        // Back on some thread's stack; interrupts are still off.
        interrupt::assert_disabled(&cx.interrupt, "Run (resumed)");
        debug!(target: "thread", thread = %cx.current(), "Now in thread");

        self.check_to_be_destroyed();
        cx.current_thread_mut().restore_user_state();
    }

    /// Destroy the thread parked in the destruction slot, if any
    ///
    /// Runs at the tail of every resumed [`Scheduler::run`]; calling it anywhere
    /// else is harmless.
    pub fn check_to_be_destroyed(&mut self) {
        if let Some(thread) = self.to_be_destroyed.take() {
            debug!(target: "thread", thread = %thread, "Destroying finished thread");
            drop(thread);
        }
    }

    /// Thread currently parked for destruction
    pub fn pending_destruction(&self) -> Option<ThreadId> {
        self.to_be_destroyed.as_ref().map(|t| t.id())
    }
}
