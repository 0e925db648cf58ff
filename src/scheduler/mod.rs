/*!
 * Thread Scheduler
 * Ready queue, sleep queue, and dispatcher for a single processor
 *
 * Every operation assumes interrupts are disabled while it touches scheduler
 * state; there are no locks.
 */

use crate::core::SchedulerResult;
use crate::thread::Thread;
use tracing::{debug, info};

mod dispatch;
mod entry;
mod lifecycle;
mod policy;
mod ready;
mod sleep;
pub mod types;

use policy::ReadyOrdering;
use ready::ReadyQueue;
use sleep::SleepQueue;

// Re-export public API
pub use entry::SleepEntry;
pub use ready::ReadyList;
pub use types::SchedulingPolicy;

/// Thread scheduler
///
/// Holds only queue and handoff state. Thread records live in the kernel's
/// thread table and are passed in with each call.
#[derive(Debug)]
pub struct Scheduler {
    policy: SchedulingPolicy,
    ready: ReadyQueue,
    sleeping: SleepQueue,

    // Record of a thread that finished and must not be freed on its own stack
    to_be_destroyed: Option<Box<Thread>>,

    // Set by the most recent tick if it woke anyone
    woke_up: bool,
}

impl Scheduler {
    /// Create a scheduler with empty queues
    ///
    /// Fails for a policy with no ready-queue ordering.
    pub fn new(policy: SchedulingPolicy) -> SchedulerResult<Self> {
        let ordering = ReadyOrdering::for_policy(policy)?;
        info!("Scheduler initialized: policy={}", policy);

        Ok(Self {
            policy,
            ready: ReadyQueue::new(ordering),
            sleeping: SleepQueue::new(),
            to_be_destroyed: None,
            woke_up: false,
        })
    }

    #[inline]
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if !self.sleeping.is_empty() {
            let abandoned: Vec<_> = self.sleeping.iter().map(|e| e.id.to_string()).collect();
            debug!(
                target: "thread",
                count = abandoned.len(),
                threads = %abandoned.join(", "),
                "Scheduler dropped with sleeping threads"
            );
        }
    }
}
