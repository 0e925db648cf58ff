/*!
 * Kernel Context
 *
 * The explicit context threaded through every scheduler call: interrupt
 * controller, switch primitive, thread table and the running-thread slot.
 */

use crate::core::{BurstTime, KernelConfig, Priority, SchedulerError, SchedulerResult, ThreadId};
use crate::interrupt::{IntStatus, InterruptControl, SimulatedInterrupts};
use crate::platform::{ContextSwitch, SimulatedSwitch};
use crate::thread::{Thread, ThreadStatus, ThreadTable};
use tracing::debug;

/// Name given to the thread that boots the kernel
pub const BOOTSTRAP_THREAD_NAME: &str = "main";

/// Per-processor kernel state shared with the scheduler
pub struct Kernel<I = SimulatedInterrupts, S = SimulatedSwitch> {
    pub interrupt: I,
    pub switcher: S,
    pub threads: ThreadTable,
    current: ThreadId,
    config: KernelConfig,
}

/// Kernel running on the host simulation platform
pub type SimulatedKernel = Kernel<SimulatedInterrupts, SimulatedSwitch>;

impl<I: InterruptControl, S: ContextSwitch> Kernel<I, S> {
    /// Build the context around the bootstrap thread, which is the first RUNNING thread
    pub fn new(config: KernelConfig, interrupt: I, switcher: S) -> Self {
        let mut threads = ThreadTable::new();
        let id = threads.allocate_id();
        threads.insert(Thread::bootstrap(id, BOOTSTRAP_THREAD_NAME));

        Self {
            interrupt,
            switcher,
            threads,
            current: id,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// The thread occupying the running slot
    #[inline]
    pub fn current(&self) -> ThreadId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: ThreadId) {
        self.current = id;
    }

    pub fn current_thread(&self) -> &Thread {
        self.threads.thread(self.current)
    }

    pub fn current_thread_mut(&mut self) -> &mut Thread {
        self.threads.thread_mut(self.current)
    }

    #[inline]
    pub fn interrupt_level(&self) -> IntStatus {
        self.interrupt.level()
    }

    /// Create a thread record with its own stack; it is not yet on any queue
    pub fn spawn(&mut self, name: &str, priority: Priority, burst_time: BurstTime) -> ThreadId {
        let id = self.threads.allocate_id();
        let thread = Thread::new(id, name, priority, burst_time, self.config.stack_words);
        self.threads.insert(thread);
        debug!(
            target: "thread",
            thread = %id,
            thread_name = name,
            priority,
            burst_time,
            "Thread created"
        );
        id
    }

    /// Look up a live thread
    pub fn thread(&self, id: ThreadId) -> SchedulerResult<&Thread> {
        self.threads.get(id).ok_or(SchedulerError::ThreadNotFound(id))
    }

    pub fn status(&self, id: ThreadId) -> Option<ThreadStatus> {
        self.threads.get(id).map(Thread::status)
    }

    pub fn name(&self, id: ThreadId) -> Option<&str> {
        self.threads.get(id).map(Thread::name)
    }
}

impl SimulatedKernel {
    /// Host kernel with interrupts still disabled, as after power-on
    pub fn simulated(config: KernelConfig) -> Self {
        Self::new(config, SimulatedInterrupts::new(), SimulatedSwitch::new())
    }
}
