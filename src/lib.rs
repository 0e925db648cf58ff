/*!
 * Uniprocessor Kernel Library
 * Thread dispatch core: ready queue, sleep queue, and dispatcher
 */

pub mod core;
pub mod interrupt;
pub mod kernel;
pub mod monitoring;
pub mod platform;
pub mod scheduler;
pub mod thread;

// Re-exports
pub use crate::core::{
    BurstTime, ConfigError, KernelConfig, Priority, SchedulerError, SchedulerResult, ThreadId,
    Ticks, DEFAULT_STACK_WORDS, MIN_STACK_WORDS,
};
pub use interrupt::{IntStatus, InterruptControl, SimulatedInterrupts};
pub use kernel::{Kernel, SimulatedKernel, BOOTSTRAP_THREAD_NAME};
pub use monitoring::{init_test_tracing, init_tracing};
pub use platform::{AddressSpace, ContextSwitch, SimulatedSwitch, SwitchRecord};
pub use scheduler::{ReadyList, Scheduler, SchedulingPolicy, SleepEntry};
pub use thread::{MachineContext, Stack, Thread, ThreadStatus, ThreadTable};
