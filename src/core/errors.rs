/*!
 * Error Types
 * Recoverable scheduler and configuration errors with thiserror, miette, and serde support
 *
 * Broken invariants (interrupts enabled inside a mutator, a second thread queued
 * for destruction, an unknown dispatch target) are kernel defects and panic instead.
 */

use super::types::ThreadId;
use crate::scheduler::SchedulingPolicy;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Scheduling policy {0} has no ordering implemented")]
    #[diagnostic(
        code(scheduler::unsupported_policy),
        help("Shortest-job-first is reserved. Use round_robin, fcfs, or priority.")
    )]
    UnsupportedPolicy(SchedulingPolicy),

    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Valid policies: round_robin (rr), fcfs, priority (p), sjf.")
    )]
    InvalidPolicy(String),

    #[error("No threads ready or runnable, and no pending wakeups")]
    #[diagnostic(
        code(scheduler::no_runnable_threads),
        help("Every thread is blocked outside the sleep queue or finished. The machine halts here.")
    )]
    NoRunnableThreads,

    #[error("Thread {0} not found")]
    #[diagnostic(
        code(scheduler::thread_not_found),
        help("The thread may have finished and been destroyed.")
    )]
    ThreadNotFound(ThreadId),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Unset the variable to fall back to the default.")
    )]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Result alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
