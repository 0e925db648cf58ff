/*!
 * System Limits and Constants
 *
 * Stack geometry and machine-context sizing for kernel threads.
 */

// =============================================================================
// THREAD STACKS
// =============================================================================

/// Marker word written at the lowest address of every allocated stack.
/// A thread whose marker no longer reads back has overrun its stack.
pub const STACK_FENCEPOST: usize = 0xdedb_eef;

/// Default stack size for forked threads, in machine words
pub const DEFAULT_STACK_WORDS: usize = 8 * 1024;

/// Smallest stack the kernel will hand out, in machine words
pub const MIN_STACK_WORDS: usize = 64;

/// Stack pointer alignment required by the switch primitive (bytes)
pub const STACK_ALIGN: usize = 16;

// =============================================================================
// MACHINE CONTEXT
// =============================================================================

/// Number of callee-saved register slots kept per thread
pub const MACHINE_STATE_SIZE: usize = 18;
