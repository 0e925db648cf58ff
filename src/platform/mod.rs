/*!
 * Platform Boundary
 *
 * The register-level context switch and the optional user address-space hooks.
 * This is the only place the dispatch core crosses into unsafe code.
 */

mod simulated;

pub use simulated::{SimulatedSwitch, SwitchRecord};

use crate::thread::MachineContext;

/// Machine-dependent context switch
pub trait ContextSwitch {
    /// Save the running machine state into `from` and load `to`, including the
    /// stack pointer.
    ///
    /// On real hardware this does not return to the caller until some later
    /// switch names `from` as its target again.
    ///
    /// # Safety
    ///
    /// - `from` and `to` must point to live contexts of boxed thread records
    /// - neither record may move or be dropped until the switch back to `from`
    /// - interrupts must be disabled
    /// - `from` and `to` may be equal when a thread is re-dispatched to itself
    unsafe fn switch(&mut self, from: *mut MachineContext, to: *const MachineContext);
}

/// User-mode address space attached to a thread
///
/// Kernel-only threads carry none and the dispatcher skips both hooks.
#[cfg_attr(test, mockall::automock)]
pub trait AddressSpace {
    /// Save user registers and translation state before the thread is switched out
    fn save_state(&mut self);

    /// Reload user registers and translation state once the thread runs again
    fn restore_state(&mut self);
}
