/*!
 * Machine Context
 * Saved register state handed to the switch primitive
 */

use crate::core::MACHINE_STATE_SIZE;

/// Opaque per-thread machine state
///
/// The scheduler never reads these fields. Only the platform switch routine
/// interprets them.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineContext {
    stack_pointer: usize,
    registers: [usize; MACHINE_STATE_SIZE],
}

impl MachineContext {
    pub const fn new(stack_pointer: usize) -> Self {
        Self {
            stack_pointer,
            registers: [0; MACHINE_STATE_SIZE],
        }
    }

    #[inline]
    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    #[inline]
    pub fn registers(&self) -> &[usize; MACHINE_STATE_SIZE] {
        &self.registers
    }

    #[inline]
    pub fn registers_mut(&mut self) -> &mut [usize; MACHINE_STATE_SIZE] {
        &mut self.registers
    }
}

impl Default for MachineContext {
    fn default() -> Self {
        Self::new(0)
    }
}
