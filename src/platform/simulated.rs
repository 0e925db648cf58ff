/*!
 * Simulated Context Switch
 * Host-side stand-in for the assembly switch routine
 */

use super::ContextSwitch;
use crate::thread::MachineContext;

/// Register slot that receives the resume sequence number on save
const RESUME_SLOT: usize = 0;

/// One recorded handoff, identified by the stacks involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchRecord {
    pub from_stack: usize,
    pub to_stack: usize,
}

/// Switch primitive for running the core on a host
///
/// Host execution has no second stack to jump to, so the switch records the
/// handoff and returns at once. The caller then continues as the incoming
/// thread, resuming from its own earlier switch point.
#[derive(Debug, Default)]
pub struct SimulatedSwitch {
    history: Vec<SwitchRecord>,
}

impl SimulatedSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every handoff performed so far, oldest first
    pub fn history(&self) -> &[SwitchRecord] {
        &self.history
    }

    pub fn count(&self) -> usize {
        self.history.len()
    }

    pub fn last(&self) -> Option<SwitchRecord> {
        self.history.last().copied()
    }
}

impl ContextSwitch for SimulatedSwitch {
    unsafe fn switch(&mut self, from: *mut MachineContext, to: *const MachineContext) {
        // Read the incoming side before writing the outgoing one; they alias on
        // a self-switch.
        let to_stack = (*to).stack_pointer();
        let outgoing = &mut *from;
        let from_stack = outgoing.stack_pointer();
        outgoing.registers_mut()[RESUME_SLOT] = self.history.len() + 1;

        self.history.push(SwitchRecord {
            from_stack,
            to_stack,
        });
    }
}
