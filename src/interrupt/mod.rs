/*!
 * Interrupt Level Control
 *
 * On a single processor, disabling interrupts is the only mutual exclusion the
 * dispatch core uses. Queue mutators assert the level and never set it.
 */

/// Processor interrupt level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntStatus {
    Off,
    On,
}

/// Interrupt subsystem interface consumed by the scheduler
pub trait InterruptControl {
    /// Current interrupt level
    fn level(&self) -> IntStatus;

    /// Atomically switch to `level`, returning the previous level
    fn set_level(&mut self, level: IntStatus) -> IntStatus;
}

/// Panic unless interrupts are disabled
///
/// Every structural mutation of the ready queue, sleep queue and destruction slot
/// runs under this precondition.
#[track_caller]
#[inline]
pub fn assert_disabled<C: InterruptControl + ?Sized>(interrupt: &C, operation: &'static str) {
    assert_eq!(
        interrupt.level(),
        IntStatus::Off,
        "{} requires interrupts to be disabled",
        operation
    );
}

/// Host-side interrupt controller: a plain level flag
///
/// Starts disabled, as the machine does at power-on.
#[derive(Debug, Clone)]
pub struct SimulatedInterrupts {
    level: IntStatus,
    transitions: u64,
}

impl SimulatedInterrupts {
    pub fn new() -> Self {
        Self {
            level: IntStatus::Off,
            transitions: 0,
        }
    }

    /// Enable interrupts; called once bootstrap is done
    pub fn enable(&mut self) {
        self.set_level(IntStatus::On);
    }

    /// Number of level changes observed (re-setting the same level is not one)
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl Default for SimulatedInterrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptControl for SimulatedInterrupts {
    #[inline]
    fn level(&self) -> IntStatus {
        self.level
    }

    fn set_level(&mut self, level: IntStatus) -> IntStatus {
        let previous = self.level;
        if previous != level {
            self.transitions += 1;
        }
        self.level = level;
        previous
    }
}
