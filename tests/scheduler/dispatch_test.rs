/*!
 * Dispatcher Tests
 * Context handoff, destruction, and the platform hooks
 */

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use uniproc_kernel::{
    init_test_tracing, AddressSpace, ContextSwitch, IntStatus, Kernel, KernelConfig,
    MachineContext, Scheduler, SchedulingPolicy, SimulatedInterrupts, SimulatedKernel,
    ThreadStatus, MIN_STACK_WORDS,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Address space that records each hook call under its owner's name
struct RecordingSpace {
    owner: &'static str,
    log: Log,
}

impl AddressSpace for RecordingSpace {
    fn save_state(&mut self) {
        self.log.borrow_mut().push(format!("save {}", self.owner));
    }

    fn restore_state(&mut self) {
        self.log.borrow_mut().push(format!("restore {}", self.owner));
    }
}

/// Switch primitive that stamps the outgoing context with a sequence number
#[derive(Default)]
struct StampingSwitch {
    switches: usize,
}

impl ContextSwitch for StampingSwitch {
    unsafe fn switch(&mut self, from: *mut MachineContext, _to: *const MachineContext) {
        self.switches += 1;
        (*from).registers_mut()[1] = self.switches;
    }
}

/// Switch primitive that appends to a shared event log
struct LoggingSwitch {
    log: Log,
}

impl ContextSwitch for LoggingSwitch {
    unsafe fn switch(&mut self, _from: *mut MachineContext, _to: *const MachineContext) {
        self.log.borrow_mut().push("switch".to_string());
    }
}

/// Address space that logs its save hook and its own teardown
struct TrackedSpace {
    log: Log,
}

impl AddressSpace for TrackedSpace {
    fn save_state(&mut self) {
        self.log.borrow_mut().push("save".to_string());
    }

    fn restore_state(&mut self) {
        self.log.borrow_mut().push("restore".to_string());
    }
}

impl Drop for TrackedSpace {
    fn drop(&mut self) {
        self.log.borrow_mut().push("destroyed".to_string());
    }
}

fn setup(policy: SchedulingPolicy) -> (Scheduler, SimulatedKernel) {
    init_test_tracing();
    let scheduler = Scheduler::new(policy).unwrap();
    let config = KernelConfig::new()
        .with_policy(policy)
        .with_stack_words(MIN_STACK_WORDS);
    let mut kernel = SimulatedKernel::simulated(config);
    kernel.interrupt.enable();
    (scheduler, kernel)
}

#[test]
fn test_switch_targets_incoming_stack() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::RoundRobin);
    let worker = scheduler.fork(&mut kernel, "worker", 0, 0);
    let top = kernel.threads.thread(worker).stack().unwrap().top();

    scheduler.yield_cpu(&mut kernel);

    let record = kernel.switcher.last().unwrap();
    assert_eq!(record.to_stack, top);
    assert_eq!(kernel.switcher.history().len(), 1);
    assert_eq!(kernel.interrupt_level(), IntStatus::On);
}

#[test]
fn test_finished_threads_are_reclaimed() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::RoundRobin);
    let workers: Vec<_> = (0..4)
        .map(|i| scheduler.fork(&mut kernel, &format!("w{}", i), 0, 0))
        .collect();
    assert_eq!(kernel.threads.len(), 5);

    for &worker in &workers {
        scheduler.finish_current(&mut kernel).unwrap();
        assert_eq!(kernel.current(), worker);
        assert_eq!(scheduler.pending_destruction(), None);
    }

    assert_eq!(kernel.threads.ids(), vec![workers[3]]);
    assert_eq!(kernel.status(workers[3]), Some(ThreadStatus::Running));
}

#[test]
fn test_address_space_hooks_wrap_each_switch() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::RoundRobin);
    let log: Log = Rc::default();
    let main = kernel.current();
    let user = scheduler.fork(&mut kernel, "user", 0, 0);
    let kernel_only = scheduler.fork(&mut kernel, "kernel_only", 0, 0);

    kernel.threads.thread_mut(main).attach_space(Box::new(RecordingSpace {
        owner: "main",
        log: Rc::clone(&log),
    }));
    kernel.threads.thread_mut(user).attach_space(Box::new(RecordingSpace {
        owner: "user",
        log: Rc::clone(&log),
    }));
    assert!(!kernel.threads.thread(kernel_only).has_space());

    scheduler.yield_cpu(&mut kernel); // main -> user
    scheduler.yield_cpu(&mut kernel); // user -> kernel_only
    scheduler.yield_cpu(&mut kernel); // kernel_only -> main

    assert_eq!(
        *log.borrow(),
        vec!["save main", "restore user", "save user", "restore main"]
    );
}

#[test]
fn test_custom_switch_primitive() {
    init_test_tracing();
    let mut scheduler = Scheduler::new(SchedulingPolicy::Priority).unwrap();
    let config = KernelConfig::new().with_stack_words(MIN_STACK_WORDS);
    let mut kernel = Kernel::new(config, SimulatedInterrupts::new(), StampingSwitch::default());
    kernel.interrupt.enable();

    let main = kernel.current();
    let worker = scheduler.fork(&mut kernel, "worker", -1, 0);

    assert_eq!(scheduler.yield_cpu(&mut kernel), Some(worker));
    assert_eq!(kernel.switcher.switches, 1);
    assert_eq!(kernel.threads.thread(main).context().registers()[1], 1);

    scheduler.yield_cpu(&mut kernel);
    assert_eq!(kernel.current(), main);
    assert_eq!(kernel.threads.thread(worker).context().registers()[1], 2);
}

#[test]
fn test_finishing_thread_outlives_the_switch() {
    init_test_tracing();
    let log: Log = Rc::default();
    let mut scheduler = Scheduler::new(SchedulingPolicy::RoundRobin).unwrap();
    let config = KernelConfig::new().with_stack_words(MIN_STACK_WORDS);
    let switcher = LoggingSwitch {
        log: Rc::clone(&log),
    };
    let mut kernel = Kernel::new(config, SimulatedInterrupts::new(), switcher);
    kernel.interrupt.enable();

    let main = kernel.current();
    kernel
        .threads
        .thread_mut(main)
        .attach_space(Box::new(TrackedSpace {
            log: Rc::clone(&log),
        }));
    let worker = scheduler.fork(&mut kernel, "worker", 0, 0);

    scheduler.finish_current(&mut kernel).unwrap();

    assert_eq!(*log.borrow(), vec!["save", "switch", "destroyed"]);
    assert_eq!(kernel.current(), worker);
    assert!(kernel.threads.get(main).is_none());
}
