/*!
 * Ready Queue Tests
 * Dispatch order under each implemented policy
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uniproc_kernel::{
    KernelConfig, Priority, Scheduler, SchedulerError, SchedulingPolicy, SimulatedKernel,
    ThreadId, ThreadStatus, MIN_STACK_WORDS,
};

fn setup(policy: SchedulingPolicy) -> (Scheduler, SimulatedKernel) {
    let scheduler = Scheduler::new(policy).unwrap();
    let config = KernelConfig::new()
        .with_policy(policy)
        .with_stack_words(MIN_STACK_WORDS);
    let mut kernel = SimulatedKernel::simulated(config);
    kernel.interrupt.enable();
    (scheduler, kernel)
}

#[test]
fn test_priority_dispatch_order() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::Priority);
    let a = scheduler.fork(&mut kernel, "A", 5, 0);
    let b = scheduler.fork(&mut kernel, "B", 1, 0);
    let c = scheduler.fork(&mut kernel, "C", 5, 0);
    assert_eq!(scheduler.ready_ids(), vec![b, a, c]);

    // Each thread finishes as soon as it runs
    let mut order = Vec::new();
    while scheduler.finish_current(&mut kernel).is_ok() {
        order.push(kernel.current());
    }

    assert_eq!(order, vec![b, a, c]);
    assert_eq!(kernel.status(c), Some(ThreadStatus::Finishing));
    assert_eq!(kernel.threads.len(), 1);
}

#[test]
fn test_dispatching_the_last_thread_fails_cleanly() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::RoundRobin);
    assert_eq!(
        scheduler.finish_current(&mut kernel),
        Err(SchedulerError::NoRunnableThreads)
    );
}

#[test]
fn test_yield_requeues_behind_peers_under_priority() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::Priority);
    let main = kernel.current();
    let low = scheduler.fork(&mut kernel, "low", 9, 0);
    let high = scheduler.fork(&mut kernel, "high", 0, 0);

    // main has priority 0 too, so it lines up after `high` but ahead of `low`
    assert_eq!(scheduler.yield_cpu(&mut kernel), Some(high));
    assert_eq!(scheduler.ready_ids(), vec![main, low]);
}

#[test]
fn test_print_lists_names() {
    let (mut scheduler, mut kernel) = setup(SchedulingPolicy::FirstComeFirstServed);
    scheduler.fork(&mut kernel, "first", 3, 0);
    scheduler.fork(&mut kernel, "second", 1, 0);

    assert_eq!(
        scheduler.ready_list(&kernel.threads).to_string(),
        "Ready list contents: first, second,"
    );
    scheduler.print(&kernel);
}

fn fork_all(
    scheduler: &mut Scheduler,
    kernel: &mut SimulatedKernel,
    priorities: &[Priority],
) -> Vec<ThreadId> {
    priorities
        .iter()
        .enumerate()
        .map(|(i, &p)| scheduler.fork(kernel, &format!("t{}", i), p, 0))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_robin_and_fcfs_are_fifo(
        priorities in prop::collection::vec(-10i32..10, 0..24),
        fcfs in any::<bool>(),
    ) {
        let policy = if fcfs {
            SchedulingPolicy::FirstComeFirstServed
        } else {
            SchedulingPolicy::RoundRobin
        };
        let (mut scheduler, mut kernel) = setup(policy);
        let ids = fork_all(&mut scheduler, &mut kernel, &priorities);

        prop_assert_eq!(scheduler.ready_ids(), ids);
    }

    #[test]
    fn prop_priority_is_stable_ascending(
        priorities in prop::collection::vec(-10i32..10, 0..24),
    ) {
        let (mut scheduler, mut kernel) = setup(SchedulingPolicy::Priority);
        let ids = fork_all(&mut scheduler, &mut kernel, &priorities);

        let mut expected: Vec<(Priority, ThreadId)> =
            priorities.iter().copied().zip(ids.iter().copied()).collect();
        expected.sort_by_key(|&(p, _)| p);
        let expected: Vec<ThreadId> = expected.into_iter().map(|(_, id)| id).collect();

        prop_assert_eq!(scheduler.ready_ids(), expected);
    }
}
