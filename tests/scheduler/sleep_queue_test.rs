/*!
 * Sleep Queue Tests
 * Tick-driven wakeups through the public scheduler API
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uniproc_kernel::{
    KernelConfig, Scheduler, SchedulingPolicy, SimulatedKernel, ThreadId, ThreadStatus, Ticks,
    MIN_STACK_WORDS,
};

fn setup() -> (Scheduler, SimulatedKernel) {
    let scheduler = Scheduler::new(SchedulingPolicy::RoundRobin).unwrap();
    let mut kernel =
        SimulatedKernel::simulated(KernelConfig::new().with_stack_words(MIN_STACK_WORDS));
    kernel.interrupt.enable();
    (scheduler, kernel)
}

/// Put the running thread and `durations.len() - 1` forked workers to sleep,
/// leaving a final `ticker` thread running. Returns the sleepers in the order
/// they went to sleep.
fn sleep_all(
    scheduler: &mut Scheduler,
    kernel: &mut SimulatedKernel,
    durations: &[Ticks],
) -> (Vec<ThreadId>, ThreadId) {
    let mut sleepers = vec![kernel.current()];
    for i in 1..durations.len() {
        sleepers.push(scheduler.fork(kernel, &format!("w{}", i), 0, 0));
    }
    let ticker = scheduler.fork(kernel, "ticker", 0, 0);

    for (&id, &ticks) in sleepers.iter().zip(durations) {
        assert_eq!(kernel.current(), id);
        scheduler.go_sleep(kernel, id, ticks).unwrap();
    }
    assert_eq!(kernel.current(), ticker);
    (sleepers, ticker)
}

#[test]
fn test_sleepers_wake_on_their_tick() {
    let (mut scheduler, mut kernel) = setup();
    let (sleepers, _) = sleep_all(&mut scheduler, &mut kernel, &[3, 5, 7]);

    let woke_on: Vec<Ticks> = (1..=7)
        .filter(|_| scheduler.timer_tick(&mut kernel))
        .collect();

    assert_eq!(woke_on, vec![3, 5, 7]);
    assert_eq!(scheduler.ready_ids(), sleepers);
    assert!(sleepers
        .iter()
        .all(|&id| kernel.status(id) == Some(ThreadStatus::Ready)));
}

#[test]
fn test_remaining_ticks_count_down() {
    let (mut scheduler, mut kernel) = setup();
    let (sleepers, _) = sleep_all(&mut scheduler, &mut kernel, &[4, 2]);

    let view = |s: &Scheduler| -> Vec<(ThreadId, Ticks)> {
        s.sleeping().iter().map(|e| (e.thread(), e.remaining())).collect()
    };
    assert_eq!(view(&scheduler), vec![(sleepers[1], 2), (sleepers[0], 4)]);

    scheduler.timer_tick(&mut kernel);
    assert_eq!(view(&scheduler), vec![(sleepers[1], 1), (sleepers[0], 3)]);
    assert!(scheduler.is_sleeping(sleepers[0]));
    assert_eq!(kernel.status(sleepers[0]), Some(ThreadStatus::Blocked));
}

#[test]
fn test_equal_durations_wake_together_in_order() {
    let (mut scheduler, mut kernel) = setup();
    let (sleepers, _) = sleep_all(&mut scheduler, &mut kernel, &[2, 2, 2]);

    assert!(!scheduler.timer_tick(&mut kernel));
    assert!(scheduler.timer_tick(&mut kernel));
    assert!(scheduler.thread_woke_up());
    assert_eq!(scheduler.ready_ids(), sleepers);
}

#[test]
fn test_tick_with_nobody_asleep() {
    let (mut scheduler, mut kernel) = setup();
    assert!(!scheduler.timer_tick(&mut kernel));
    assert!(!scheduler.thread_woke_up());
    assert!(!scheduler.has_ready());
}

#[test]
#[should_panic(expected = "at least one tick")]
fn test_zero_tick_sleep_is_rejected() {
    let (mut scheduler, mut kernel) = setup();
    let main = kernel.current();
    let _ = scheduler.go_sleep(&mut kernel, main, 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_each_sleeper_wakes_after_its_duration(
        durations in prop::collection::vec(1u32..20, 1..8),
    ) {
        let (mut scheduler, mut kernel) = setup();
        let (sleepers, _) = sleep_all(&mut scheduler, &mut kernel, &durations);
        let longest = durations.iter().copied().max().unwrap_or(0);

        for tick in 1..=longest {
            scheduler.timer_tick(&mut kernel);
            for (&id, &ticks) in sleepers.iter().zip(&durations) {
                prop_assert_eq!(scheduler.is_sleeping(id), tick < ticks);
            }
        }

        // Wake order is by duration, then by when the thread went to sleep
        let mut expected: Vec<(Ticks, ThreadId)> =
            durations.iter().copied().zip(sleepers.iter().copied()).collect();
        expected.sort_by_key(|&(ticks, _)| ticks);
        let expected: Vec<ThreadId> = expected.into_iter().map(|(_, id)| id).collect();
        prop_assert_eq!(scheduler.ready_ids(), expected);
    }
}
