/*!
 * Scheduler Demo - Main Entry Point
 *
 * Runs a small fixed workload on the simulated platform and logs every
 * scheduling decision. Pick the policy with KERNEL_SCHED_POLICY and turn on
 * per-thread events with RUST_LOG=thread=debug.
 */

use ahash::AHashMap;
use tracing::info;

use uniproc_kernel::{
    init_tracing, BurstTime, IntStatus, InterruptControl, KernelConfig, Priority, Scheduler,
    SchedulerError, SchedulingPolicy, SimulatedKernel, Ticks,
};

/// Name, priority, and ticks of work for each forked thread
const WORKLOADS: [(&str, Priority, BurstTime); 3] = [("B", 1, 4), ("A", 5, 2), ("C", 5, 3)];

/// How long the bootstrap thread sleeps while the workloads run
const MAIN_SLEEP_TICKS: Ticks = 10;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = KernelConfig::from_env()?;
    info!(policy = %config.policy, stack_words = config.stack_words, "Kernel starting");

    let kernel = run_workloads(config)?;
    info!(
        switches = kernel.switcher.count(),
        live_threads = kernel.threads.len(),
        "All workloads complete"
    );
    Ok(())
}

/// Fork the workloads and run them until the bootstrap thread is back on the CPU
fn run_workloads(config: KernelConfig) -> miette::Result<SimulatedKernel> {
    let mut scheduler = Scheduler::new(config.policy)?;
    let mut kernel = SimulatedKernel::simulated(config);
    kernel.interrupt.enable();

    let mut work = AHashMap::new();
    for (name, priority, burst_time) in WORKLOADS {
        let id = scheduler.fork(&mut kernel, name, priority, burst_time);
        work.insert(id, burst_time);
    }
    scheduler.print(&kernel);

    let boot = kernel.current();
    scheduler.go_sleep(&mut kernel, boot, MAIN_SLEEP_TICKS)?;

    // One iteration per tick of work done by whichever thread holds the CPU
    while kernel.current() != boot {
        let current = kernel.current();
        let remaining = work
            .get_mut(&current)
            .ok_or(SchedulerError::ThreadNotFound(current))?;
        *remaining = remaining.saturating_sub(1);

        if *remaining == 0 {
            info!(thread = %kernel.thread(current)?, "Workload complete");
            scheduler.finish_current(&mut kernel)?;
            // The incoming thread resumes with interrupts on
            kernel.interrupt.set_level(IntStatus::On);
            continue;
        }

        let woke = scheduler.timer_tick(&mut kernel);
        if woke || kernel.config().policy == SchedulingPolicy::RoundRobin {
            scheduler.yield_cpu(&mut kernel);
        }
    }

    scheduler.print(&kernel);
    Ok(kernel)
}
