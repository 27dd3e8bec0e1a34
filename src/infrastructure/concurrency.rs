/// Concurrency management for calltree.
/// Configures the rayon pool used for parallel per-root traversal.

use anyhow::Result;

/// Initialize the global rayon thread pool with controlled worker count.
/// Reserves ~50% of CPU capacity so a batch run stays polite on shared
/// machines.
pub fn init_thread_pool() -> Result<()> {
    let cores = num_cpus::get();
    // Reserve 50% capacity, minimum 1 worker
    let workers = std::cmp::max(1, cores / 2);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    println!(
        "[CallTree] Initialized thread pool: {} workers (system has {} cores)",
        workers, cores
    );

    Ok(())
}
