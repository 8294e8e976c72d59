use once_cell::sync::OnceCell;
use rayon::ThreadPoolBuilder;
use std::sync::Arc;
use tracing::debug;

static THREAD_POOL: OnceCell<Arc<rayon::ThreadPool>> = OnceCell::new();

/// Upper bound for the default worker count
const DEFAULT_MAX_THREADS: usize = 8;

/// Default number of walker threads: available cores, capped at 8
#[must_use]
pub fn default_threads() -> usize {
    num_cpus::get().min(DEFAULT_MAX_THREADS)
}

/// Initialize the global thread pool with the specified number of threads
///
/// # Errors
///
/// Returns an error if the thread pool cannot be built or was already
/// initialized
pub fn init_thread_pool(num_threads: usize) -> anyhow::Result<()> {
    let pool = build_pool(num_threads)?;

    THREAD_POOL
        .set(Arc::new(pool))
        .map_err(|_| anyhow::anyhow!("Thread pool already initialized"))?;

    Ok(())
}

/// Configure the thread pool from config
///
/// # Errors
///
/// Returns an error if the thread pool has already been initialized
pub fn configure_from_config(config: &crate::config::Config) -> anyhow::Result<()> {
    if config.performance.threads > 0 {
        init_thread_pool(config.performance.threads)?;
    }
    Ok(())
}

/// Run a function in the configured thread pool
///
/// Falls back to rayon's global pool when no pool was configured and a
/// default one cannot be built.
pub fn run_in_pool<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    let pool = THREAD_POOL.get_or_try_init(|| build_pool(default_threads()).map(Arc::new));

    match pool {
        Ok(pool) => pool.install(f),
        Err(e) => {
            debug!(error = %e, "Cannot build walker thread pool, using the global pool");
            f()
        }
    }
}

fn build_pool(num_threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("treewalk-worker-{i}"))
        .build()?;
    Ok(pool)
}

mod num_cpus {
    use std::sync::LazyLock;

    static NUM_CPUS: LazyLock<usize> = LazyLock::new(|| {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
    });

    pub fn get() -> usize {
        *NUM_CPUS
    }
}
