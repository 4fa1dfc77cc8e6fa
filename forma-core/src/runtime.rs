use log::debug;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Runtime hosting background work (the workout ticker) when the caller is a
/// foreign language that does not run tokio itself.
pub fn global_runtime() -> &'static Runtime {
    GLOBAL_RUNTIME.get_or_init(|| {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);
        let threads = std::cmp::max(threads.min(4), 2);
        debug!("Initializing global runtime with {} threads", threads);
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(threads)
            .thread_name("forma-rt")
            .enable_all()
            .build()
            .expect("failed to build tokio runtime")
    })
}
