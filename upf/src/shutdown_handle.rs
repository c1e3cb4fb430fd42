//! shutdown_handle - pairs a spawned task with the stop source that ends it

use async_std::task::JoinHandle;
use stop_token::StopSource;

pub struct ShutdownHandle {
    handle: JoinHandle<()>,
    stop_source: StopSource,
}

impl ShutdownHandle {
    pub fn new(handle: JoinHandle<()>, stop_source: StopSource) -> Self {
        ShutdownHandle {
            handle,
            stop_source,
        }
    }

    /// Signal the task to stop, then wait for it to finish in-flight work.
    pub async fn graceful_shutdown(self) {
        drop(self.stop_source);
        self.handle.await;
    }
}
