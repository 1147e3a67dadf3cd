pub mod http;

use std::fmt::Display;

use store::{tracing::error, StoreError};
use tokio::sync::oneshot;

use crate::EWSServer;

impl EWSServer {
    /// Runs `f` on the worker pool and waits for its result.
    pub async fn spawn_worker<U, V>(&self, f: U) -> store::Result<V>
    where
        U: FnOnce() -> V + Send + 'static,
        V: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();

        self.worker_pool.spawn(move || {
            tx.send(f()).ok();
        });

        rx.await
            .map_err(|e| StoreError::InternalError(format!("Await error: {}", e)))
    }
}

pub trait UnwrapFailure<T> {
    fn failed_to(self, action: &str) -> T;
}

impl<T> UnwrapFailure<T> for Option<T> {
    fn failed_to(self, action: &str) -> T {
        match self {
            Some(result) => result,
            None => failed_to(action),
        }
    }
}

impl<T, E: Display> UnwrapFailure<T> for Result<T, E> {
    fn failed_to(self, action: &str) -> T {
        match self {
            Ok(result) => result,
            Err(err) => failed_to(&format!("{}: {}", action, err)),
        }
    }
}

/// Logs a fatal startup error and terminates the process.
pub fn failed_to(action: &str) -> ! {
    error!("Failed to {}", action);
    eprintln!("Failed to {}", action);
    std::process::exit(1);
}
