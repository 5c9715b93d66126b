//! Fixed-size worker pool for page work units
//!
//! This module handles:
//! - Queueing every work item before any worker starts
//! - Running a fixed number of workers that pull items until the queue drains
//! - Joining all workers before returning
//!
//! Workers take items in no particular order. A work unit that panics is
//! logged and its worker carries on with the next item; nothing is reported
//! back to the caller.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// A bounded set of workers consuming items from a shared queue
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    /// Creates a pool with `size` workers (at least one)
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
        }
    }

    /// Number of workers in the pool
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs `work` once for every item and waits until all of them finish
    ///
    /// Each item is handed to exactly one worker. The call returns only
    /// after the queue is empty and every worker has exited.
    pub async fn run<T, F, Fut>(&self, items: impl IntoIterator<Item = T>, work: F)
    where
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        for item in items {
            // The receiver is alive until the workers below exit
            let _ = tx.send(item);
        }
        drop(tx);

        let queue = Arc::new(Mutex::new(rx));
        let work = Arc::new(work);
        let mut workers = JoinSet::new();

        for worker_id in 1..=self.size {
            let queue = Arc::clone(&queue);
            let work = Arc::clone(&work);
            workers.spawn(async move {
                tracing::debug!("[worker-{}] start", worker_id);
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some(item) = next else {
                        break;
                    };

                    // Run the unit on its own task so a panic stays contained
                    if let Err(e) = tokio::spawn((*work)(item)).await {
                        tracing::error!("[worker-{}] work unit failed: {}", worker_id, e);
                    }
                }
                tracing::debug!("[worker-{}] finished", worker_id);
            });
        }

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                tracing::error!("Worker task failed: {}", e);
            }
        }
    }
}
