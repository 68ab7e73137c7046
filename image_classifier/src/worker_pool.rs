use std::{future::Future, sync::Arc};
use tokio::sync::Semaphore;
use tonic::Status;

/// Caps how many predictions run at the same time. Callers past the
/// capacity queue on the semaphore in arrival order.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn run<F, T>(&self, task: F) -> Result<T, Status>
    where
        F: Future<Output = T>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| Status::unavailable("worker pool is closed"))?;

        Ok(task.await)
    }
}
