//! Fire-and-forget task spawning for single-threaded hosts.

use std::{future::Future, pin::Pin};

use futures::{executor::LocalSpawner, task::LocalSpawnExt};

/// Boxed `!Send` unit future handed to a [`TaskSpawner`].
pub type LocalTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Schedules background work whose completion the caller does not await.
pub trait TaskSpawner {
    /// Schedules `task` to run on the current thread.
    fn spawn(&self, task: LocalTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that drives each task to completion before returning.
///
/// Suitable for synchronous stores (memory, `localStorage`) whose futures never wait on I/O.
pub struct InlineTaskSpawner;

impl TaskSpawner for InlineTaskSpawner {
    fn spawn(&self, task: LocalTask) {
        futures::executor::block_on(task);
    }
}

impl TaskSpawner for LocalSpawner {
    fn spawn(&self, task: LocalTask) {
        // Fails only once the owning pool is gone, at which point nothing would poll the task.
        let _ = self.spawn_local(task);
    }
}
