//! Microtask-queue task spawner for browser builds.

use storefront_host::{LocalTask, TaskSpawner};

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that queues tasks on the JS event loop via `wasm_bindgen_futures::spawn_local`.
///
/// Off-browser builds fall back to running the task inline.
pub struct WebTaskSpawner;

impl TaskSpawner for WebTaskSpawner {
    fn spawn(&self, task: LocalTask) {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            storefront_host::InlineTaskSpawner.spawn(task);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn off_browser_spawn_runs_inline() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        WebTaskSpawner.spawn(Box::pin(async move { flag.set(true) }));
        assert!(ran.get());
    }
}
