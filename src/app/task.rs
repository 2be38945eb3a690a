// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned from `update`
//!
//! A `Task` is a bag of futures, each resolving to one message that is fed
//! back into `update`. The runtime decides where the futures run; `update`
//! itself never awaits.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;

#[must_use = "a Task does nothing unless it is handed to a runtime"]
pub struct Task<T> {
    futures: Vec<BoxFuture<'static, T>>,
}

impl<T: Send + 'static> Task<T> {
    /// No follow-up work
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Feed a message back immediately
    pub fn done(value: T) -> Self {
        Self::perform(async move { value }, std::convert::identity)
    }

    /// Run a future and map its output to a message
    pub fn perform<F, A>(future: F, map: impl FnOnce(A) -> T + Send + 'static) -> Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    /// Combine several tasks
    pub fn batch(tasks: impl IntoIterator<Item = Task<T>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|task| task.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, T>> {
        self.futures
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}
