// SPDX-License-Identifier: GPL-3.0-only

//! Executes tasks on tokio and feeds their messages back
//!
//! Each future of a [`Task`] is spawned onto the runtime. Its message is sent
//! over an unbounded channel and applied to the viewfinder by whoever owns the
//! event loop (the terminal frontend or a CLI command).

use crate::app::state::{Message, Viewfinder};
use crate::app::task::Task;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

pub struct Runtime {
    handle: Handle,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
}

impl Runtime {
    pub fn new(handle: Handle) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            handle,
            sender,
            receiver,
        }
    }

    /// Spawn every future of the task
    pub fn spawn(&self, task: Task<Message>) {
        for future in task.into_futures() {
            let sender = self.sender.clone();
            self.handle.spawn(async move {
                let message = future.await;
                // The receiver is gone only while shutting down
                let _ = sender.send(message);
            });
        }
    }

    /// Apply a message and spawn the resulting work
    pub fn dispatch(&self, app: &mut Viewfinder, message: Message) {
        debug!(?message, "Dispatching");
        let task = app.update(message);
        self.spawn(task);
    }

    /// Apply every message that is already available
    ///
    /// Returns the number of messages applied.
    pub fn drain(&mut self, app: &mut Viewfinder) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.dispatch(app, message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next message
    pub async fn next(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}
