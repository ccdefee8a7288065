//! Channel-driven worklist with termination detection
//!
//! Both crawl phases fan out over work whose total size is only known at
//! runtime. The worklist tracks how many batches are still owed to the
//! coordinating loop:
//!
//! - seeding a batch or spawning a task increments the pending count before
//!   the work starts
//! - receiving a batch decrements it
//! - the phase is finished exactly when the count reaches zero
//!
//! Every spawned task delivers exactly one batch. If the task panics or is
//! aborted, its completion guard delivers an empty (`Default`) batch instead,
//! so a failing task can never leave the loop waiting forever.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Worklist for one crawl phase
pub struct Worklist<T> {
    sender: UnboundedSender<T>,
    receiver: UnboundedReceiver<T>,
    /// Batches seeded or spawned but not yet received
    pending: usize,
    /// Total tasks spawned over the life of the phase
    spawned: usize,
    /// Point after which the phase gives up on outstanding tasks
    deadline: Option<Instant>,
    tasks: JoinSet<()>,
}

impl<T> Worklist<T>
where
    T: Default + Send + 'static,
{
    /// Creates an empty worklist
    ///
    /// # Arguments
    ///
    /// * `phase_timeout` - Optional upper bound on how long the phase may
    ///   run, measured from now
    pub fn new(phase_timeout: Option<Duration>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            sender,
            receiver,
            pending: 0,
            spawned: 0,
            deadline: phase_timeout.map(|timeout| Instant::now() + timeout),
            tasks: JoinSet::new(),
        }
    }

    /// Queues a batch directly, without spawning a task
    pub fn seed(&mut self, batch: T) {
        self.pending += 1;
        // The receiver lives as long as `self`, so this cannot fail
        let _ = self.sender.send(batch);
    }

    /// Spawns a task whose output becomes the next batch
    pub fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.pending += 1;
        self.spawned += 1;

        let completion = Completion::new(self.sender.clone());
        self.tasks.spawn(async move {
            let batch = work.await;
            completion.deliver(batch);
        });

        // Drop bookkeeping for tasks that already finished
        while self.tasks.try_join_next().is_some() {}
    }

    /// Waits for the next batch
    ///
    /// Returns `None` once the pending count reaches zero, or when the phase
    /// deadline passes. In the latter case outstanding tasks are aborted.
    pub async fn next(&mut self) -> Option<T> {
        if self.pending == 0 {
            return None;
        }

        let received = match self.deadline {
            Some(deadline) => {
                match tokio::time::timeout_at(deadline, self.receiver.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        tracing::warn!(
                            "Phase deadline reached with {} task(s) still pending, abandoning them",
                            self.pending
                        );
                        self.abort();
                        return None;
                    }
                }
            }
            None => self.receiver.recv().await,
        };

        // `self.sender` keeps the channel open, so `recv` only yields values
        let batch = received?;
        self.pending -= 1;
        Some(batch)
    }

    /// Number of batches still owed to the loop
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of tasks spawned so far
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    fn abort(&mut self) {
        self.tasks.abort_all();
        self.pending = 0;
    }
}

/// Delivers a task's batch exactly once
///
/// Dropping the guard without calling `deliver` sends `T::default()`.
struct Completion<T: Default> {
    sender: Option<UnboundedSender<T>>,
}

impl<T: Default> Completion<T> {
    fn new(sender: UnboundedSender<T>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    fn deliver(mut self, batch: T) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(batch);
        }
    }
}

impl<T: Default> Drop for Completion<T> {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            if std::thread::panicking() {
                tracing::error!("Crawl task panicked; counting it as an empty batch");
            }
            let _ = sender.send(T::default());
        }
    }
}
