//! Fan-out/fan-in execution of runnables.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::Runnable;

/// Runs its members at the same time, one tokio task per member.
///
/// `run` dispatches every member onto its own task and does not return until
/// all of them have finished. Members are dispatched in insertion order, but
/// nothing is guaranteed about the order in which they execute or complete,
/// only that the group's `run` returns after the last one is done. On a
/// multi-threaded runtime the members run in parallel.
///
/// The join survives misbehaving members: a member that panics still releases
/// its completion signal, so the group cannot wait forever on it. As with [`SequentialGroup`](crate::SequentialGroup), the
/// group itself captures no errors.
///
/// Members may be appended between runs; `add` requires exclusive access, so
/// a group cannot be mutated while its own `run` is in flight.
///
/// ## Examples
///
/// ```no_run
/// use batch_lib::{CommandRunnable, ConcurrentGroup, Runnable};
///
/// # async fn example() {
/// ConcurrentGroup::new()
///     .add(CommandRunnable::new("ls"))
///     .add(CommandRunnable::new("ps"))
///     .run()
///     .await;
/// # }
/// ```
#[derive(Default)]
pub struct ConcurrentGroup {
    members: Vec<Arc<dyn Runnable>>,
}

impl ConcurrentGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a runnable to the end of the group.
    pub fn add(&mut self, runnable: impl Runnable + 'static) -> &mut Self {
        self.members.push(Arc::new(runnable));
        self
    }

    /// Appends an already-shared runnable to the end of the group.
    pub fn add_shared(&mut self, runnable: Arc<dyn Runnable>) -> &mut Self {
        self.members.push(runnable);
        self
    }

    /// Appends every runnable yielded by `runnables`, in iteration order.
    ///
    /// Two calls with disjoint sets are equivalent to one call with the
    /// concatenation.
    pub fn add_all(
        &mut self,
        runnables: impl IntoIterator<Item = Arc<dyn Runnable>>,
    ) -> &mut Self {
        self.members.extend(runnables);
        self
    }

    /// Returns the number of members currently in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl Runnable for ConcurrentGroup {
    async fn run(&self) {
        debug!(members = self.members.len(), "dispatching concurrent group");

        // One sender clone per member present at dispatch time.
        let (completion, mut joined) = mpsc::channel::<()>(1);
        for member in &self.members {
            let tracked = TrackedRunnable {
                inner: Arc::clone(member),
                _completion: completion.clone(),
            };
            tokio::spawn(async move {
                tracked.run().await;
            });
        }
        drop(completion);

        // No messages ever arrive; recv resolves with None once every tracked
        // member has released its sender.
        while joined.recv().await.is_some() {}
    }
}

/// Pairs a dispatched member with the sender half of its group's completion
/// channel.
///
/// The sender is released when the wrapper is dropped, which happens on every
/// exit path of the spawned task, normal return and panic unwind alike. That
/// guarantee is the whole point of the wrapper: it converts N independent
/// member completions into the single channel-closed signal the group joins
/// on.
struct TrackedRunnable {
    inner: Arc<dyn Runnable>,
    /// Dropped with the wrapper; closing the last clone wakes the group.
    _completion: mpsc::Sender<()>,
}

#[async_trait]
impl Runnable for TrackedRunnable {
    async fn run(&self) {
        self.inner.run().await;
    }
}
