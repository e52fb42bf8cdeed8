//! Ordered, one-after-another execution of runnables.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::Runnable;

/// Runs its members one after another, in insertion order.
///
/// `run` executes each member on the calling task and awaits it before
/// starting the next, so when member *i* begins, members `0..i` have already
/// finished. The group captures no errors of its own; what a failing member
/// does is that member's contract.
///
/// Members may be appended between runs; `add` requires exclusive access, so
/// a group cannot be mutated while its own `run` is in flight.
///
/// ## Examples
///
/// ```no_run
/// use batch_lib::{CommandRunnable, Runnable, SequentialGroup};
///
/// # async fn example() {
/// SequentialGroup::new()
///     .add(CommandRunnable::shell("cargo build"))
///     .add(CommandRunnable::shell("cargo test"))
///     .run()
///     .await;
/// # }
/// ```
#[derive(Default)]
pub struct SequentialGroup {
    members: Vec<Arc<dyn Runnable>>,
}

impl SequentialGroup {
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
impl Runnable for SequentialGroup {
    async fn run(&self) {
        debug!(members = self.members.len(), "running sequential group");
        for member in &self.members {
            member.run().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    /// Appends its id to a shared log when run.
    struct Recorder {
        id: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Runnable for Recorder {
        async fn run(&self) {
            self.log.lock().unwrap().push(self.id);
        }
    }

    /// Sleeps before logging, to catch a group that starts the next member
    /// early.
    struct SlowRecorder {
        id: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Runnable for SlowRecorder {
        async fn run(&self) {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.log.lock().unwrap().push(self.id);
        }
    }

    fn recorder(id: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Recorder {
        Recorder {
            id,
            log: Arc::clone(log),
        }
    }

    #[tokio::test]
    async fn runs_members_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut group = SequentialGroup::new();
        group
            .add(recorder("first", &log))
            .add(recorder("second", &log))
            .add(recorder("third", &log));

        group.run().await;

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn waits_for_each_member_before_starting_the_next() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut group = SequentialGroup::new();
        group
            .add(SlowRecorder {
                id: "slow",
                log: Arc::clone(&log),
            })
            .add(recorder("fast", &log));

        group.run().await;

        assert_eq!(*log.lock().unwrap(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn add_and_run_chain_in_one_expression() {
        let log = Arc::new(Mutex::new(Vec::new()));

        SequentialGroup::new()
            .add(recorder("one", &log))
            .add(recorder("two", &log))
            .run()
            .await;

        assert_eq!(*log.lock().unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn add_all_matches_repeated_add() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut group = SequentialGroup::new();
        group.add_all(vec![
            Arc::new(recorder("a", &log)) as Arc<dyn Runnable>,
            Arc::new(recorder("b", &log)),
        ]);
        group.add_all(vec![Arc::new(recorder("c", &log)) as Arc<dyn Runnable>]);
        assert_eq!(group.len(), 3);

        group.run().await;

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn rerun_executes_members_again() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut group = SequentialGroup::new();
        group.add(recorder("again", &log));

        group.run().await;
        group.run().await;

        assert_eq!(*log.lock().unwrap(), vec!["again", "again"]);
    }

    #[tokio::test]
    async fn empty_group_completes() {
        let group = SequentialGroup::new();
        group.run().await;
        assert!(group.is_empty());
    }
}
