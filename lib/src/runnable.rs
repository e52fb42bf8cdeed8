//! The unit-of-work abstraction shared by every component in this crate.

use async_trait::async_trait;

/// A unit of work that can be executed on demand.
///
/// This is the single composition point of the crate: groups and leaves all
/// implement `Runnable`, so any of them can be nested inside any group to
/// arbitrary depth: a [`ConcurrentGroup`](crate::ConcurrentGroup) of
/// [`SequentialGroup`](crate::SequentialGroup)s of concurrent groups, and so
/// on.
///
/// `run` takes no input and returns nothing. The abstraction makes no promise
/// about error handling: a runnable that can fail decides for itself whether
/// to swallow the failure, report it through a side channel, or panic, and
/// groups pass that behavior through untouched.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Executes the unit of work to completion.
    async fn run(&self);
}
