//! Composable concurrent and sequential execution of units of work.
//!
//! This library provides a single abstraction, [`Runnable`] ("execute and
//! eventually complete"), and two ways to combine runnables: one after
//! another, or all at once. Groups are themselves runnable, so parallel and
//! sequential composition nest to any depth.
//!
//! ## Core Types
//!
//! - [`Runnable`] - The unit-of-work capability every component implements
//! - [`SequentialGroup`] - Runs its members in insertion order
//! - [`ConcurrentGroup`] - Runs its members on independent tasks and joins
//!   on all of them
//!
//! ## Command Execution
//!
//! - [`CommandRunnable`] - Leaf that runs an external command and writes its
//!   captured output to a [`Sink`]
//!
//! ## Declarative Plans
//!
//! - [`Plan`] - JSON description of a nested command tree
//! - [`PlanError`] - Read/parse failures when loading a plan
//!
//! ## Examples
//!
//! ```no_run
//! use batch_lib::{CommandRunnable, ConcurrentGroup, Runnable, SequentialGroup};
//!
//! # async fn example() {
//! // Build and check docs at the same time; within the build branch,
//! // compile before testing.
//! let mut checks = SequentialGroup::new();
//! checks
//!     .add(CommandRunnable::shell("cargo build"))
//!     .add(CommandRunnable::shell("cargo test"));
//!
//! ConcurrentGroup::new()
//!     .add(checks)
//!     .add(CommandRunnable::shell("cargo doc"))
//!     .run()
//!     .await;
//! # }
//! ```

mod command;
mod concurrent;
mod error;
mod plan;
mod runnable;
mod sequential;

pub use command::{CommandRunnable, Sink};
pub use concurrent::ConcurrentGroup;
pub use error::PlanError;
pub use plan::Plan;
pub use runnable::Runnable;
pub use sequential::SequentialGroup;
