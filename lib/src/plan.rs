//! Declarative batch plans.
//!
//! A plan is a JSON description of a command tree: command leaves nested
//! inside sequential and concurrent groups to any depth. Plans let a caller
//! (the CLI in particular) express composition as data instead of code.
//!
//! ```json
//! {
//!   "kind": "concurrent",
//!   "steps": [
//!     { "kind": "command", "command": "cargo doc" },
//!     {
//!       "kind": "sequential",
//!       "steps": [
//!         { "kind": "command", "command": "cargo build" },
//!         { "kind": "command", "command": "cargo test" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{CommandRunnable, ConcurrentGroup, PlanError, Runnable, SequentialGroup, Sink};

/// A node in a declarative command tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Plan {
    /// A single shell command line.
    Command {
        /// The command line, run via `/bin/sh -c`.
        command: String,
    },
    /// Steps that run one after another.
    Sequential {
        /// The sub-plans, in execution order.
        steps: Vec<Plan>,
    },
    /// Steps that run at the same time.
    Concurrent {
        /// The sub-plans; completion order is unspecified.
        steps: Vec<Plan>,
    },
}

impl Plan {
    /// Parses a plan from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a plan file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Returns the number of command leaves in the tree.
    #[must_use]
    pub fn command_count(&self) -> usize {
        match self {
            Plan::Command { .. } => 1,
            Plan::Sequential { steps } | Plan::Concurrent { steps } => {
                steps.iter().map(Plan::command_count).sum()
            }
        }
    }

    /// Builds the runnable tree this plan describes, with every command
    /// writing to standard output.
    #[must_use]
    pub fn build(&self) -> Arc<dyn Runnable> {
        fn stdout_sink() -> Sink {
            Box::new(io::stdout())
        }
        self.build_with(&stdout_sink)
    }

    /// Builds the runnable tree, asking `make_sink` for a fresh sink per
    /// command leaf.
    pub fn build_with(&self, make_sink: &dyn Fn() -> Sink) -> Arc<dyn Runnable> {
        match self {
            Plan::Command { command } => {
                Arc::new(CommandRunnable::shell(command.as_str()).with_sink(make_sink()))
            }
            Plan::Sequential { steps } => {
                let mut group = SequentialGroup::new();
                group.add_all(steps.iter().map(|step| step.build_with(make_sink)));
                Arc::new(group)
            }
            Plan::Concurrent { steps } => {
                let mut group = ConcurrentGroup::new();
                group.add_all(steps.iter().map(|step| step.build_with(make_sink)));
                Arc::new(group)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        Plan::Concurrent {
            steps: vec![
                Plan::Command {
                    command: "echo one".to_string(),
                },
                Plan::Sequential {
                    steps: vec![
                        Plan::Command {
                            command: "echo two".to_string(),
                        },
                        Plan::Command {
                            command: "echo three".to_string(),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn plan_serializes_with_kind_tags() {
        let plan = Plan::Command {
            command: "echo hi".to_string(),
        };
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"kind":"command","command":"echo hi"}"#);

        let plan = Plan::Sequential { steps: vec![] };
        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(json, r#"{"kind":"sequential","steps":[]}"#);
    }

    #[test]
    fn plan_round_trips_through_json() {
        let plan = sample_plan();
        let json = serde_json::to_string(&plan).unwrap();
        let restored = Plan::from_json(&json).unwrap();
        assert_eq!(restored, plan);
    }

    #[test]
    fn from_json_rejects_unknown_kinds() {
        let err = Plan::from_json(r#"{"kind":"parallel","steps":[]}"#).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_files() {
        let err = Plan::load("/nonexistent/plan.json").unwrap_err();
        assert!(matches!(err, PlanError::Read(_)));
    }

    #[test]
    fn command_count_counts_leaves() {
        assert_eq!(sample_plan().command_count(), 3);
        assert_eq!(Plan::Sequential { steps: vec![] }.command_count(), 0);
        assert_eq!(
            Plan::Command {
                command: "true".to_string()
            }
            .command_count(),
            1
        );
    }
}
