//! Error types for the batch library.

use thiserror::Error;

/// Errors that can occur when loading a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Failed to read the plan file.
    #[error("failed to read plan: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the plan document.
    #[error("failed to parse plan: {0}")]
    Parse(#[from] serde_json::Error),
}
