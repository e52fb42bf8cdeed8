use std::path::PathBuf;

use batch_lib::{CommandRunnable, ConcurrentGroup, Plan, PlanError, Runnable, SequentialGroup};
use clap::Parser;
use thiserror::Error;
use tracing::debug;

/// Run shell commands concurrently or sequentially.
///
/// Commands run concurrently by default. Use --sequential to run them one
/// after another, or --plan to execute nested groups described in a JSON
/// file. Each command's captured output is printed as one block when the
/// command finishes.
///
/// Examples:
///   batch "cargo build" "cargo doc"          # both at the same time
///   batch --sequential "make" "make test"    # one after the other
///   batch --plan release.json                # nested groups from a file
#[derive(Debug, Parser)]
#[command(name = "batch")]
#[command(version)]
#[command(about = "Run shell commands concurrently or sequentially")]
struct Cli {
    /// Run the commands one after another instead of concurrently.
    #[arg(long)]
    sequential: bool,

    /// Execute a plan file describing nested groups of commands.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["sequential", "commands"])]
    plan: Option<PathBuf>,

    /// The shell commands to run.
    #[arg(value_name = "COMMAND", required_unless_present = "plan")]
    commands: Vec<String>,
}

#[derive(Debug, Error)]
enum BatchError {
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
}

#[tokio::main]
async fn main() -> Result<(), BatchError> {
    // Setup logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let cli = Cli::parse();

    if let Some(path) = &cli.plan {
        let plan = Plan::load(path)?;
        debug!(commands = plan.command_count(), "running plan");
        plan.build().run().await;
        return Ok(());
    }

    if cli.sequential {
        debug!(commands = cli.commands.len(), "running sequential batch");
        let mut group = SequentialGroup::new();
        for command in &cli.commands {
            group.add(CommandRunnable::shell(command.as_str()));
        }
        group.run().await;
    } else {
        debug!(commands = cli.commands.len(), "running concurrent batch");
        let mut group = ConcurrentGroup::new();
        for command in &cli.commands {
            group.add(CommandRunnable::shell(command.as_str()));
        }
        group.run().await;
    }

    Ok(())
}
