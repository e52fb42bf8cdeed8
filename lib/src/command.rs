//! External command execution.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::Runnable;

/// Where a command's captured output is written.
pub type Sink = Box<dyn Write + Send>;

/// Runs an external command and forwards its output to a sink.
///
/// Standard output and standard error are captured while the command runs and
/// written to the sink as a single block once it exits, standard output
/// first. If the command cannot be started, or exits with a non-zero status,
/// the failure's textual description is written in place of the captured
/// output. A failing command is not an error to the group machinery, it is
/// just output.
///
/// The sink defaults to the process's standard output; replace it with
/// [`with_sink`](CommandRunnable::with_sink).
///
/// ## A failed sink write aborts the process
///
/// If the sink itself cannot accept the output block, there is nowhere left
/// to report the problem: the groups running this command inspect no errors,
/// and the command's result would be silently lost. `run` records the
/// failure through `tracing` and then calls [`std::process::abort`]. Callers
/// who need a softer failure mode must provide a sink that cannot fail.
pub struct CommandRunnable {
    program: String,
    args: Vec<String>,
    sink: Mutex<Sink>,
}

impl CommandRunnable {
    /// Creates a runnable that executes `program` with no arguments, writing
    /// to standard output.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            sink: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Creates a runnable that executes a shell command line via `/bin/sh -c`.
    #[must_use]
    pub fn shell(command: impl Into<String>) -> Self {
        Self::new("/bin/sh").arg("-c").arg(command)
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends every argument yielded by `args`.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replaces the sink the captured output is written to.
    #[must_use]
    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = Mutex::new(sink);
        self
    }
}

#[async_trait]
impl Runnable for CommandRunnable {
    async fn run(&self) {
        debug!(program = %self.program, "running command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await;

        let block = match output {
            Ok(output) if output.status.success() => {
                let mut combined = output.stdout;
                combined.extend_from_slice(&output.stderr);
                combined
            }
            Ok(output) => format!("command failed: {}", output.status).into_bytes(),
            Err(err) => format!("command failed: {err}").into_bytes(),
        };

        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = write_block(&mut sink, &block) {
            error!(program = %self.program, %err, "failed to write command output");
            std::process::abort();
        }
    }
}

fn write_block(sink: &mut Sink, block: &[u8]) -> io::Result<()> {
    sink.write_all(block)?;
    sink.flush()
}
