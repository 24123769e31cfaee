use log::{debug, info};

use super::builtins;
use super::external::exec_nonbuiltin;
use super::process::{self, ExitStatus};
use crate::shell::error::ExecError;
use crate::shell::parser::ast::{Builtin, Node, Operator, SimpleCommand};

/// What the caller should do after a command line ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A builtin ran inside the shell process.
    Builtin,
    /// Forked work finished. For a pipeline this is the rightmost stage.
    Completed(ExitStatus),
    /// `exit` was requested at top level.
    Exit,
}

pub struct Executor {
    shell_name: String,
}

impl Executor {
    pub fn new(shell_name: impl Into<String>) -> Self {
        Self {
            shell_name: shell_name.into(),
        }
    }

    pub fn shell_name(&self) -> &str {
        &self.shell_name
    }

    pub fn execute(&self, node: &Node) -> Result<Outcome, ExecError> {
        match node {
            Node::Simple(command) => self.execute_simple(command),
            Node::Complex {
                operator: operator @ Operator::Pipe,
                left,
                right,
            } => {
                debug!("running `{}` node", operator.symbol());
                self.execute_pipeline(left, right).map(Outcome::Completed)
            }
        }
    }

    /// Builtins run here; everything else runs in a forked child that this
    /// call waits for.
    pub fn execute_simple(&self, command: &SimpleCommand) -> Result<Outcome, ExecError> {
        match command.builtin {
            Builtin::Exit => {
                debug!("exit requested");
                Ok(Outcome::Exit)
            }
            Builtin::Cd => {
                builtins::cd(&command.tokens)?;
                Ok(Outcome::Builtin)
            }
            Builtin::None => {
                debug!("running {:?}", command.tokens);
                let child = process::spawn(|| self.run_external(command))?;
                let status = child.wait()?;
                if !status.success() {
                    info!("{} finished with {}", command.program(), status);
                }
                Ok(Outcome::Completed(status))
            }
        }
    }

    /// Body of a forked child for a single program. Returns only the exit
    /// code to terminate with, after reporting what went wrong.
    pub(super) fn run_external(&self, command: &SimpleCommand) -> i32 {
        match exec_nonbuiltin(command) {
            Ok(never) => match never {},
            Err(err) => {
                eprintln!("{}", err.render(&self.shell_name));
                err.exit_code()
            }
        }
    }

    /// Body of a forked pipeline stage: leaves exec directly (builtin tags
    /// are ignored), nested pipelines recurse.
    pub(super) fn run_stage(&self, node: &Node) -> i32 {
        match node {
            Node::Simple(command) => self.run_external(command),
            Node::Complex {
                operator: Operator::Pipe,
                left,
                right,
            } => match self.execute_pipeline(left, right) {
                Ok(status) => status.code(),
                Err(err) => {
                    eprintln!("{}", err.render(&self.shell_name));
                    err.exit_code()
                }
            },
        }
    }
}
