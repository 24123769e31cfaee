use std::fmt;

use log::{debug, error};
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult, Pid};

use crate::shell::error::ExecError;
use crate::shell::signals;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(i32),
    Signaled(Signal),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Exited(0))
    }

    /// Shell-style numeric status: a signal `n` reports as `128 + n`.
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Exited(code) => *code,
            ExitStatus::Signaled(sig) => 128 + *sig as i32,
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exit code: {}", code),
            ExitStatus::Signaled(sig) => write!(f, "killed by {}", sig),
        }
    }
}

/// A forked child that has not been reaped yet.
#[derive(Debug)]
#[must_use = "a spawned child must be waited on"]
pub struct ProcessHandle {
    pid: Pid,
}

impl ProcessHandle {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Blocks until this particular child terminates.
    pub fn wait(self) -> Result<ExitStatus, ExecError> {
        loop {
            match waitpid(self.pid, None) {
                Ok(WaitStatus::Exited(_, code)) => {
                    debug!("child {} exited with {}", self.pid, code);
                    return Ok(ExitStatus::Exited(code));
                }
                Ok(WaitStatus::Signaled(_, sig, _core_dumped)) => {
                    debug!("child {} killed by {}", self.pid, sig);
                    return Ok(ExitStatus::Signaled(sig));
                }
                // stop/continue reports are not requested; keep waiting
                Ok(_) => continue,
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    error!("waitpid({}) failed: {}", self.pid, e);
                    return Err(ExecError::Wait(e));
                }
            }
        }
    }
}

/// Forks. The child runs `run_child` and terminates with the status it
/// returns; it never comes back to the caller.
pub fn spawn<F>(run_child: F) -> Result<ProcessHandle, ExecError>
where
    F: FnOnce() -> i32,
{
    // SAFETY: the child only touches its own descriptors and then either
    // replaces its image or leaves through `_exit`.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!("forked child {}", child);
            Ok(ProcessHandle { pid: child })
        }
        Ok(ForkResult::Child) => {
            signals::restore_default_signals();
            let code = run_child();
            terminate(code)
        }
        Err(e) => {
            error!("fork failed: {}", e);
            Err(ExecError::Fork(e))
        }
    }
}

/// Ends a forked child without running the parent's exit handlers or
/// flushing buffers it inherited.
pub fn terminate(code: i32) -> ! {
    // SAFETY: _exit is async-signal-safe and does not return.
    unsafe { libc::_exit(code) }
}
