use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use log::{debug, error};
use nix::fcntl::{fcntl, FcntlArg, FdFlag};
use nix::unistd::{close, dup2, pipe};

use super::executor::Executor;
use super::process::{self, ExitStatus};
use crate::shell::error::ExecError;
use crate::shell::parser::ast::Node;

/// In a freshly forked stage: drop the pipe end this side does not use and
/// move the other one onto `target`.
fn attach(keep: RawFd, discard: RawFd, target: RawFd) -> nix::Result<()> {
    close(discard)?;
    if keep != target {
        dup2(keep, target)?;
        close(keep)?;
    }
    Ok(())
}

/// A pipe whose ends are not inherited by unrelated programs exec'd while
/// it is open. `dup2` drops the flag on the copies a stage installs.
fn cloexec_pipe() -> nix::Result<(OwnedFd, OwnedFd)> {
    let (read, write) = pipe()?;
    for fd in [&read, &write] {
        fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    }
    Ok((read, write))
}

impl Executor {
    /// Runs `left | right`. Both sides are forked before either is waited on;
    /// each side may itself be a pipeline and recurses inside its own child.
    /// Returns once both sides have terminated, with the right side's status.
    pub fn execute_pipeline(&self, left: &Node, right: &Node) -> Result<ExitStatus, ExecError> {
        let (read, write) = cloexec_pipe().map_err(|e| {
            error!("pipe failed: {}", e);
            ExecError::Pipe(e)
        })?;
        let (read_fd, write_fd) = (read.as_raw_fd(), write.as_raw_fd());
        debug!("pipe r={} w={}", read_fd, write_fd);

        let writer = process::spawn(|| self.stage(left, write_fd, read_fd, libc::STDOUT_FILENO))?;
        let reader = process::spawn(|| self.stage(right, read_fd, write_fd, libc::STDIN_FILENO));

        // the coordinator keeps no end open, or the reader never sees EOF
        drop(read);
        drop(write);

        let reader = match reader {
            Ok(reader) => reader,
            Err(err) => {
                let _ = writer.wait();
                return Err(err);
            }
        };
        debug!("pipeline stages {} | {}", writer.pid(), reader.pid());

        let left_status = writer.wait();
        let right_status = reader.wait()?;
        left_status?;
        Ok(right_status)
    }

    fn stage(&self, node: &Node, keep: RawFd, discard: RawFd, target: RawFd) -> i32 {
        if let Err(e) = attach(keep, discard, target) {
            let err = ExecError::Pipe(e);
            eprintln!("{}", err.render(self.shell_name()));
            return err.exit_code();
        }
        self.run_stage(node)
    }
}
