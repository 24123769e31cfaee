//! Running a non-builtin command inside the current (already forked)
//! process: wire up the redirections, then replace the process image.

use std::convert::Infallible;
use std::ffi::CString;
use std::os::fd::{AsRawFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};

use log::debug;
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{dup2, execvp};

use crate::shell::error::ExecError;
use crate::shell::parser::ast::SimpleCommand;

/// Makes `targets` refer to the same open file as `fd`, then closes `fd`
/// unless it already is one of the targets.
pub(super) fn bind(fd: OwnedFd, targets: &[RawFd]) -> nix::Result<()> {
    let raw = fd.as_raw_fd();
    for &target in targets {
        if raw != target {
            dup2(raw, target)?;
        }
    }
    if targets.contains(&raw) {
        let _ = fd.into_raw_fd();
    }
    Ok(())
}

fn open_fd(path: &str, flags: OFlag, mode: Mode) -> nix::Result<OwnedFd> {
    let raw = open(path, flags, mode)?;
    // SAFETY: `open` just returned this descriptor and nothing else owns it.
    Ok(unsafe { OwnedFd::from_raw_fd(raw) })
}

fn open_input(path: &str) -> nix::Result<OwnedFd> {
    open_fd(path, OFlag::O_RDONLY, Mode::empty())
}

fn open_output(path: &str) -> nix::Result<OwnedFd> {
    open_fd(
        path,
        OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        Mode::S_IRUSR | Mode::S_IWUSR,
    )
}

fn apply_redirections(cmd: &SimpleCommand) -> Result<(), ExecError> {
    let program = cmd.program();
    let redirect_err = |path: &str, source: Errno| ExecError::Redirect {
        program: program.to_string(),
        path: path.to_string(),
        source,
    };
    let rebind_err = |source: Errno| ExecError::Rebind {
        program: program.to_string(),
        source,
    };

    if let Some(path) = &cmd.stdin {
        let fd = open_input(path).map_err(|e| redirect_err(path, e))?;
        bind(fd, &[libc::STDIN_FILENO]).map_err(rebind_err)?;
    }

    match (&cmd.stdout, &cmd.stderr) {
        // one descriptor, one shared offset for both streams
        (Some(out), Some(err)) if out == err => {
            let fd = open_output(out).map_err(|e| redirect_err(out, e))?;
            bind(fd, &[libc::STDOUT_FILENO, libc::STDERR_FILENO]).map_err(rebind_err)?;
        }
        (out, err) => {
            if let Some(path) = out {
                let fd = open_output(path).map_err(|e| redirect_err(path, e))?;
                bind(fd, &[libc::STDOUT_FILENO]).map_err(rebind_err)?;
            }
            if let Some(path) = err {
                let fd = open_output(path).map_err(|e| redirect_err(path, e))?;
                bind(fd, &[libc::STDERR_FILENO]).map_err(rebind_err)?;
            }
        }
    }
    Ok(())
}

/// Applies the command's redirections and execs its program. Only returns
/// if something failed; the builtin tag is ignored.
pub fn exec_nonbuiltin(cmd: &SimpleCommand) -> Result<Infallible, ExecError> {
    let program = cmd.program().to_string();
    let argv = cmd
        .tokens
        .iter()
        .map(|token| CString::new(token.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ExecError::NulByte {
            program: program.clone(),
        })?;

    apply_redirections(cmd)?;

    debug!("exec {:?}", cmd.tokens);
    let Some(file) = argv.first() else {
        return Err(ExecError::Exec {
            program,
            source: Errno::ENOENT,
        });
    };
    execvp(file, &argv).map_err(|source| ExecError::Exec { program, source })
}
