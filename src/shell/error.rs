use nix::errno::Errno;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error near unexpected token `|'")]
    EmptyPipeSide,
    #[error("syntax error: expected a file name after `{0}'")]
    MissingRedirectTarget(&'static str),
    #[error("syntax error: missing command name")]
    MissingProgram,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("cd: usage: cd [dir]")]
    CdUsage,
    #[error("cd: {0}: No such file or directory")]
    CdNoSuchDirectory(String),
    #[error("cd failed with exit code: {0}")]
    CdFailed(i32),
    #[error("{program}: {path}: {}", .source.desc())]
    Redirect {
        program: String,
        path: String,
        source: Errno,
    },
    #[error("{program}: cannot rebind standard stream: {}", .source.desc())]
    Rebind { program: String, source: Errno },
    #[error("{program}: argument contains a NUL byte")]
    NulByte { program: String },
    #[error("{program}: {}", .source.desc())]
    Exec { program: String, source: Errno },
    #[error("fork: {}", .0.desc())]
    Fork(#[source] Errno),
    #[error("pipe: {}", .0.desc())]
    Pipe(#[source] Errno),
    #[error("wait: {}", .0.desc())]
    Wait(#[source] Errno),
}

impl ExecError {
    /// The line shown to the user. cd usage and raw cd failures are printed
    /// bare; everything else names the shell first.
    pub fn render(&self, shell_name: &str) -> String {
        match self {
            ExecError::CdUsage | ExecError::CdFailed(_) => self.to_string(),
            _ => format!("{}: {}", shell_name, self),
        }
    }

    /// Status a forked child terminates with after hitting this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Exec {
                source: Errno::ENOENT,
                ..
            } => 127,
            ExecError::Exec {
                source: Errno::EACCES | Errno::ENOEXEC | Errno::EISDIR,
                ..
            } => 126,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prefixes_shell_name() {
        let err = ExecError::Exec {
            program: "nope".to_string(),
            source: Errno::ENOENT,
        };
        assert_eq!(err.render("forksh"), "forksh: nope: No such file or directory");
        assert_eq!(err.exit_code(), 127);

        let err = ExecError::CdNoSuchDirectory("missing".to_string());
        assert_eq!(
            err.render("forksh"),
            "forksh: cd: missing: No such file or directory"
        );
    }

    #[test]
    fn test_render_cd_usage_is_bare() {
        assert_eq!(ExecError::CdUsage.render("forksh"), "cd: usage: cd [dir]");
        assert_eq!(
            ExecError::CdFailed(5).render("forksh"),
            "cd failed with exit code: 5"
        );
    }

    #[test]
    fn test_exit_codes() {
        let not_executable = ExecError::Exec {
            program: "x".to_string(),
            source: Errno::EACCES,
        };
        assert_eq!(not_executable.exit_code(), 126);

        let redirect = ExecError::Redirect {
            program: "cat".to_string(),
            path: "in".to_string(),
            source: Errno::ENOENT,
        };
        assert_eq!(redirect.exit_code(), 1);
        assert_eq!(
            redirect.to_string(),
            "cat: in: No such file or directory"
        );
    }
}
