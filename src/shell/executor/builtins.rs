use log::debug;
use nix::errno::Errno;
use nix::unistd::chdir;

use crate::shell::error::ExecError;

/// `cd <dir>`: exactly one argument, resolved by chdir itself.
pub fn cd(tokens: &[String]) -> Result<(), ExecError> {
    let [keyword, target] = tokens else {
        return Err(ExecError::CdUsage);
    };
    if keyword != "cd" {
        return Err(ExecError::CdUsage);
    }

    match chdir(target.as_str()) {
        Ok(()) => {
            debug!("cd {}", target);
            Ok(())
        }
        Err(Errno::ENOENT | Errno::ENOTDIR | Errno::EACCES) => {
            Err(ExecError::CdNoSuchDirectory(target.clone()))
        }
        Err(e) => Err(ExecError::CdFailed(e as i32)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    static CWD_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that change the process working directory.
    pub(crate) fn cwd_lock() -> MutexGuard<'static, ()> {
        CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_usage_errors_leave_cwd_alone() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();

        assert!(matches!(cd(&words("cd")), Err(ExecError::CdUsage)));
        assert!(matches!(cd(&words("cd /tmp /")), Err(ExecError::CdUsage)));
        assert!(matches!(cd(&words("chdir /tmp")), Err(ExecError::CdUsage)));
        assert!(matches!(cd(&[]), Err(ExecError::CdUsage)));

        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_missing_directory() {
        let _guard = cwd_lock();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").to_string_lossy().into_owned();

        match cd(&["cd".to_string(), missing.clone()]) {
            Err(ExecError::CdNoSuchDirectory(target)) => assert_eq!(target, missing),
            other => panic!("expected missing directory, got {:?}", other),
        }
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_relative_round_trip() {
        let _guard = cwd_lock();
        let original = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().canonicalize().unwrap();
        std::fs::create_dir(base.join("inner")).unwrap();

        cd(&["cd".to_string(), base.to_string_lossy().into_owned()]).unwrap();
        cd(&words("cd inner")).unwrap();
        assert_eq!(env::current_dir().unwrap(), base.join("inner"));
        cd(&words("cd ..")).unwrap();
        assert_eq!(env::current_dir().unwrap(), base);

        env::set_current_dir(original).unwrap();
    }
}
