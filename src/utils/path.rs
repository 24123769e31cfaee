use std::env;

use log::error;

/// Working directory for the prompt; empty when it cannot be read (for
/// example after the directory was removed underneath us).
pub fn current_dir(shell_name: &str) -> String {
    let current_dir = match env::current_dir() {
        Ok(x) => x,
        Err(e) => {
            error!("{}: PROMPT: env current_dir error: {}", shell_name, e);
            return String::new();
        }
    };
    match current_dir.to_str() {
        Some(x) => x.to_string(),
        None => {
            error!("{}: PROMPT: to_str error", shell_name);
            current_dir.to_string_lossy().into_owned()
        }
    }
}
