use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub name: String,
    pub theme: String,
    pub config_dir: PathBuf,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub logger_stderr: bool,
}

impl Config {
    const DEFAULT_NAME: &'static str = "forksh";

    fn get_config_dir(home: Option<String>) -> PathBuf {
        match home {
            Some(home) => PathBuf::from(home).join(".config").join(Self::DEFAULT_NAME),
            None => PathBuf::from("tmp"),
        }
    }

    fn expand_path(value: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(value).as_ref())
    }

    fn is_truthy(value: &str) -> bool {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    }

    /// Builds the configuration from a variable lookup. `FORKSH_*` values
    /// override the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = Self::get_config_dir(lookup("HOME"));
        let mut config = Config {
            name: String::from(Self::DEFAULT_NAME),
            theme: String::from("default"),
            history_file: config_dir.join(format!(".{}_history", Self::DEFAULT_NAME)),
            editor_mode: String::from("emacs"),
            logger_level: String::from("info"),
            logger_dir: config_dir.join("logs"),
            logger_stderr: false,
            config_dir,
        };

        if let Some(name) = lookup("FORKSH_NAME").filter(|n| !n.trim().is_empty()) {
            config.name = name.trim().to_string();
        }
        if let Some(theme) = lookup("FORKSH_THEME") {
            config.theme = theme;
        }
        if let Some(editor) = lookup("FORKSH_EDITOR") {
            config.editor_mode = editor;
        }
        if let Some(history) = lookup("FORKSH_HISTORY") {
            config.history_file = Self::expand_path(&history);
        }
        if let Some(level) = lookup("FORKSH_LOG_LEVEL") {
            config.logger_level = level;
        }
        if let Some(dir) = lookup("FORKSH_LOG_DIR") {
            config.logger_dir = Self::expand_path(&dir);
        }
        if let Some(flag) = lookup("FORKSH_LOG_STDERR") {
            config.logger_stderr = Self::is_truthy(&flag);
        }
        config
    }

    pub fn new() -> io::Result<Self> {
        // .env files first, the real environment still wins
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let config = Self::from_lookup(|key| env::var(key).ok());

        if let Some(parent) = config.history_file.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(config)
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[("HOME", "/home/zed")]);
        assert_eq!(config.name, "forksh");
        assert_eq!(config.theme, "default");
        assert_eq!(config.config_dir, PathBuf::from("/home/zed/.config/forksh"));
        assert_eq!(
            config.history_file,
            PathBuf::from("/home/zed/.config/forksh/.forksh_history")
        );
        assert_eq!(config.logger_dir, PathBuf::from("/home/zed/.config/forksh/logs"));
        assert_eq!(config.logger_level, "info");
        assert!(!config.logger_stderr);
        assert_eq!(config.get_edit_mode(), EditMode::Emacs);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("HOME", "/home/zed"),
            ("FORKSH_NAME", "swagshell"),
            ("FORKSH_THEME", "dark"),
            ("FORKSH_EDITOR", "VI"),
            ("FORKSH_HISTORY", "/var/tmp/hist"),
            ("FORKSH_LOG_LEVEL", "debug"),
            ("FORKSH_LOG_DIR", "/var/log/forksh"),
            ("FORKSH_LOG_STDERR", "yes"),
        ]);
        assert_eq!(config.name, "swagshell");
        assert_eq!(config.theme, "dark");
        assert_eq!(config.get_edit_mode(), EditMode::Vi);
        assert_eq!(config.history_file, PathBuf::from("/var/tmp/hist"));
        assert_eq!(config.logger_level, "debug");
        assert_eq!(config.logger_dir, PathBuf::from("/var/log/forksh"));
        assert!(config.logger_stderr);
    }

    #[test]
    fn test_blank_name_keeps_default() {
        let config = config_with(&[("FORKSH_NAME", "  ")]);
        assert_eq!(config.name, "forksh");
        assert_eq!(config.config_dir, PathBuf::from("tmp"));
    }
}
