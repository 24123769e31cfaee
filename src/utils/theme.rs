use colored::Colorize;

pub type Style = Box<dyn Fn(&str) -> String>;

pub struct Theme {
    pub prompt_style: Style,
    pub error_style: Style,
    pub info_style: Style,
    pub success_style: Style,
    pub exit_message: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt_style: Box::new(|s: &str| s.bright_cyan().to_string()),
            error_style: Box::new(|s: &str| s.bright_red().to_string()),
            info_style: Box::new(|s: &str| s.yellow().to_string()),
            success_style: Box::new(|s: &str| s.bright_green().to_string()),
            exit_message: String::from("bye"),
        }
    }
}

impl Theme {
    pub fn load_theme(theme_name: &str) -> Theme {
        match theme_name {
            "dark" => Theme {
                prompt_style: Box::new(|s: &str| s.bright_purple().to_string()),
                error_style: Box::new(|s: &str| s.red().to_string()),
                info_style: Box::new(|s: &str| s.bright_black().to_string()),
                success_style: Box::new(|s: &str| s.magenta().to_string()),
                exit_message: String::from("bye"),
            },
            _ => Theme::default(),
        }
    }

    /// `<cwd>> `, styled.
    pub fn prompt(&self, cwd: &str) -> String {
        format!("{}> ", (self.prompt_style)(cwd))
    }
}
