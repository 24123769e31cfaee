use log::{debug, error, warn};
use std::error::Error;
use std::io::Write;
use std::process;

use crate::shell::executor::{Executor, Outcome};
use crate::shell::parser::Parser;
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::signals;
use crate::utils::config::Config;
use crate::utils::path;
use crate::utils::theme::Theme;

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    readline: ReadlineManager<'a>,
    executor: Executor,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            config,
            theme: Theme::load_theme(&config.theme),
            readline: ReadlineManager::new(config)?,
            executor: Executor::new(config.name.as_str()),
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("starting {}", self.config.name);

        signals::ignore_interactive_signals();
        self.readline.load_history();

        self.run_loop()?;
        self.readline.save_history();

        debug!("leaving {}", self.config.name);
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        loop {
            std::io::stdout().flush()?;
            let prompt = self.theme.prompt(&path::current_dir(&self.config.name));

            match self.readline.readline(&prompt) {
                Ok(line) => self.handle_input(&line)?,
                Err(ReadlineError::Eof) => {
                    debug!("end of input");
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("line interrupted");
                }
                Err(err) => {
                    error!("readline failed: {}", err);
                    eprintln!(
                        "{}",
                        (self.theme.error_style)(&format!("{}: {}", self.config.name, err))
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str) -> Result<(), Box<dyn Error>> {
        let node = match Parser::new(line).parse_command() {
            Ok(Some(node)) => node,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!("parse error: {}", e);
                eprintln!(
                    "{}",
                    (self.theme.error_style)(&format!("{}: {}", self.config.name, e))
                );
                return Ok(());
            }
        };
        self.readline.add_history(line)?;

        match self.executor.execute(&node) {
            Ok(Outcome::Exit) => self.exit(),
            Ok(Outcome::Completed(status)) if !status.success() => {
                println!("{}", (self.theme.info_style)(&status.to_string()));
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}", (self.theme.error_style)(&e.render(&self.config.name)));
            }
        }
        Ok(())
    }

    fn exit(&mut self) -> ! {
        self.readline.save_history();
        println!("{}", (self.theme.success_style)(&self.theme.exit_message));
        debug!("exit builtin, leaving {}", self.config.name);
        process::exit(0)
    }
}
