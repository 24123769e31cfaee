mod builtins;
#[allow(clippy::module_inception)]
mod executor;
mod external;
mod pipeline;
mod process;

pub use executor::{Executor, Outcome};
