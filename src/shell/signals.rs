use log::warn;
use nix::sys::signal::{signal, SigHandler, Signal};

const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];
// the Rust runtime ignores SIGPIPE and exec would pass that on
const CHILD_DEFAULT_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGQUIT, Signal::SIGPIPE];

/// Keeps ^C and ^\ at the prompt from killing the shell itself.
pub fn ignore_interactive_signals() {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: SigIgn installs no handler code.
        if let Err(e) = unsafe { signal(sig, SigHandler::SigIgn) } {
            warn!("failed to ignore {}: {}", sig, e);
        }
    }
}

/// Called in every forked child before it runs anything, so external
/// programs get the usual dispositions back.
pub fn restore_default_signals() {
    for sig in CHILD_DEFAULT_SIGNALS {
        // SAFETY: SigDfl installs no handler code.
        let _ = unsafe { signal(sig, SigHandler::SigDfl) };
    }
}
