use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use eventra_core::Ui;
use tracing::info;

/// `Ui` for the command-line driver.
///
/// Alerts go to stdout, confirmations are read from stdin, and navigation is
/// recorded for the driver to act on once the handler returns.
pub struct TerminalUi {
    assume_yes: bool,
    location: Mutex<Option<String>>,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            location: Mutex::new(None),
        }
    }

    /// Last location navigated to since the previous call.
    pub fn take_location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        println!("! {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn navigate(&self, location: &str) {
        info!(location, "Navigating");
        *self.location.lock().unwrap_or_else(|e| e.into_inner()) = Some(location.to_string());
    }
}
