use std::io::Write;
use std::sync::mpsc;

use tracker_core::ConfirmationGate;

/// Asks on the terminal and takes the next input line as the answer.
///
/// Blocks the dispatch loop until a line arrives, the way a modal dialog
/// blocks a page script.
pub struct LineConfirmation<'a> {
    lines: &'a mpsc::Receiver<String>,
}

impl<'a> LineConfirmation<'a> {
    pub fn new(lines: &'a mpsc::Receiver<String>) -> Self {
        Self { lines }
    }
}

impl ConfirmationGate for LineConfirmation<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        match self.lines.recv() {
            Ok(answer) => is_yes(&answer),
            // Input closed: treat as cancel.
            Err(_) => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
