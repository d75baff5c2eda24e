//! The "wait for a human" step of reconciliation.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Waits for an external signal that the pending file has been labeled.
///
/// Returns `Ok(true)` to continue with the edited file and `Ok(false)` to
/// leave it for a later run.
pub trait Confirmation {
    fn confirm(&self, pending: &Path) -> io::Result<bool>;
}

impl<F> Confirmation for F
where
    F: Fn(&Path) -> io::Result<bool>,
{
    fn confirm(&self, pending: &Path) -> io::Result<bool> {
        self(pending)
    }
}

/// Prompts on stdout and blocks until Enter is pressed.
///
/// End of input (e.g. stdin redirected from `/dev/null`) counts as declining.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl Confirmation for ConsolePrompt {
    fn confirm(&self, pending: &Path) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        writeln!(
            stdout,
            "Please label the unmatched classrooms in '{}' by filling in \
             building_name, building_code, building_latitude and building_longitude.",
            pending.display()
        )?;
        write!(stdout, "Press Enter after labeling the unmatched classrooms...")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok(read > 0)
    }
}

/// Never waits, for unattended runs.
///
/// The pending file is still written so it can be labeled offline; the
/// labeled result is picked up by a later interactive run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipLabeling;

impl Confirmation for SkipLabeling {
    fn confirm(&self, _pending: &Path) -> io::Result<bool> {
        Ok(false)
    }
}
