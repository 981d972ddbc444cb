//! Line-oriented [`Host`] over any reader/writer pair.
//!
//! Generic so the same code drives a real terminal (`stdin`/`stdout`) and
//! in-memory buffers in tests.

use crate::controller::traits::{Host, PromptKind};
use crate::host::launcher::Launcher;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::warn;

pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    launcher: Launcher,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    pub fn new(input: R, output: W, launcher: Launcher) -> Self {
        Self {
            input,
            output,
            launcher,
        }
    }

    /// Print `prompt`, then read one line without its terminator.
    /// `Ok(None)` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Write `text` as is, without a trailing newline.
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        match self.read_line(prompt) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Terminal read failed; treating as cancel");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Host for TerminalHost<R, W> {
    fn open_with_default_application(&mut self, path: &Path) -> bool {
        self.launcher.open(path)
    }

    /// Only an explicit `y`/`yes` confirms.
    fn confirm(&mut self, prompt: PromptKind) -> bool {
        self.ask(&format!("{prompt} [y/N] "))
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    /// An empty answer takes `default`; end of input cancels.
    fn prompt_for_text(&mut self, title: &str, default: &str) -> Option<String> {
        let prompt: String = if default.is_empty() {
            format!("{title} ")
        } else {
            format!("{title} [{default}] ")
        };

        let answer: String = self.ask(&prompt)?;
        let answer: &str = answer.trim();

        match (answer.is_empty(), default.is_empty()) {
            (false, _) => Some(answer.to_string()),
            (true, false) => Some(default.to_string()),
            (true, true) => None,
        }
    }
}
