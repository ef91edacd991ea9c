//! Terminal side of the conflict prompt

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use dialoguer::console::Term;
use homesync_core::conflict::PromptIo;

/// Prompts on stderr and reads answers from stdin
///
/// Answers are read line by line so they can be piped in; end of input
/// reads as an empty answer.
pub struct TerminalIo {
    term: Term,
}

impl TerminalIo {
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

/// Next line of `input` without its line ending, or `""` at end of input
fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(String::new());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl PromptIo for TerminalIo {
    fn show(&mut self, text: &str) -> Result<()> {
        self.term
            .write_str(text)
            .context("Failed to write to terminal")
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.show(prompt)?;

        // Term only reads from a tty; redirected stderr must not hide stdin
        let answer = if self.term.is_term() {
            match self.term.read_line() {
                Ok(line) => Ok(line),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(String::new()),
                Err(e) => Err(e),
            }
        } else {
            read_answer(&mut io::stdin().lock())
        };
        answer.context("Failed to read answer")
    }

    fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }
}
