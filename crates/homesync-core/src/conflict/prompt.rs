//! Interactive driver for the conflict state machine

use tracing::warn;

use super::state::ConflictState;
use super::{Conflict, ConflictResolver, Resolution};
use crate::comparison::DiffGenerator;
use crate::error::Result;

/// Input/output channel the conflict prompt talks through
pub trait PromptIo {
    /// Display a block of text to the user
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    fn show(&mut self, text: &str) -> Result<()>;

    /// Display `prompt` and read one line of input
    ///
    /// End of input should be returned as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Whether diffs should carry ANSI colors
    fn supports_color(&self) -> bool {
        false
    }
}

/// Asks the user about each conflict through a [`PromptIo`]
pub struct InteractiveResolver<I> {
    io: I,
}

impl<I: PromptIo> InteractiveResolver<I> {
    /// Create a resolver around an IO channel
    #[must_use]
    pub const fn new(io: I) -> Self {
        Self { io }
    }

    /// Give back the IO channel
    #[must_use]
    pub fn into_inner(self) -> I {
        self.io
    }

    fn show_diff(&mut self, conflict: &Conflict) -> Result<()> {
        let rendered = if self.io.supports_color() {
            DiffGenerator::generate(&conflict.live, &conflict.repo)
        } else {
            DiffGenerator::generate_plain(&conflict.live, &conflict.repo)
        };

        match rendered {
            Ok(diff) => self.io.show(&diff),
            Err(e) => {
                warn!(path = %conflict.rel.display(), error = %e, "Failed to generate diff");
                self.io.show(&format!(
                    "Could not generate diff: {e:#}\n  Live:       {}\n  Repository: {}\n",
                    conflict.live.display(),
                    conflict.repo.display()
                ))
            }
        }
    }
}

impl<I: PromptIo> ConflictResolver for InteractiveResolver<I> {
    fn resolve(&mut self, conflict: &Conflict) -> Result<Resolution> {
        self.io.show(&format!(
            "\nConflict: {} differs from the repository copy\n  Live:       {}\n  Repository: {}\n",
            conflict.rel.display(),
            conflict.live.display(),
            conflict.repo.display()
        ))?;

        let mut state = ConflictState::Detected;
        while let Some(prompt) = state.prompt() {
            let input = self.io.ask(prompt)?;
            state = state.advance(&input);
            if state == ConflictState::DiffShown {
                self.show_diff(conflict)?;
            }
        }

        if let ConflictState::Invalid(input) = &state {
            self.io.show(&format!(
                "Invalid choice {input:?}: keeping live version of {}\n",
                conflict.rel.display()
            ))?;
        }

        Ok(state.resolution().unwrap_or(Resolution::KeepLive))
    }
}

/// Replays canned answers and records everything shown
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedIo {
    answers: std::collections::VecDeque<String>,
    pub(crate) output: String,
    pub(crate) asked: usize,
}

#[cfg(test)]
impl ScriptedIo {
    pub(crate) fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            output: String::new(),
            asked: 0,
        }
    }
}

#[cfg(test)]
impl PromptIo for ScriptedIo {
    fn show(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.asked += 1;
        self.output.push_str(prompt);
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn conflict(live: &str, repo: &str) -> (TempDir, Conflict) {
        let tmp = TempDir::new().unwrap();
        let live_path = tmp.path().join("live.conf");
        let repo_path = tmp.path().join("repo.conf");
        fs::write(&live_path, live).unwrap();
        fs::write(&repo_path, repo).unwrap();
        let conflict = Conflict {
            rel: "app.conf".into(),
            live: live_path,
            repo: repo_path,
        };
        (tmp, conflict)
    }

    #[test]
    fn test_single_answer() {
        let (_tmp, conflict) = conflict("C\n", "D\n");
        let mut resolver = InteractiveResolver::new(ScriptedIo::new(["B"]));

        let resolution = resolver.resolve(&conflict).unwrap();
        assert_eq!(resolution, Resolution::OverwriteWithBackup);

        let io = resolver.into_inner();
        assert_eq!(io.asked, 1);
        assert!(io.output.contains("Conflict: app.conf"));
    }

    #[test]
    fn test_show_diff_then_choose() {
        let (_tmp, conflict) = conflict("live line\n", "repo line\n");
        let mut resolver = InteractiveResolver::new(ScriptedIo::new(["d", "o"]));

        assert_eq!(resolver.resolve(&conflict).unwrap(), Resolution::Overwrite);

        let io = resolver.into_inner();
        assert_eq!(io.asked, 2);
        assert!(io.output.contains("-live line"));
        assert!(io.output.contains("+repo line"));
    }

    #[test]
    fn test_second_diff_request_is_invalid() {
        let (_tmp, conflict) = conflict("a\n", "b\n");
        let mut resolver = InteractiveResolver::new(ScriptedIo::new(["d", "d", "o"]));

        assert_eq!(resolver.resolve(&conflict).unwrap(), Resolution::KeepLive);

        let io = resolver.into_inner();
        assert_eq!(io.asked, 2, "no third prompt after invalid input");
        assert!(io.output.contains("Invalid choice \"d\""));
    }

    #[test]
    fn test_end_of_input_keeps_live() {
        let (_tmp, conflict) = conflict("a\n", "b\n");
        let mut resolver = InteractiveResolver::new(ScriptedIo::new(Vec::<String>::new()));

        assert_eq!(resolver.resolve(&conflict).unwrap(), Resolution::KeepLive);
        assert!(resolver.into_inner().output.contains("Invalid choice"));
    }
}
