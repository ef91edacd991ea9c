//! Unified diff between the live and repository copy of a file

use std::fmt::Write;
use std::fs;
use std::path::Path;

use anyhow::Context;
use similar::{ChangeTag, TextDiff};

use crate::error::Result;

const DIFF_CONTEXT_LINES: usize = 3;

/// Diff generator for the conflict prompt
///
/// Lines only present in the live copy are shown as deletions and lines only
/// present in the repository copy as insertions, i.e. the diff reads as
/// "what overwriting the live file would change".
pub struct DiffGenerator;

impl DiffGenerator {
    /// Generate a color-coded unified diff between two files
    ///
    /// # Errors
    ///
    /// Returns an error if files cannot be read.
    pub fn generate(live: &Path, repo: &Path) -> Result<String> {
        Self::render(live, repo, true)
    }

    /// Generate the same diff without ANSI colors
    ///
    /// # Errors
    ///
    /// Returns an error if files cannot be read.
    pub fn generate_plain(live: &Path, repo: &Path) -> Result<String> {
        Self::render(live, repo, false)
    }

    fn render(live: &Path, repo: &Path, color: bool) -> Result<String> {
        let live_bytes = fs::read(live)
            .with_context(|| format!("Failed to read live file: {}", live.display()))?;
        let repo_bytes = fs::read(repo)
            .with_context(|| format!("Failed to read repository file: {}", repo.display()))?;

        match (std::str::from_utf8(&live_bytes), std::str::from_utf8(&repo_bytes)) {
            (Ok(live_text), Ok(repo_text)) => Ok(Self::generate_from_content(
                live_text, repo_text, live, repo, color,
            )),
            _ => Ok(format!(
                "Binary files {} and {} differ\n",
                live.display(),
                repo.display()
            )),
        }
    }

    /// Generate a diff from string contents
    #[must_use]
    pub fn generate_from_content(
        live_content: &str,
        repo_content: &str,
        live_path: &Path,
        repo_path: &Path,
        color: bool,
    ) -> String {
        let paint = |code: &'static str| if color { code } else { "" };
        let diff = TextDiff::from_lines(live_content, repo_content);

        let mut output = String::new();

        let _ = writeln!(
            output,
            "{}--- {} (live){}",
            paint("\x1b[1m"),
            live_path.display(),
            paint("\x1b[0m")
        );
        let _ = writeln!(
            output,
            "{}+++ {} (repository){}",
            paint("\x1b[1m"),
            repo_path.display(),
            paint("\x1b[0m")
        );

        for group in diff.grouped_ops(DIFF_CONTEXT_LINES) {
            let (Some(first), Some(last)) = (group.first(), group.last()) else {
                continue;
            };
            let old_start = first.old_range().start;
            let new_start = first.new_range().start;
            let old_len = last.old_range().end - old_start;
            let new_len = last.new_range().end - new_start;
            let _ = writeln!(
                output,
                "{}@@ -{},{} +{},{} @@{}",
                paint("\x1b[36m"),
                old_start + 1,
                old_len,
                new_start + 1,
                new_len,
                paint("\x1b[0m")
            );

            for op in &group {
                for change in diff.iter_changes(op) {
                    let (sign, code) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", ""),
                    };

                    let newline = if change.value().ends_with('\n') {
                        ""
                    } else {
                        "\n"
                    };

                    let _ = write!(
                        output,
                        "{}{sign}{}{newline}{}",
                        paint(code),
                        change.value(),
                        if code.is_empty() { "" } else { paint("\x1b[0m") }
                    );
                }
            }
        }

        output
    }
}
