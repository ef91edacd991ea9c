use std::process::Command;

use anyhow::Context;

use crate::commands::CommandOptions;
use crate::commands::common::{exit_code, resolver};
use crate::interrupt::WorkGuard;

pub struct Shell;

impl Shell {
    /// Interactive shell in the repository, synced on both sides
    pub fn execute(options: &CommandOptions) -> anyhow::Result<i32> {
        let session = options.session()?;
        let program = session
            .settings()
            .shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok())
            .unwrap_or_else(|| "sh".to_string());
        let mut resolver = resolver(session.settings().conflict);

        let outcome = session.run(resolver.as_mut(), |session| {
            let repo = session.settings().paths.repo();
            let _guard = WorkGuard::enter();
            let status = Command::new(&program)
                .current_dir(repo)
                .status()
                .with_context(|| format!("Failed to start shell `{program}`"))?;
            Ok(exit_code(status))
        })?;

        options.report("Inbound sync", &outcome.inbound, false);
        options.report("Outbound sync", &outcome.outbound, false);
        Ok(outcome.status)
    }
}
