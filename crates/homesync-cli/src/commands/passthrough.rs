use std::ffi::{OsStr, OsString};

use anyhow::Context;
use homesync_core::paths::PathTranslator;
use homesync_core::vcs::VersionControl;

use crate::commands::CommandOptions;
use crate::commands::common::{exit_code, resolver};
use crate::interrupt::WorkGuard;

pub struct Passthrough;

impl Passthrough {
    /// Run `git <args>` inside the repository, synced on both sides
    ///
    /// The subcommand name is passed verbatim; every later argument naming
    /// an existing path under the home directory becomes home-relative.
    pub fn execute(args: &[OsString], options: &CommandOptions) -> anyhow::Result<i32> {
        let session = options.session()?;
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let settings = session.settings();
        let translator = PathTranslator::new(&settings.paths, cwd, settings.external_paths);
        let translated: Vec<OsString> = match args.split_first() {
            Some((subcommand, rest)) => std::iter::once(subcommand.clone())
                .chain(translator.translate_all(rest))
                .collect(),
            None => Vec::new(),
        };
        let mut resolver = resolver(settings.conflict);

        let outcome = session.run(resolver.as_mut(), |session| {
            let argv: Vec<&OsStr> = translated.iter().map(OsString::as_os_str).collect();
            let _guard = WorkGuard::enter();
            let status = session.vcs().run(&argv)?;
            Ok(exit_code(status))
        })?;

        options.report("Inbound sync", &outcome.inbound, false);
        options.report("Outbound sync", &outcome.outbound, false);
        Ok(outcome.status)
    }
}
