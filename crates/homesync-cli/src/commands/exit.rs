use crate::commands::CommandOptions;
use crate::commands::common::resolver;

pub struct SyncExit;

impl SyncExit {
    /// Restore repository edits; per-file failures only warn
    pub fn execute(since: Option<&str>, options: &CommandOptions) -> anyhow::Result<i32> {
        let session = options.session()?;
        let mut resolver = resolver(session.settings().conflict);

        let (status, report) = session.exit(0, since, resolver.as_mut())?;
        options.report("Outbound sync", &report, true);
        Ok(status)
    }
}
