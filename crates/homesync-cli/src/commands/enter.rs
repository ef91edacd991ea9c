use crate::commands::CommandOptions;

pub struct SyncEnter;

impl SyncEnter {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<i32> {
        let session = options.session()?;
        let entered = session.enter()?;
        options.report("Inbound sync", &entered.report, true);
        Ok(0)
    }
}
