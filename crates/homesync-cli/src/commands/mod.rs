pub mod common;
pub mod enter;
pub mod exit;
pub mod init;
pub mod passthrough;
pub mod shell;
pub mod track;

pub use common::CommandOptions;
pub use enter::SyncEnter;
pub use exit::SyncExit;
pub use init::Init;
pub use passthrough::Passthrough;
pub use shell::Shell;
pub use track::Track;
