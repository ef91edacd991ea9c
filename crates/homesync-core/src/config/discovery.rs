//! Configuration file discovery

use std::path::{Path, PathBuf};

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// User config (`<config dir>/homesync/config.toml`)
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let cli = cli_path.filter(|p| p.is_file()).map(Path::to_path_buf);
        let global = Self::find_global_config();

        ConfigFiles { cli, global }
    }

    /// Location of the user config file, whether or not it exists
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("homesync").join("config.toml"))
    }

    fn find_global_config() -> Option<PathBuf> {
        Self::global_config_path().filter(|path| path.is_file())
    }
}
