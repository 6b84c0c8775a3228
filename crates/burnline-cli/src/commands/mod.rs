use std::path::PathBuf;

use burnline_core::Config;

pub mod config;
pub mod line;

/// Options shared by every subcommand.
pub struct GlobalOpts {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub plain: bool,
}

impl GlobalOpts {
    pub fn load_config(&self) -> burnline_core::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn save_config(&self, config: &Config) -> burnline_core::Result<()> {
        match &self.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }
}
