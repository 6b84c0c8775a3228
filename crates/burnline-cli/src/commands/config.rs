use burnline_core::Config;
use clap::Subcommand;

use super::GlobalOpts;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "display.color", "session.gap_hours")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Show the whole config as JSON
    Show,
    /// Reset config to defaults
    Reset,
}

pub fn run(opts: &GlobalOpts, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = opts.load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = opts.load_config()?;
            config.set(&key, &value)?;
            opts.save_config(&config)?;
            println!("ok");
        }
        ConfigAction::Show => {
            let config = opts.load_config()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            opts.save_config(&Config::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
