//! Settings for the application, read from `settings.toml` in the working
//! directory.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter applied to all workspace targets.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// The single operator allowed to talk to the bot.
    pub allowed_user: u64,
    /// Chat id of the channel the log records are published to.
    pub channel: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub telegram: Telegram,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
