use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    pub environment: Option<String>,
    /// Without a database URL reviews are kept in memory
    pub database_url: Option<String>,
    pub port: Option<u16>,
    pub run_migrations: Option<bool>,
}

impl Settings {
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or("DEV")
    }

    pub fn is_production(&self) -> bool {
        self.environment() == "PROD"
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder();
    let settings = settings.add_source(Environment::default());
    settings.build()?.try_deserialize()
}
