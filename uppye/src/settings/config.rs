#![allow(dead_code)]

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use uppye_core::settings::auth::AuthSettings;

use crate::settings::directory::DirectorySettings;

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:21342".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
pub struct Settings {
    pub debug: bool,
    pub api: ApiServer,
    pub auth: AuthSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("UPPYE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("UPPYE_RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("debug", false)?
            .set_default("api.bind_address", "0.0.0.0:21342")?
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default"))
            // Add in the current environment file, default to 'development' env
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of UPPYE)
            .add_source(Self::get_environment());

        let s = builder.build()?;
        s.try_deserialize()
    }
}
