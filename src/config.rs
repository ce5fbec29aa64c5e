use anyhow::{Context, Result};
use std::{env, path::PathBuf};

/// Destination connection parameters and the source workbook path, all
/// environment-provided. `.env` files are honored via `dotenvy` in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub file_path: PathBuf,
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {}", name))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = require("DB_PORT")?;
        Ok(Self {
            db_user: require("DB_USER")?,
            db_password: require("DB_PASSWORD")?,
            db_host: require("DB_HOST")?,
            db_port: port
                .parse()
                .with_context(|| format!("DB_PORT is not a valid port number: {:?}", port))?,
            db_name: require("DB_NAME")?,
            file_path: require("FILE_PATH")?.into(),
        })
    }

    /// Connection parameters for `postgres::Config::connect`.
    pub fn pg_config(&self) -> postgres::Config {
        let mut cfg = postgres::Config::new();
        cfg.host(&self.db_host)
            .port(self.db_port)
            .user(&self.db_user)
            .password(&self.db_password)
            .dbname(&self.db_name);
        cfg
    }
}
