//! Configuration types and loading
//!
//! Config path precedence: `--config` > `CONFIG_PATH` env var > `myaussie.toml`.
//! The password is loaded from the MYAUSSIE_PASSWORD env var or
//! `password_file`, never from the TOML itself.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var holding the account password
pub const PASSWORD_ENV: &str = "MYAUSSIE_PASSWORD";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub account: AccountConfig,
}

/// MyAussie login settings
#[derive(Debug, Deserialize)]
pub struct AccountConfig {
    pub username: String,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    /// Path to a file containing the password (alternative to MYAUSSIE_PASSWORD)
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    /// Where session credentials are kept between runs
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("myaussie-credentials.json")
}

impl Config {
    /// Load configuration from a TOML file, then resolve the password.
    ///
    /// Password resolution order:
    /// 1. MYAUSSIE_PASSWORD env var, when set and non-empty
    /// 2. password_file path from config
    ///
    /// A missing password is not an error here: saved credentials may be
    /// enough to restore a session.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if config.account.username.trim().is_empty() {
            return Err(common::Error::Config(
                "account.username must not be empty".into(),
            ));
        }

        let env_password = std::env::var(PASSWORD_ENV)
            .ok()
            .filter(|p| !p.is_empty());
        if let Some(password) = env_password {
            config.account.password = Some(Secret::new(password));
        } else if let Some(ref password_file) = config.account.password_file {
            let password = std::fs::read_to_string(password_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read password_file {}: {e}",
                    password_file.display()
                ))
            })?;
            let password = password.trim_end_matches(['\r', '\n']).to_owned();
            if !password.is_empty() {
                config.account.password = Some(Secret::new(password));
            }
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("myaussie.toml")
    }
}
