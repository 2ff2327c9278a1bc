//! Layered configuration and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `ESMAP_*` env vars
//! (nested keys separated by `__`, e.g. `ESMAP_CONNECTION__HOST`).
//! Relative paths given alongside a config are resolved against its directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};

use crate::connection::ConnectionSettings;
use crate::error::{Error, Result};
use crate::layer::LayerConfig;

pub const ENV_PREFIX: &str = "ESMAP_";

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from `dir` for the environment named by `RUST_ENV`.
    pub fn load_in(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(dir, &env_name)
    }

    pub fn load_from(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        let overlay = match env_name {
            "dev" | "development" => Some("config.dev.toml"),
            "prod" | "production" => Some("config.prod.toml"),
            "test" | "testing" => Some("config.test.toml"),
            _ => None,
        };
        if let Some(file) = overlay {
            figment = figment.merge(Toml::file(dir.join(file)));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = Self { figment, base_dir: dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("failed to get '{key}': {e}")))
    }

    /// Directory the configuration files were read from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Expand `path` and resolve it against [`Config::base_dir`] when relative.
    pub fn resolve_path<S: AsRef<str>>(&self, path: S) -> PathBuf {
        resolve_with_base(&self.base_dir, path)
    }

    /// The `[connection]` section, if one is configured.
    pub fn connection(&self) -> Result<Option<ConnectionSettings>> {
        if self.figment.find_value("connection").is_err() {
            return Ok(None);
        }
        self.get("connection").map(Some)
    }

    /// The `[layer]` section, defaulting to the standard layer name and CRS.
    pub fn layer(&self) -> Result<LayerConfig> {
        if self.figment.find_value("layer").is_err() {
            return Ok(LayerConfig::default());
        }
        self.get("layer")
    }

    fn validate(&self) -> Result<()> {
        let layer = self.layer()?;
        if layer.crs.trim().is_empty() {
            return Err(Error::InvalidConfig("layer.crs must not be empty".to_string()));
        }
        if layer.name.trim().is_empty() {
            return Err(Error::InvalidConfig("layer.name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands ${VAR} and $VAR environment variables
/// - Expands leading '~' to the user's home directory
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    PathBuf::from(shellexpand::tilde(&with_env).as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
