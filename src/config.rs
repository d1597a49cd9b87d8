//! Runtime configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config <PATH>`, else `matcalc.toml` in the working directory)
//! 3. environment variables (`.env` is loaded first via `dotenvy`)
//! 4. command-line flags (applied by `app`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calculations::DEFAULT_RESERVE_PERCENT;
use crate::calculations::material::validate_reserve;
use crate::error::AppError;
use crate::logging::LoggingConfig;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "matcalc.toml";

pub const ENV_RESERVE_PERCENT: &str = "MATCALC_RESERVE_PERCENT";
pub const ENV_OUTPUT_DIR: &str = "MATCALC_OUTPUT_DIR";
pub const ENV_CURRENCY: &str = "MATCALC_CURRENCY";
pub const ENV_CATALOG: &str = "MATCALC_CATALOG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extra material bought on top of the covered area, in percent.
    pub reserve_percent: f64,
    /// Directory for exports with generated file names.
    pub output_dir: PathBuf,
    /// Currency label printed next to costs.
    pub currency: String,
    /// Material catalog JSON; the built-in catalog when unset.
    pub catalog: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reserve_percent: DEFAULT_RESERVE_PERCENT,
            output_dir: PathBuf::from("."),
            currency: "₽".to_string(),
            catalog: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Resolve the configuration from file and process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };

        let env: HashMap<String, String> = [ENV_RESERVE_PERCENT, ENV_OUTPUT_DIR, ENV_CURRENCY, ENV_CATALOG]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        config.resolve(&env)
    }

    /// Apply `env` overrides, then validate the merged values.
    pub fn resolve(mut self, env: &HashMap<String, String>) -> Result<Self, AppError> {
        self.apply_env(env)?;
        self.validate()?;
        Ok(self)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read config file '{}': {e}", path.display())))?;
        let config = Self::from_toml(&content)
            .map_err(|e| AppError::config(format!("{} ({})", e.message(), path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Parse TOML; values are validated by `resolve` once overrides are applied.
    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::config(format!("Failed to parse config: {e}")))
    }

    /// Apply `MATCALC_*` overrides from `env`.
    pub fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<(), AppError> {
        if let Some(raw) = env.get(ENV_RESERVE_PERCENT) {
            self.reserve_percent = raw
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("{ENV_RESERVE_PERCENT} must be a number (got '{raw}')")))?;
        }
        if let Some(dir) = env.get(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(currency) = env.get(ENV_CURRENCY) {
            self.currency = currency.clone();
        }
        if let Some(catalog) = env.get(ENV_CATALOG).filter(|c| !c.is_empty()) {
            self.catalog = Some(PathBuf::from(catalog));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_reserve(self.reserve_percent).map_err(|e| AppError::config(e.message()))?;
        if self.currency.trim().is_empty() {
            return Err(AppError::config("currency cannot be empty"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::config("output_dir cannot be empty"));
        }
        Ok(())
    }
}
