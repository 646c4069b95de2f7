//! Config file loading and the process-wide config accessor.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use gembridge_types::error::ConfigError;
use gembridge_types::CompatConfig;

use crate::error::AppResult;

const CONFIG_FILE: &str = "gembridge.json";

static GLOBAL_CONFIG: OnceLock<RwLock<CompatConfig>> = OnceLock::new();

/// Default config file location inside `dir`.
pub fn default_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Load config from `path`. A missing file yields defaults.
pub fn load_config(path: &Path) -> AppResult<CompatConfig> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(CompatConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config: CompatConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    validate_config(&config)?;

    tracing::info!("Loaded config from {} (thinking mode: {:?})", path.display(), config.thinking.mode);
    Ok(config)
}

/// Reject values that would make response handling useless.
pub fn validate_config(config: &CompatConfig) -> Result<(), ConfigError> {
    if config.response.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError {
            field: "response.max_body_bytes".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Save config to `path`.
pub fn save_config(path: &Path, config: &CompatConfig) -> AppResult<()> {
    validate_config(config)?;
    let temp_path = path.with_extension("json.tmp");

    let content =
        serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;

    // Atomic write
    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, path).map_err(|e| ConfigError::from_io_error(&e))?;
    Ok(())
}

/// Get the current config. Returns defaults if not yet initialized.
pub fn get_compat_config() -> CompatConfig {
    GLOBAL_CONFIG
        .get()
        .map(|lock| match lock.read() {
            Ok(cfg) => cfg.clone(),
            Err(poisoned) => {
                tracing::error!("compat config RwLock poisoned, recovering value");
                poisoned.into_inner().clone()
            },
        })
        .unwrap_or_default()
}

/// Replace the global config. Called at startup and on reload.
pub fn update_compat_config(config: CompatConfig) {
    let lock = GLOBAL_CONFIG.get_or_init(|| RwLock::new(CompatConfig::default()));
    match lock.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => {
            tracing::error!("compat config RwLock poisoned during update, recovering");
            *poisoned.into_inner() = config;
        },
    }
}

/// Mutex for serializing tests that mutate the global config.
#[cfg(test)]
pub static CONFIG_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
