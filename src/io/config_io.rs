use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::store::StoreError;
use crate::model::config::AppConfig;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "todo.toml";

/// Read `todo.toml` from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, StoreError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let config_text = match fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no {} in {}, using defaults", CONFIG_FILE, data_dir.display());
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(StoreError::ReadError {
                path: config_path,
                source: e,
            });
        }
    };
    let config: AppConfig = toml::from_str(&config_text)?;
    Ok(config)
}

/// Path of the store file configured for `data_dir`
pub fn store_path(data_dir: &Path, config: &AppConfig) -> PathBuf {
    data_dir.join(&config.storage.file)
}
