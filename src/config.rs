use crate::error::{ConvertError, Result};
use crate::types::config::SarifConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "go-test-sarif.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/go-test-sarif/config.toml";

/// Loads the merged configuration.
///
/// An explicit `--config` path must exist; otherwise `go-test-sarif.toml`
/// in the working directory is used when present. The global file under
/// `$HOME` is layered underneath either one.
pub fn load_config(explicit: Option<&Path>) -> Result<SarifConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));

    let project = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConvertError::ConfigNotFound(path.display().to_string()));
            }
            path.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };

    load_config_with_global(&project, global.as_deref())
}

pub(crate) fn load_config_with_global(
    project_path: &Path,
    global_path: Option<&Path>,
) -> Result<SarifConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, project_path)?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| ConvertError::ConfigParse(e.to_string()))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "loading config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ConvertError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
