use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Schema version written by this build. [`migrate`] upgrades anything
/// older.
pub const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Files written before versioning existed omit this and read as 0.
    #[serde(default)]
    pub config_version: u32,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Directory of additional authored case files, one case or an array
    /// of cases per `.json` file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_dir: Option<PathBuf>,
    /// Print normal ranges next to study values. Added in v1.
    #[serde(default = "default_show_reference_ranges")]
    pub show_reference_ranges: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            log_filter: default_log_filter(),
            case_dir: None,
            show_reference_ranges: default_show_reference_ranges(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_show_reference_ranges() -> bool {
    true
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.casesim.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Load the user config, falling back to defaults when none exists.
pub fn load_config() -> eyre::Result<CliConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Older layouts may not deserialize into CliConfig until migrated.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = config_version_of(&json)?;

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// The `config_version` field of a raw config document, 0 when absent.
pub fn config_version_of(json: &serde_json::Value) -> eyre::Result<u32> {
    let Some(version) = json.get("config_version") else {
        return Ok(0);
    };
    let version = version
        .as_u64()
        .ok_or_else(|| eyre::eyre!("config_version must be a non-negative integer, got {version}"))?;
    u32::try_from(version).map_err(|_| eyre::eyre!("config_version {version} is out of range"))
}

/// Upgrade a raw config document written at `from_version`, one schema step
/// at a time.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config written by a newer casesim (version {from_version}, this build reads up to {CURRENT_VERSION})"
        ));
    }

    // v0 → v1: `log_level` became `log_filter`, added show_reference_ranges
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(level) = obj.remove("log_level") {
            obj.entry("log_filter").or_insert(level);
        }
        obj.entry("show_reference_ranges")
            .or_insert(serde_json::Value::Bool(true));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed log_level, added show_reference_ranges)");
    }

    Ok(json)
}

/// Save to the user config directory. Returns the written path.
pub fn save_config(config: &CliConfig) -> eyre::Result<PathBuf> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &CliConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // A migrated config is saved in the current layout.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    // A crash mid-write leaves the previous config.json intact.
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}
