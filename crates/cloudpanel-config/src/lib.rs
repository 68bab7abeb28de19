pub mod error;

pub use error::*;

use cloudpanel_draft::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing directly at a config file
pub const CONFIG_PATH_ENV: &str = "CLOUDPANEL_CONFIG_PATH";

/// Confirmation shown after a successful commit
pub const SAVED_MESSAGE: &str = "Your changes have been saved";

const CANDIDATES: [&str; 2] = ["cloudpanel.local.yaml", "cloudpanel.yaml"];

/// Timing of the post-commit reconciliation for one resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleWindows {
    /// Delay before an unchanged draft is discarded
    pub settle_ms: u64,
    /// Delay before the confirmation message is cleared; `None` keeps it
    /// until the next edit
    pub message_ms: Option<u64>,
    pub message: String,
}

impl Default for SettleWindows {
    fn default() -> Self {
        Self {
            settle_ms: 1000,
            message_ms: Some(3000),
            message: SAVED_MESSAGE.to_string(),
        }
    }
}

impl SettleWindows {
    pub fn new(settle_ms: u64, message_ms: Option<u64>) -> Self {
        Self {
            settle_ms,
            message_ms,
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Built-in windows for a resource kind
    pub fn defaults_for(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Device => Self::new(3000, None).with_message("Device name updated"),
            _ => Self::default(),
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn message_window(&self) -> Option<Duration> {
        self.message_ms.map(Duration::from_millis)
    }
}

/// Console configuration
///
/// ```yaml
/// settle:
///   firewall:
///     settle_ms: 2000
///   device:
///     settle_ms: 3000
///     message: Device name updated
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Per-kind overrides of the built-in windows
    #[serde(default)]
    pub settle: HashMap<ResourceKind, SettleWindows>,
}

impl ConsoleConfig {
    /// Settle windows for `kind`, falling back to the built-in defaults
    pub fn windows(&self, kind: ResourceKind) -> SettleWindows {
        self.settle
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| SettleWindows::defaults_for(kind))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the discovered config file, or the defaults when there is none
    pub fn load_or_default() -> Result<Self> {
        match find_config_file() {
            Ok(path) => Self::load(path),
            Err(ConfigError::ConfigFileNotFound) => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// cloudpanel config directory, created if missing
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("cloudpanel");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Find the config file
///
/// Search order:
/// 1. `CLOUDPANEL_CONFIG_PATH`
/// 2. current directory: cloudpanel.local.yaml, cloudpanel.yaml
/// 3. `./.cloudpanel/`, same order
/// 4. `~/.config/cloudpanel/cloudpanel.yaml`
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    let local_dir = current_dir.join(".cloudpanel");
    if local_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = local_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("cloudpanel").join("cloudpanel.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn in_dir<R>(dir: &Path, f: impl FnOnce() -> R) -> R {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = f();
        std::env::set_current_dir(original_dir).unwrap();
        result
    }

    #[test]
    fn test_default_windows() {
        let config = ConsoleConfig::default();

        let firewall = config.windows(ResourceKind::Firewall);
        assert_eq!(firewall.settle(), Duration::from_millis(1000));
        assert_eq!(firewall.message_window(), Some(Duration::from_millis(3000)));
        assert_eq!(firewall.message, SAVED_MESSAGE);

        let device = config.windows(ResourceKind::Device);
        assert_eq!(device.settle(), Duration::from_millis(3000));
        assert_eq!(device.message_window(), None);
        assert_eq!(device.message, "Device name updated");
    }

    #[test]
    fn test_parse_overrides() {
        let config: ConsoleConfig = serde_yaml::from_str(
            "settle:\n  disk:\n    settle_ms: 2500\n    message_ms: null\n",
        )
        .unwrap();

        let disk = config.windows(ResourceKind::Disk);
        assert_eq!(disk.settle_ms, 2500);
        assert_eq!(disk.message_window(), None);
        assert_eq!(disk.message, SAVED_MESSAGE);

        assert_eq!(
            config.windows(ResourceKind::Firewall),
            SettleWindows::default()
        );
    }

    #[test]
    fn test_load_reports_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cloudpanel.yaml");
        fs::write(&path, "settle: [not, a, map]").unwrap();

        let err = ConsoleConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    #[serial]
    fn test_get_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();

        temp_env::with_var("XDG_CONFIG_HOME", Some(temp_dir.path()), || {
            let config_dir = get_config_dir().unwrap();
            assert!(config_dir.ends_with("cloudpanel"));
            assert!(config_dir.exists());
        });
    }

    #[test]
    #[serial]
    fn test_find_config_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("cloudpanel.yaml"), "settle: {}").unwrap();
        fs::write(temp_dir.path().join("cloudpanel.local.yaml"), "settle: {}").unwrap();

        let result = temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            in_dir(temp_dir.path(), find_config_file)
        })
        .unwrap();

        assert!(result.ends_with("cloudpanel.local.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_in_local_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local_dir = temp_dir.path().join(".cloudpanel");
        fs::create_dir(&local_dir).unwrap();
        fs::write(local_dir.join("cloudpanel.yaml"), "settle: {}").unwrap();

        let result = temp_env::with_var_unset(CONFIG_PATH_ENV, || {
            in_dir(temp_dir.path(), find_config_file)
        })
        .unwrap();

        assert!(result.ends_with(".cloudpanel/cloudpanel.yaml"));
    }

    #[test]
    #[serial]
    fn test_find_config_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "settle: {}").unwrap();

        let result = temp_env::with_var(CONFIG_PATH_ENV, Some(&config_path), find_config_file);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    #[serial]
    fn test_load_or_default_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let empty_home = tempfile::tempdir().unwrap();

        let config = temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, None),
                ("XDG_CONFIG_HOME", Some(empty_home.path().as_os_str())),
            ],
            || in_dir(temp_dir.path(), ConsoleConfig::load_or_default),
        )
        .unwrap();

        assert_eq!(config, ConsoleConfig::default());
    }
}
