// Configuration store for the sishc admin panel
//
// Owns all access to the YAML configuration file and the sishc log
// file. Every request loads fresh from disk and mutating requests
// rewrite the whole document; the later of two concurrent saves wins.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{GlobalConfig, Tunnel};
use crate::error::{Error, Result};

/// Environment override for the configuration file path.
pub const CONFIG_FILE_ENV: &str = "SISHC_CONFIG_FILE";
/// Environment override for the log file path.
pub const LOG_FILE_ENV: &str = "SISHC_OUTPUT_LOG";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
    log_path: PathBuf,
}

impl ConfigStore {
    pub fn new(config_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            log_path: log_path.into(),
        }
    }

    /// Resolve paths from the environment, falling back to the XDG
    /// locations sishc itself uses.
    pub fn from_env() -> Result<Self> {
        let config_path = match env::var_os(CONFIG_FILE_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .ok_or(Error::MissingBaseDir("config"))?
                .join("sishc")
                .join("config.yaml"),
        };
        let log_path = match env::var_os(LOG_FILE_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .ok_or(Error::MissingBaseDir("data"))?
                .join("sishc")
                .join("sishc.log"),
        };
        Ok(Self::new(config_path, log_path))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Load and parse the configuration file. An empty or all-null
    /// document yields the empty configuration; a missing file or
    /// malformed YAML is an error, surfaced to the caller unhandled.
    pub fn load(&self) -> Result<GlobalConfig> {
        let contents = fs::read_to_string(&self.config_path)?;
        if contents.trim().is_empty() {
            return Ok(GlobalConfig::default());
        }
        let config: Option<GlobalConfig> = serde_yaml::from_str(&contents)?;
        Ok(config.unwrap_or_default())
    }

    /// Serialize and overwrite the configuration file in place. Keys
    /// holding the empty string are dropped first. No atomic rename,
    /// no backup.
    pub fn save(&self, mut config: GlobalConfig) -> Result<()> {
        config.prune_empty();
        let contents = serde_yaml::to_string(&config)?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, contents)?;
        debug!("Saved configuration to {}", self.config_path.display());
        Ok(())
    }

    /// The `tunnels` list, defaulting to empty when the key is absent.
    pub fn load_tunnels(&self) -> Result<Vec<Tunnel>> {
        Ok(self.load()?.tunnels)
    }

    /// Replace the tunnel list, re-reading the file first so other
    /// top-level keys survive the rewrite. Empty-string keys are
    /// dropped from each record.
    pub fn save_tunnels(&self, mut tunnels: Vec<Tunnel>) -> Result<()> {
        for tunnel in &mut tunnels {
            tunnel.prune_empty();
        }
        let mut config = self.load()?;
        config.tunnels = tunnels;
        self.save(config)
    }

    /// Raw text of the configuration file, for the raw editor.
    pub fn read_raw(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.config_path)?)
    }

    /// Overwrite the configuration file with arbitrary text, no YAML
    /// validation. A document that does not parse breaks every other
    /// view until corrected through this same editor.
    pub fn write_raw(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, contents)?;
        debug!("Wrote raw configuration to {}", self.config_path.display());
        Ok(())
    }

    /// All lines of the sishc log file, in file order. A missing log
    /// file is an error.
    pub fn read_log_lines(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.log_path)?;
        Ok(contents.lines().map(str::to_owned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValue;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(
            dir.path().join("config.yaml"),
            dir.path().join("sishc.log"),
        )
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.load(), Err(Error::Io(_))));
    }

    #[test]
    fn test_load_empty_document_is_empty_config() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.config_path(), "\n").unwrap();
        let config = store.load().unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_load_malformed_yaml_is_yaml_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.config_path(), "tunnels: [unclosed").unwrap();
        assert!(matches!(store.load(), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_save_drops_empty_string_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let config = GlobalConfig {
            ssh_key: Some(ConfigValue::from("")),
            local_host: Some(ConfigValue::from("localhost")),
            ..Default::default()
        };
        store.save(config).unwrap();

        let raw = store.read_raw().unwrap();
        assert!(!raw.contains("ssh_key"));
        assert_eq!(store.load().unwrap().ssh_key, None);
    }

    #[test]
    fn test_save_tunnels_preserves_other_top_level_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.config_path(),
            "ssh_key: ~/.ssh/id_ed25519\npinned: true\ntunnels:\n- name: web\n",
        )
        .unwrap();

        let mut tunnels = store.load_tunnels().unwrap();
        tunnels.push(Tunnel::new("db"));
        store.save_tunnels(tunnels).unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.ssh_key, Some(ConfigValue::from("~/.ssh/id_ed25519")));
        assert_eq!(
            config.extra.get("pinned"),
            Some(&serde_yaml::Value::from(true))
        );
        assert_eq!(config.tunnels.len(), 2);
    }

    #[test]
    fn test_save_tunnels_prunes_each_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.config_path(), "local_host: localhost\n").unwrap();

        let mut tunnel = Tunnel::new("web");
        tunnel.local_host = Some(ConfigValue::from(""));
        tunnel.remote_port = Some(ConfigValue::from("2222"));
        store.save_tunnels(vec![tunnel]).unwrap();

        let stored = &store.load_tunnels().unwrap()[0];
        assert_eq!(stored.local_host, None);
        assert_eq!(stored.remote_port, Some(ConfigValue::from("2222")));
    }

    #[test]
    fn test_save_tunnels_round_trip_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.config_path(),
            "local_port: 8080\ntunnels:\n- name: web\n  remote_port: 2222\n- name: db\n",
        )
        .unwrap();

        let before = store.load().unwrap();
        store.save_tunnels(store.load_tunnels().unwrap()).unwrap();
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn test_raw_round_trip_accepts_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write_raw("not: [valid").unwrap();
        assert_eq!(store.read_raw().unwrap(), "not: [valid");
        assert!(store.load().is_err());
    }

    #[test]
    fn test_read_log_lines_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.read_log_lines().is_err());
    }

    #[test]
    fn test_read_log_lines_in_file_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.log_path(), "first\nsecond\n").unwrap();
        assert_eq!(store.read_log_lines().unwrap(), vec!["first", "second"]);
    }
}
