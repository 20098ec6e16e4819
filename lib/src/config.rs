use crate::error::Result;
use crate::models::TagColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database name; the file is `<data dir>/<db_name>.db`
    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Color given to tags created without an explicit one
    #[serde(default)]
    pub default_tag_color: TagColor,

    #[serde(default)]
    pub import: ImportConfig,
}

/// What to do with the outermost folders of a browser export
/// ("Bookmarks Bar", "Other Bookmarks", ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserRootFolders {
    #[default]
    Keep,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub browser_root_folders: BrowserRootFolders,
    /// Folder nesting beyond this depth is cut off
    pub max_folder_depth: usize,
    /// Where archives are extracted; the system temp dir when unset
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            browser_root_folders: BrowserRootFolders::default(),
            max_folder_depth: 64,
            scratch_dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_name: default_db_name(),
            default_tag_color: TagColor::default(),
            import: ImportConfig::default(),
        }
    }
}

fn default_db_name() -> String {
    "faved".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Default location of the config file (~/.config/faved/config.yml)
    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Load configuration from `path`, or the default location when `None`.
    /// Falls back to default config if the file is missing or broken.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load config from {:?}: {}. Using default configuration",
                    config_path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Database name, with `FAVED_DB_NAME` taking precedence over the file.
    pub fn db_name(&self) -> String {
        std::env::var("FAVED_DB_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.db_name.clone())
    }

    pub fn db_path(&self) -> PathBuf {
        crate::utils::get_default_datadir().join(format!("{}.db", self.db_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.db_name, "faved");
        assert_eq!(config.default_tag_color, TagColor::Gray);
        assert_eq!(config.import.max_folder_depth, 64);
        assert_eq!(config.import.browser_root_folders, BrowserRootFolders::Keep);
        assert!(config.import.scratch_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            db_name: "bookmarks".to_string(),
            default_tag_color: TagColor::Aqua,
            import: ImportConfig {
                browser_root_folders: BrowserRootFolders::Skip,
                max_folder_depth: 8,
                scratch_dir: Some(PathBuf::from("/tmp/faved-scratch")),
            },
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
        assert_eq!(Config::load(Some(config_path)), Config::default());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(
            config_path,
            "default_tag_color: red\nimport:\n  browser_root_folders: skip\n",
        )
        .unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.db_name, "faved");
        assert_eq!(config.default_tag_color, TagColor::Red);
        assert_eq!(config.import.browser_root_folders, BrowserRootFolders::Skip);
        assert_eq!(config.import.max_folder_depth, 64);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.yml")));
        assert_eq!(config, Config::default());
    }
}
