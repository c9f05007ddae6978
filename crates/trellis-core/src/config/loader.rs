//! Configuration file discovery and loading

use super::trellis_config::TrellisConfiguration;
use crate::error::TrellisError;
use crate::result::{Result, ResultExt};
use std::path::{Path, PathBuf};

/// Config file names in priority order
const CONFIG_FILE_NAMES: &[&str] = &[
    ".trellisrc.json",
    "trellis.jsonc",
    "trellis.json",
    "trellis.toml",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Checks each directory for `.trellisrc.json`, `trellis.jsonc`,
    /// `trellis.json` and `trellis.toml` (in that order), moving up the tree
    /// until a config is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| TrellisError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<TrellisConfiguration> {
        let config = TrellisConfiguration::load(path).map_err(|e| {
            TrellisError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from path or auto-discover
    ///
    /// An explicit path must exist. Without one, discovery starts at
    /// `start_dir` (or the current directory); finding nothing yields the
    /// default configuration.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<TrellisConfiguration> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(TrellisError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(TrellisConfiguration::default())
            }
        }
    }

    /// Like [`ConfigLoader::load`] with auto-discovery, but logs failures and
    /// falls back to the defaults
    pub fn load_or_default(start_dir: &Path) -> TrellisConfiguration {
        Self::load(None, Some(start_dir))
            .log_and_continue()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemberSortMode;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "trellis.json",
            r#"{
                "arguments": {
                    "allowParams": true
                }
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert!(config.allow_params());
        assert!(!config.allow_candidate());
    }

    #[test]
    fn test_load_from_file_jsonc() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "trellis.jsonc",
            r#"{
                // keep doc comments of removed members
                "removal": { "stripDocumentationComments": false, },
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert!(!config.strip_documentation_comments());
    }

    #[test]
    fn test_load_from_file_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "trellis.toml",
            "[ordering]\nmemberSortMode = \"byKindThenByName\"\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.member_sort_mode(), MemberSortMode::ByKindThenByName);
    }

    #[test]
    fn test_auto_discover() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();

        create_temp_config(temp_dir.path(), "trellis.json", r#"{}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert!(found.is_some());
        assert!(found.unwrap().ends_with("trellis.json"));
    }

    #[test]
    fn test_dotfile_takes_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), "trellis.json", r#"{}"#);
        create_temp_config(temp_dir.path(), ".trellisrc.json", r#"{}"#);

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap().unwrap();
        assert!(found.ends_with(".trellisrc.json"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "trellis.json",
            r#"{"formatting": {"indentSize": 0}}"#,
        );

        assert!(ConfigLoader::load_from_file(&config_path).is_err());
        assert_eq!(
            ConfigLoader::load_or_default(temp_dir.path()),
            TrellisConfiguration::default()
        );
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Some(Path::new("nonexistent.json")), None);
        assert!(result.is_err());
    }
}
