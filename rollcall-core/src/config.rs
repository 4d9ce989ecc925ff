//! Global rollcall configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_NOTION_VERSION, MAX_PAGE_SIZE,
};
use crate::error::{RollcallError, RollcallResult};

const ENV_PREFIX: &str = "ROLLCALL";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

/// Global configuration at ~/.config/rollcall/config.toml
///
/// Every key can be overridden from the environment with a `ROLLCALL_`
/// prefix, e.g. `ROLLCALL_NOTION_TOKEN`.
#[derive(Deserialize, Clone)]
pub struct RollcallConfig {
    /// Integration secret sent as the bearer credential.
    #[serde(default)]
    pub notion_token: String,

    /// Database holding one page per scheduled event.
    #[serde(default)]
    pub events_database_id: String,

    /// Database under which per-member attendance sheets are created.
    #[serde(default)]
    pub attendance_database_id: String,

    /// Display names left out of the unexcused report.
    #[serde(default)]
    pub ignored_members: Vec<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl RollcallConfig {
    pub fn config_path() -> RollcallResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RollcallError::Config("Could not determine config directory".into()))?
            .join("rollcall");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if no config file exists yet.
    pub fn load() -> RollcallResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) layered under `ROLLCALL_*` environment variables.
    pub fn load_from(path: &Path) -> RollcallResult<Self> {
        let config: RollcallConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("ignored_members"),
            )
            .build()
            .map_err(|e| RollcallError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RollcallError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> RollcallResult<()> {
        let required = [
            ("notion_token", &self.notion_token),
            ("events_database_id", &self.events_database_id),
            ("attendance_database_id", &self.attendance_database_id),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(RollcallError::Config(format!(
                    "'{key}' is not set (add it to config.toml or set {ENV_PREFIX}_{})",
                    key.to_uppercase()
                )));
            }
        }

        url::Url::parse(&self.api_base_url).map_err(|e| {
            RollcallError::Config(format!("Invalid api_base_url '{}': {e}", self.api_base_url))
        })?;

        if self.max_pages == 0 {
            return Err(RollcallError::Config("'max_pages' must be at least 1".into()));
        }

        Ok(())
    }

    /// Page size actually sent to Notion.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn is_ignored(&self, display_name: &str) -> bool {
        self.ignored_members.iter().any(|n| n == display_name)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RollcallResult<()> {
        let contents = format!(
            "\
# rollcall configuration

# Notion integration secret:
# notion_token = \"secret_...\"

# Database with one page per event:
# events_database_id = \"\"

# Database holding the per-member attendance sheets:
# attendance_database_id = \"\"

# Display names excluded from the unexcused report:
# ignored_members = [\"Attendance Tracker\"]

# api_base_url = \"{DEFAULT_API_BASE_URL}\"
# notion_version = \"{DEFAULT_NOTION_VERSION}\"
# page_size = {MAX_PAGE_SIZE}
# max_pages = {DEFAULT_MAX_PAGES}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RollcallError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RollcallError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), contents).unwrap();
        dir
    }

    #[test]
    fn test_load_applies_defaults() {
        let dir = write_config(
            r#"
notion_token = "secret_abc"
events_database_id = "events-db"
attendance_database_id = "attendance-db"
"#,
        );

        let config = RollcallConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.notion_version, DEFAULT_NOTION_VERSION);
        assert_eq!(config.effective_page_size(), MAX_PAGE_SIZE);
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
        assert!(config.ignored_members.is_empty());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let dir = write_config(
            r#"
events_database_id = "events-db"
attendance_database_id = "attendance-db"
"#,
        );

        let err = RollcallConfig::load_from(&dir.path().join("config.toml"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("notion_token"));
    }

    #[test]
    fn test_ignore_list_and_page_size_clamp() {
        let dir = write_config(
            r#"
notion_token = "secret_abc"
events_database_id = "events-db"
attendance_database_id = "attendance-db"
ignored_members = ["Attendance Tracker", "Resume Manager"]
page_size = 500
"#,
        );

        let config = RollcallConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.is_ignored("Resume Manager"));
        assert!(!config.is_ignored("Ada Lovelace"));
        assert_eq!(config.effective_page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_default_config_is_commented_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        RollcallConfig::create_default_config(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents
            .lines()
            .filter(|l| !l.trim().is_empty())
            .all(|l| l.starts_with('#')));
    }
}
