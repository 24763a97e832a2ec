//! Allow / deny list configuration.
//!
//! The registry only ever reads configuration through [`ConfigSource`], so
//! any host config store works. [`WorldSettings`] is the typed form used when
//! the lists live in a TOML file, and a raw [`toml::Table`] can be handed over
//! directly as well.

use crate::error::ConfigError;
use crate::host::ConfigSource;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config key holding the allow-list of world names.
pub const ENABLED_WORLDS_KEY: &str = "enabled-worlds";
/// Config key holding the deny-list of world names.
pub const DISABLED_WORLDS_KEY: &str = "disabled-worlds";

/// World allow / deny lists.
///
/// An empty allow-list enables every loaded world. The deny-list always wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldSettings {
    #[serde(default)]
    pub enabled_worlds: Vec<String>,
    #[serde(default)]
    pub disabled_worlds: Vec<String>,
}

impl WorldSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    /// Rejects blank world names in either list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, names) in [
            (ENABLED_WORLDS_KEY, &self.enabled_worlds),
            (DISABLED_WORLDS_KEY, &self.disabled_worlds),
        ] {
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "{key} contains a blank world name"
                )));
            }
        }
        Ok(())
    }

    /// Names listed in both the allow-list and the deny-list.
    pub fn overlapping(&self) -> Vec<&str> {
        self.enabled_worlds
            .iter()
            .filter(|name| self.disabled_worlds.contains(name))
            .map(String::as_str)
            .collect()
    }
}

impl ConfigSource for WorldSettings {
    fn string_list(&self, key: &str) -> Vec<String> {
        match key {
            ENABLED_WORLDS_KEY => self.enabled_worlds.clone(),
            DISABLED_WORLDS_KEY => self.disabled_worlds.clone(),
            _ => Vec::new(),
        }
    }
}

impl ConfigSource for toml::Table {
    /// Non-string array entries are skipped; a non-array value reads as empty.
    fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(toml::Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_settings_default() {
        let settings = WorldSettings::default();
        assert!(settings.enabled_worlds.is_empty());
        assert!(settings.disabled_worlds.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_kebab_case_keys() {
        let settings = WorldSettings::from_toml_str(
            r#"
enabled-worlds = ["world", "nether"]
disabled-worlds = ["nether"]
"#,
        )
        .unwrap();

        assert_eq!(settings.string_list(ENABLED_WORLDS_KEY), vec!["world", "nether"]);
        assert_eq!(settings.string_list(DISABLED_WORLDS_KEY), vec!["nether"]);
        assert!(settings.string_list("something-else").is_empty());
        assert_eq!(settings.overlapping(), vec!["nether"]);
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let settings = WorldSettings::from_toml_str("").unwrap();
        assert_eq!(settings, WorldSettings::default());
    }

    #[test]
    fn test_parse_error() {
        let result = WorldSettings::from_toml_str("enabled-worlds = \"world\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = WorldSettings::load_from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_validation_blank_name() {
        let settings = WorldSettings {
            enabled_worlds: vec!["world".to_string()],
            disabled_worlds: vec!["  ".to_string()],
        };

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("disabled-worlds contains a blank world name"));
    }

    #[test]
    fn test_toml_table_source() {
        let table: toml::Table = toml::from_str(
            r#"
enabled-worlds = ["world", 7, "the_end"]
disabled-worlds = "nether"
"#,
        )
        .unwrap();

        assert_eq!(table.string_list(ENABLED_WORLDS_KEY), vec!["world", "the_end"]);
        assert!(table.string_list(DISABLED_WORLDS_KEY).is_empty());
        assert!(table.string_list("absent").is_empty());
    }
}
