use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FastautoError, Result};
use crate::format::FormatConfig;

/// Project config file written by `fastauto init`.
pub const CONFIG_FILE: &str = "fastauto.json";

/// Alternative TOML config file, read when no JSON config exists.
pub const TOML_CONFIG_FILE: &str = "fastauto.toml";

/// Project settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Source root, relative to the project directory
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Routes directory, relative to `base_dir`
    #[serde(default = "default_routes")]
    pub routes: String,

    /// Security handlers directory, relative to `base_dir`
    #[serde(default = "default_security")]
    pub security: String,

    #[serde(default)]
    pub format: FormatConfig,
}

fn default_base_dir() -> String {
    "src".to_string()
}

fn default_routes() -> String {
    "routes".to_string()
}

fn default_security() -> String {
    "security".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            routes: default_routes(),
            security: default_security(),
            format: FormatConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the project directory
    ///
    /// `fastauto.json` wins over `fastauto.toml`; with neither present the
    /// defaults are used.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let json_path = project_dir.join(CONFIG_FILE);
        if json_path.exists() {
            let content = fs::read_to_string(&json_path)?;
            let settings =
                serde_json::from_str(&content).map_err(|e| FastautoError::ConfigParse {
                    path: json_path.clone(),
                    message: e.to_string(),
                })?;
            debug!(path = %json_path.display(), "loaded settings");
            return Ok(settings);
        }

        let toml_path = project_dir.join(TOML_CONFIG_FILE);
        if toml_path.exists() {
            let content = fs::read_to_string(&toml_path)?;
            let settings = toml::from_str(&content).map_err(|e| FastautoError::ConfigParse {
                path: toml_path.clone(),
                message: e.to_string(),
            })?;
            debug!(path = %toml_path.display(), "loaded settings");
            return Ok(settings);
        }

        debug!(project = %project_dir.display(), "no config file, using defaults");
        Ok(Self::default())
    }

    /// Save settings to the config file in use (JSON unless only TOML exists)
    pub fn save(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = Self::path(project_dir);
        let content = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            self.to_json()?
        };

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Get config file path
    pub fn path(project_dir: &Path) -> PathBuf {
        let json_path = project_dir.join(CONFIG_FILE);
        let toml_path = project_dir.join(TOML_CONFIG_FILE);
        if !json_path.exists() && toml_path.exists() {
            toml_path
        } else {
            json_path
        }
    }

    /// Write the default `fastauto.json`
    pub fn init(project_dir: &Path, force: bool) -> Result<PathBuf> {
        let path = project_dir.join(CONFIG_FILE);
        if path.exists() && !force {
            return Err(FastautoError::ConfigAlreadyExists { path });
        }

        fs::write(&path, Self::default().to_json()?)?;
        Ok(path)
    }

    /// JSON with four-space indentation and a trailing newline
    fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn routes_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.base_dir).join(&self.routes)
    }

    pub fn security_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.base_dir).join(&self.security)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "baseDir" => Some(self.base_dir.clone()),
            "routes" => Some(self.routes.clone()),
            "security" => Some(self.security.clone()),
            "format.enabled" => Some(self.format.enabled.to_string()),
            "format.command" => Some(self.format.command.clone()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "baseDir" => self.base_dir = value.to_string(),
            "routes" => self.routes = value.to_string(),
            "security" => self.security = value.to_string(),
            "format.enabled" => self.format.enabled = parse_bool(key, value)?,
            "format.command" => {
                if value.trim().is_empty() {
                    return Err(FastautoError::InvalidConfigValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.format.command = value.to_string();
            }
            _ => {
                return Err(FastautoError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["baseDir", "routes", "security", "format.enabled", "format.command"]
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(FastautoError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_without_config() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_dir, "src");
        assert_eq!(settings.routes, "routes");
        assert_eq!(settings.security, "security");
    }

    #[test]
    fn test_load_json_with_partial_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            r#"{ "baseDir": "app", "routes": "api" }"#,
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.base_dir, "app");
        assert_eq!(settings.routes, "api");
        assert_eq!(settings.security, "security");
        assert_eq!(
            settings.routes_dir(temp.path()),
            temp.path().join("app").join("api")
        );
    }

    #[test]
    fn test_load_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(TOML_CONFIG_FILE),
            "baseDir = \"lib\"\n\n[format]\nenabled = true\n",
        )
        .unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.base_dir, "lib");
        assert!(settings.format.enabled);
        assert_eq!(settings.format.command, "prettier");
        assert_eq!(Settings::path(temp.path()), temp.path().join(TOML_CONFIG_FILE));
    }

    #[test]
    fn test_json_wins_over_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), r#"{ "baseDir": "json" }"#).unwrap();
        fs::write(temp.path().join(TOML_CONFIG_FILE), "baseDir = \"toml\"\n").unwrap();

        let settings = Settings::load(temp.path()).unwrap();
        assert_eq!(settings.base_dir, "json");
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "{ not json").unwrap();

        let result = Settings::load(temp.path());
        assert!(matches!(result, Err(FastautoError::ConfigParse { .. })));
    }

    #[test]
    fn test_init_writes_default_and_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = Settings::init(temp.path(), false).unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("    \"baseDir\": \"src\""));
        assert_eq!(Settings::load(temp.path()).unwrap(), Settings::default());

        let again = Settings::init(temp.path(), false);
        assert!(matches!(
            again,
            Err(FastautoError::ConfigAlreadyExists { .. })
        ));
        assert!(Settings::init(temp.path(), true).is_ok());
    }

    #[test]
    fn test_config_get_set() {
        let mut settings = Settings::default();

        settings.set("routes", "api").unwrap();
        assert_eq!(settings.get("routes").unwrap(), "api");

        settings.set("format.enabled", "yes").unwrap();
        assert!(settings.format.enabled);

        assert!(matches!(
            settings.set("format.enabled", "maybe"),
            Err(FastautoError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            settings.set("nope", "x"),
            Err(FastautoError::ConfigKeyNotFound { .. })
        ));
        assert!(settings.get("nope").is_none());
    }

    #[test]
    fn test_list_keys() {
        let keys: Vec<String> = Settings::default()
            .list()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec!["baseDir", "routes", "security", "format.enabled", "format.command"]
        );
    }

    #[test]
    fn test_save_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.set("security", "auth").unwrap();

        let path = settings.save(temp.path()).unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE));
        assert_eq!(Settings::load(temp.path()).unwrap(), settings);
    }

    #[test]
    fn test_save_keeps_toml_format() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(TOML_CONFIG_FILE), "routes = \"api\"\n").unwrap();

        let mut settings = Settings::load(temp.path()).unwrap();
        settings.set("baseDir", "app").unwrap();
        let path = settings.save(temp.path()).unwrap();

        assert_eq!(path, temp.path().join(TOML_CONFIG_FILE));
        assert!(!temp.path().join(CONFIG_FILE).exists());
        assert_eq!(Settings::load(temp.path()).unwrap().base_dir, "app");
    }
}
