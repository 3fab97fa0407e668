use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_dictation_dir")]
    pub dictation_dir: String,
    #[serde(default = "default_translation_dir")]
    pub translation_dir: String,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_dictation_dir() -> String {
    "corpora/dictation".to_string()
}
fn default_translation_dir() -> String {
    "corpora/translation".to_string()
}
fn default_audio_dir() -> String {
    "corpora/audio".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            dictation_dir: default_dictation_dir(),
            translation_dir: default_translation_dir(),
            audio_dir: default_audio_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lingdr")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.dictation_dir, "corpora/dictation");
        assert_eq!(config.translation_dir, "corpora/translation");
        assert_eq!(config.audio_dir, "corpora/audio");
    }

    #[test]
    fn test_config_serde_partial_file_fills_defaults() {
        let toml_str = r#"
theme = "catppuccin-mocha"
translation_dir = "/srv/corpora/cn-en"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.translation_dir, "/srv/corpora/cn-en");
        assert_eq!(config.dictation_dir, "corpora/dictation");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.audio_dir, deserialized.audio_dir);
    }
}
