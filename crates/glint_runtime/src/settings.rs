//! Settings management

use anyhow::{Context, Result};
use glint_gen::GeneratorConfig;
use glint_render::window::WindowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "GLINT_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "glint.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowConfig,
    pub generator: GeneratorConfig,
    /// Fixed first seed; the wall clock is used when absent.
    pub seed: Option<u64>,
}

impl Settings {
    /// Read settings from `path`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glint-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("glint-settings-that-does-not-exist.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.seed, None);
        assert!(settings.generator.animate);
    }

    #[test]
    fn test_partial_file() {
        let path = temp_file(
            "partial.json",
            r#"{ "seed": 302817110064, "generator": { "animate": false } }"#,
        );
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.seed, Some(302_817_110_064));
        assert!(!settings.generator.animate);
        assert_eq!(settings.generator.depth_range.min, 3);
        assert_eq!(settings.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_file("broken.json", "{ seed: ");
        let err = Settings::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_settings_serialize_round_trip() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
