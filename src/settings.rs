//! Game settings with persistence
//!
//! Settings are saved to `~/.config/fps/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use fps_audio::AudioConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub audio: AudioConfig,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fps"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = GameSettings::load_from(Path::new("/nonexistent/fps/settings.toml"));
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = GameSettings::parse("[audio]\nmaster_volume = 0.3\n").unwrap();
        assert_eq!(settings.audio.master_volume, 0.3);
        assert!(settings.audio.use_mixer);
        assert_eq!(settings.audio.mixer, fps_audio::MixerConfig::default());
    }

    #[test]
    fn saved_settings_parse_back() {
        let mut settings = GameSettings::default();
        settings.audio.master_volume = 0.75;
        settings.audio.use_mixer = false;
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(GameSettings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("fps-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");
        let mut settings = GameSettings::default();
        settings.audio.max_distance = 40.0;

        settings.save_to(&path).unwrap();
        assert_eq!(GameSettings::load_from(&path), settings);
        fs::remove_dir_all(&dir).unwrap();
    }
}
