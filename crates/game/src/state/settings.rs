use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GraphicsQuality {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    #[default]
    Mouse,
    Keyboard,
    Touch,
}

// Unknown keys are ignored and missing keys fall back to defaults, so
// older settings files keep loading after new options are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
    pub quality: GraphicsQuality,
    pub particles: bool,
    pub screen_shake: bool,
    pub background_animation: bool,
    pub scheme: ControlScheme,
    pub touch_sensitivity: f32,
    pub swap_boost_buttons: bool,
    pub show_tutorials: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.6,
            muted: false,
            quality: GraphicsQuality::Medium,
            particles: true,
            screen_shake: true,
            background_animation: true,
            scheme: ControlScheme::Mouse,
            touch_sensitivity: 1.0,
            swap_boost_buttons: false,
            show_tutorials: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read/write settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is invalid at {path_in_file}: {source}")]
    Parse {
        path: PathBuf,
        path_in_file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode settings: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_settings_json(&raw, path)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|source| SettingsError::Encode { source })
    }
}

fn parse_settings_json(raw: &str, path: &Path) -> Result<Settings, SettingsError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, Settings>(&mut deserializer) {
        Ok(settings) => Ok(settings),
        Err(error) => {
            let path_in_file = error.path().to_string();
            Err(SettingsError::Parse {
                path: path.to_path_buf(),
                path_in_file: if path_in_file.is_empty() || path_in_file == "." {
                    String::from("document root")
                } else {
                    path_in_file
                },
                source: error.into_inner(),
            })
        }
    }
}
