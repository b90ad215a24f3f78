use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::hand::{GestureError, GestureResult};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera device to open
    pub camera_index: u32,
    /// Maximum number of hands handed to the classifier per frame (1-4)
    pub max_num_hands: usize,
    /// Hands detected below this confidence are dropped (0.0-1.0)
    pub min_detection_confidence: f32,
    /// Confidence the provider needs to keep tracking a hand (0.0-1.0)
    pub min_tracking_confidence: f32,
    /// Flip frames horizontally before detection
    pub mirror_frames: bool,
    /// RGBA color of the hand outline
    pub box_color: [u8; 4],
    /// Outline thickness in pixels (1-10)
    pub box_thickness: u32,
    /// Draw the gesture instruction lines
    pub show_instructions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            max_num_hands: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            mirror_frames: true,
            box_color: [0, 255, 0, 255],
            box_thickness: 2,
            show_instructions: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it with defaults if missing
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> GestureResult<()> {
        if !(1..=4).contains(&self.max_num_hands) {
            return Err(GestureError::InvalidConfig(format!(
                "max_num_hands {} must be between 1 and 4",
                self.max_num_hands
            )));
        }

        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(GestureError::InvalidConfig(format!(
                "min_detection_confidence {} must be between 0.0 and 1.0",
                self.min_detection_confidence
            )));
        }

        if !(0.0..=1.0).contains(&self.min_tracking_confidence) {
            return Err(GestureError::InvalidConfig(format!(
                "min_tracking_confidence {} must be between 0.0 and 1.0",
                self.min_tracking_confidence
            )));
        }

        if !(1..=10).contains(&self.box_thickness) {
            return Err(GestureError::InvalidConfig(format!(
                "box_thickness {} must be between 1 and 10",
                self.box_thickness
            )));
        }

        Ok(())
    }

    /// Reset the default location to default configuration
    pub fn reset() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn get_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".gesture_data");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
