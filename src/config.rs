use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::modulation::ModulationBudget;

/// Chord count used when neither the CLI nor the config names one.
pub const DEFAULT_LENGTH: usize = 4;

/// Application configuration loaded from TOML config file.
/// All fields have sensible defaults; the config file is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chord dictionary (overrides the XDG data default).
    pub chords_path: Option<PathBuf>,
    /// Progression corpus (overrides the XDG data default).
    pub progressions_path: Option<PathBuf>,
    /// Fixed seed for reproducible runs. Unset draws from entropy.
    pub seed: Option<u64>,
    /// Progression / modulation length when the CLI doesn't give one.
    pub default_length: usize,
    /// Modulation search budget.
    pub modulation: ModulationBudget,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chords_path: None,
            progressions_path: None,
            seed: None,
            default_length: DEFAULT_LENGTH,
            modulation: ModulationBudget::default(),
        }
    }
}

impl AppConfig {
    /// Load config from `~/.config/chordgen/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match config_path {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<AppConfig>(contents)
    }

    /// Resolve the chord dictionary path: config → XDG default.
    pub fn resolve_chords_path(&self) -> PathBuf {
        self.chords_path
            .clone()
            .unwrap_or_else(|| default_data_path("chords.json"))
    }

    /// Resolve the progression corpus path: config → XDG default.
    pub fn resolve_progressions_path(&self) -> PathBuf {
        self.progressions_path
            .clone()
            .unwrap_or_else(|| default_data_path("progressions.json"))
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Resolve a data file under the XDG data directory.
pub fn default_data_path(file_name: &str) -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", crate::APP_NAME) {
        dirs.data_dir().join(file_name)
    } else {
        // Fallback: current directory
        PathBuf::from(file_name)
    }
}
