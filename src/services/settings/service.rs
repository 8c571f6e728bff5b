use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::EngineSettings;

const SETTINGS_FILE: &str = "settings.toml";

/// Loads and saves [`EngineSettings`] as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service over the platform config directory, if one can be determined.
    pub fn from_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "CalendarLayout", "calendar-layout")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings. A missing file yields defaults; missing keys
    /// take their default values.
    pub fn load(&self) -> CalendarResult<EngineSettings> {
        if !self.path.exists() {
            log::info!("no settings at {}, using defaults", self.path.display());
            return Ok(EngineSettings::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let settings: EngineSettings = toml::from_str(&raw)?;
        settings.validate().map_err(CalendarError::invalid_settings)?;
        log::info!("loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Like [`load`](Self::load) but falls back to defaults on any error.
    pub fn load_or_default(&self) -> EngineSettings {
        self.load().unwrap_or_else(|err| {
            log::warn!("{}; falling back to default settings", err);
            EngineSettings::default()
        })
    }

    /// Update settings
    pub fn save(&self, settings: &EngineSettings) -> CalendarResult<()> {
        settings.validate().map_err(CalendarError::invalid_settings)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(settings)?;
        fs::write(&self.path, raw)?;
        log::info!("saved settings to {}", self.path.display());
        Ok(())
    }
}
