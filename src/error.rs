// Error types
// Only constructors and settings I/O can fail; layout and gestures degrade instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),
}

impl CalendarError {
    pub fn invalid_viewport<S: Into<String>>(msg: S) -> Self {
        Self::InvalidViewport(msg.into())
    }

    pub fn invalid_settings<S: Into<String>>(msg: S) -> Self {
        Self::InvalidSettings(msg.into())
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;
