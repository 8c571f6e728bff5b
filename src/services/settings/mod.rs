//! Settings file persistence.

pub mod service;

pub use service::SettingsService;
