// Service module exports

pub mod composer;
pub mod event;
pub mod gesture;
pub mod layout;
pub mod normalizer;
pub mod settings;
