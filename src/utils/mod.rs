// Utility modules

pub mod date;
pub mod logging;
