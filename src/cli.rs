use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use calendar_layout::ViewKind;

#[derive(Parser, Debug)]
#[command(
    name = "calendar-layout",
    version,
    about = "Normalize calendar events and print the composed view layout as JSON"
)]
pub struct Cli {
    /// JSON file with an array of event records (or an object with an "events" array)
    #[arg(long)]
    pub events: PathBuf,
    /// View to compose
    #[arg(long, value_enum, default_value_t = ViewArg::Week)]
    pub view: ViewArg,
    /// Reference date in YYYY-MM-DD format
    #[arg(long)]
    pub date: String,
    /// Override today's date (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    pub today: Option<String>,
    /// Settings file (TOML); defaults to the platform config directory
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the normalized events instead of the layout
    #[arg(long)]
    pub normalized: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewArg {
    Day,
    Week,
    Month,
}

impl From<ViewArg> for ViewKind {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Day => ViewKind::Day,
            ViewArg::Week => ViewKind::Week,
            ViewArg::Month => ViewKind::Month,
        }
    }
}
