use env_logger::{Builder, Env, Target};
use log::SetLoggerError;
use std::io::Write;

/// Initialise `env_logger` on stderr. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() -> Result<(), SetLoggerError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init()
}
