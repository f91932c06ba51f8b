use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::ShellError;

/// Installs the stderr subscriber. `directive` wins over `RUST_LOG`; with
/// neither only warnings get through.
pub fn init_tracing(directive: Option<&str>) -> Result<(), ShellError> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}
