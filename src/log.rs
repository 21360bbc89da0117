use std::io;

use color_eyre::eyre::eyre;
use tracing_error::ErrorLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Installs the stderr diagnostics subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects the default
/// level.
pub fn install(verbose: bool) -> color_eyre::eyre::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish()
        .with(ErrorLayer::default());
    subscriber.try_init().map_err(|e| eyre!(e))?;

    Ok(())
}
