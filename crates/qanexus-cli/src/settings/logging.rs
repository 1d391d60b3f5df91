use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use super::{SettingsError, SettingsResult};

const LOG_ENV: &str = "QANEXUS_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the stderr subscriber. The filter comes from `QANEXUS_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging(json: bool) -> SettingsResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr);

    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    result.map_err(|err| SettingsError::Logging(err.to_string()))
}
