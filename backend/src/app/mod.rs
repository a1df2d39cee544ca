//! Process wiring: settings, backend selection and tracing.

mod services;
mod settings;

pub use services::{Backend, Services, StartupError};
pub use settings::{AppSettings, SettingsError};

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the JSON subscriber filtered by `RUST_LOG`.
///
/// A second call, or a subscriber installed elsewhere, only logs a warning.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
