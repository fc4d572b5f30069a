//! Logging setup for the apex-rotations binaries
//!
//! The library itself only emits `tracing` events:
//! - `trace`: Shepperd branch selection and each chain fold
//! - `debug`: degenerate fallbacks and validation outcomes
//! - `warn`: chain segments skipped while decoding
//!
//! Binaries install a subscriber through this module.

use tracing::Level;

use crate::error::{ApexError, ApexResult};

/// Initialize the tracing subscriber with the default level
///
/// Default log level: INFO (overrideable via RUST_LOG environment variable)
///
/// # Example
/// ```no_run
/// use apex_rotations::init_logger;
///
/// fn main() {
///     init_logger().ok();
///     tracing::info!("Application started");
/// }
/// ```
///
/// # Environment Variables
/// ```bash
/// RUST_LOG=debug cargo run --bin rotation_inspect -- --chain x.90_y.45
/// RUST_LOG=apex_rotations=trace cargo run --bin rotation_inspect -- --mapping -y.z.-x
/// ```
pub fn init_logger() -> ApexResult<()> {
    init_logger_with_level(Level::INFO)
}

/// Initialize the tracing subscriber with a custom default level
///
/// Fails if a global subscriber is already installed.
///
/// # Arguments
/// * `default_level` - The default log level (overrideable via RUST_LOG)
pub fn init_logger_with_level(default_level: Level) -> ApexResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ApexError::Logger(e.to_string()))
}
