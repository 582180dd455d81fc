// TimeScan - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: always stderr. Stdout is reserved for extracted values.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive string for the given inputs.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default.
/// Returns `None` when RUST_LOG is set and should be read from the environment.
fn filter_directive(
    env_set: bool,
    debug_flag: bool,
    config_level: Option<&str>,
) -> Option<String> {
    if env_set {
        None
    } else if debug_flag {
        Some("debug".to_string())
    } else if let Some(level) = config_level {
        Some(level.to_string())
    } else {
        Some(super::constants::DEFAULT_LOG_LEVEL.to_string())
    }
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the validated level from config.toml (if present).
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match filter_directive(
        std::env::var("RUST_LOG").is_ok(),
        debug_flag,
        config_level,
    ) {
        None => EnvFilter::from_default_env(),
        Some(directive) => EnvFilter::new(directive),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
