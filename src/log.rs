use log::LevelFilter;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV: &str = "COUNTDOWN_DEBUG";

/// Initialize logging for the countdown engine.
///
/// Uses `Debug` level if `debug_enabled` is true, otherwise `Info` level.
/// An explicit `RUST_LOG` overrides either default. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}

/// [`init_logger`], with debug output when `COUNTDOWN_DEBUG` is set.
pub fn init_from_env() {
    init_logger(std::env::var_os(DEBUG_ENV).is_some());
}
