//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a fallback level
///
/// `RUST_LOG` still wins when it is set. Unknown level names fall back to `info`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_level(level: &str) {
    let filter = parse_level(level);
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();
}

/// Parse a textual log level, falling back to `Info`
pub fn parse_level(level: &str) -> log::LevelFilter {
    level.parse().unwrap_or(log::LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), log::LevelFilter::Warn);
        assert_eq!(parse_level("loud"), log::LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_with_level("debug");
        init_with_level("trace");
        log::debug!("logger ready");
    }
}
