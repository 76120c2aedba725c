//! terminal logging for the algebra engine
use crate::symbolic::algebra_error::{AlgebraError, AlgebraResult};
use log::info;
use simplelog::*;

/// Maps a level name to a filter: "debug", "info", "warn", "error", "off"/"none". No name means info.
pub fn level_filter(loglevel: Option<&str>) -> AlgebraResult<LevelFilter> {
    let Some(level) = loglevel else {
        return Ok(LevelFilter::Info);
    };
    match level.to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(AlgebraError::invalid_argument(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        ))),
    }
}

/// Installs a terminal logger. A logger installed earlier (by this function or by the host
/// application) is left in place.
pub fn init_logger(loglevel: Option<&str>) -> AlgebraResult<()> {
    let level = level_filter(loglevel)?;
    if level == LevelFilter::Off {
        return Ok(());
    }
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    match logger_instance {
        Ok(()) => {
            info!("logging started with level {}", level);
            Ok(())
        }
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(level_filter(None).unwrap(), LevelFilter::Info);
        assert_eq!(level_filter(Some("DEBUG")).unwrap(), LevelFilter::Debug);
        assert_eq!(level_filter(Some("none")).unwrap(), LevelFilter::Off);
        assert!(matches!(
            level_filter(Some("verbose")),
            Err(AlgebraError::InvalidArgument(_))
        ));
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        assert!(init_logger(Some("warn")).is_ok());
        assert!(init_logger(Some("debug")).is_ok());
        assert!(init_logger(Some("off")).is_ok());
    }
}
