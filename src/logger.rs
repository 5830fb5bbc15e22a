//! Logging initialisation via tracing-subscriber.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::errors::ConceptPathError;

/// Installs the global subscriber writing to stderr. `RUST_LOG` wins when set;
/// `level` is the fallback.
pub fn init(level: &str) -> Result<(), ConceptPathError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ConceptPathError::logger(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ConceptPathError::logger(format!("failed to set subscriber: {e}")))
}

pub fn parse_level(level: &str) -> Result<LevelFilter, ConceptPathError> {
    if level.is_empty() {
        return Err(ConceptPathError::logger("log level must not be empty"));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| ConceptPathError::logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels_parse() {
        for l in &["error", "warn", "info", "debug", "trace", "off"] {
            assert!(parse_level(l).is_ok(), "expected '{l}' to be valid");
        }
    }

    #[test]
    fn invalid_level_errors() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
    }
}
