use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Engine timeout and worker count are not 0
/// - Transformer program is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config
        .engine
        .validate()
        .map_err(ConfigError::ValidationError)?;

    if config.transformer.program.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transformer.program cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.engine.timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_zero_workers_fails() {
        let mut config = Config::default();
        config.engine.max_workers = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_empty_program_fails() {
        let mut config = Config::default();
        config.transformer.program = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }
}
