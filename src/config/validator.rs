use crate::config::Config;
use crate::error::{MemsiftError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_storage(config, &mut errors);
        Self::validate_extraction(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MemsiftError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory path cannot be empty",
            ));
        }
    }

    fn validate_extraction(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.extraction.min_length == 0 {
            errors.push(ValidationError::new(
                "extraction.min_length",
                "Minimum message length must be greater than 0",
            ));
        }

        if config.extraction.default_source.trim().is_empty() {
            errors.push(ValidationError::new(
                "extraction.default_source",
                "Default source channel cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_passes() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_schema_version_rejected() {
        let mut config = Config::default();
        config.meta.schema_version = "9.9.9".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        match err {
            MemsiftError::ConfigValidation { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "_meta.schema_version");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let mut config = Config::default();
        config.extraction.min_length = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let mut config = Config::default();
        config.storage.data_dir = std::path::PathBuf::new();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
