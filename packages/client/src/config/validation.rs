//! Validation of client settings

use std::time::Duration;

use http::HeaderValue;

use super::ClientConfig;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if timeout values are zero or exceed limits
    /// - `InvalidParameter` - if parameters are outside valid ranges
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if the duration is zero
    /// or longer than `max`.
    pub fn validate_timeout(timeout: Duration, max: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout > max {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot exceed {} seconds",
                max.as_secs()
            )));
        }

        Ok(())
    }
}

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.timeout {
            ConfigValidator::validate_timeout(timeout, Duration::from_secs(3600), "timeout")?;
        }
        ConfigValidator::validate_timeout(
            self.connect_timeout,
            Duration::from_secs(300),
            "connect timeout",
        )?;

        if self.user_agent.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "user agent cannot be empty".to_string(),
            ));
        }
        if self.user_agent.len() > 1000 {
            return Err(ConfigurationError::InvalidParameter(
                "user agent must not exceed 1000 characters".to_string(),
            ));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ConfigurationError::InvalidParameter(
                "user agent is not a valid header value".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ClientConfig::default().with_timeout(Some(Duration::ZERO));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn unbounded_timeout_allowed() {
        let config = ClientConfig::default().with_timeout(None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn connect_timeout_capped() {
        let config = ClientConfig::default().with_connect_timeout(Duration::from_secs(301));
        assert!(config.validate().is_err());
    }

    #[test]
    fn user_agent_must_be_header_safe() {
        assert!(ClientConfig::default().with_user_agent("").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_user_agent("bad\nagent")
                .validate()
                .is_err()
        );
    }
}
