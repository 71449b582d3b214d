use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Invalid configuration for '{field}' (value: {value}): {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV buffer error: {message}")]
    CsvIntoInner { message: String },
}

impl RoiError {
    pub fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        RoiError::InvalidConfiguration {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RoiError::InvalidConfiguration { .. } | RoiError::ConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RoiError::InvalidConfiguration { field, reason, .. } => {
                format!("The value given for '{}' is not usable: {}", field, reason)
            }
            RoiError::ConfigError { message } => {
                format!("The scenario configuration could not be read: {}", message)
            }
            RoiError::IoError(e) => format!("A file could not be read or written: {}", e),
            RoiError::SerializationError(_) | RoiError::CsvError(_) | RoiError::CsvIntoInner { .. } => {
                "The report could not be produced".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RoiError::InvalidConfiguration { .. } => {
                "Check the flagged input against its allowed range and try again"
            }
            RoiError::ConfigError { .. } => {
                "Make sure the scenario file is valid TOML and all required keys are present"
            }
            RoiError::IoError(_) => "Check that the path exists and is writable",
            RoiError::SerializationError(_) | RoiError::CsvError(_) | RoiError::CsvIntoInner { .. } => {
                "Try a different output format, or rerun with --verbose for details"
            }
        }
    }

    /// 配置錯誤回傳 1，其餘 (IO / 序列化) 回傳 2
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration_error() {
            1
        } else {
            2
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = RoiError::invalid("horizon_periods", -3, "must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'horizon_periods' (value: -3): must not be negative"
        );
        assert!(err.is_configuration_error());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_error_exit_code() {
        let err: RoiError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(!err.is_configuration_error());
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("missing"));
    }
}
