//! Error types for ledgerview-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable codes, serialized the way they are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    Unreadable,
    InvalidYaml,
    MissingField,
    InvalidValue,
    /// Two settings that must not coincide do
    Conflict,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::Unreadable => "UNREADABLE",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::MissingField => "MISSING_FIELD",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
            ConfigErrorCode::Conflict => "CONFLICT",
        }
    }
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigErrorSeverity {
    Warning,
    Error,
}

/// Printable form of a `ConfigError`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub severity: ConfigErrorSeverity,
    pub message: String,
    /// Dotted path such as `view.placeholder_title`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, " (at {})", field)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid YAML: {reason}")]
    InvalidYaml { reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Conflicting settings: {message}")]
    Conflict { message: String },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::Unreadable { .. } => ConfigErrorCode::Unreadable,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::Conflict { .. } => ConfigErrorCode::Conflict,
        }
    }

    /// A conflict still yields a usable view; everything else does not
    pub fn severity(&self) -> ConfigErrorSeverity {
        match self {
            ConfigError::Conflict { .. } => ConfigErrorSeverity::Warning,
            _ => ConfigErrorSeverity::Error,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::InvalidValue { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    pub fn to_details(&self) -> ConfigErrorDetails {
        let suggestions = match self {
            ConfigError::FileNotFound { .. } => vec![
                "Point --config at an existing YAML file, or omit it to run with defaults".to_string(),
                "Run with --print-default-config to get a starting file".to_string(),
            ],
            ConfigError::Unreadable { .. } => vec!["Check the file permissions".to_string()],
            ConfigError::InvalidYaml { .. } => {
                vec!["Compare the file against the output of --print-default-config".to_string()]
            }
            ConfigError::MissingField { field } => {
                vec![format!("Set a non-empty '{}'", field)]
            }
            ConfigError::InvalidValue { reason, .. } => vec![reason.clone()],
            ConfigError::Conflict { .. } => {
                vec!["Give the account and transaction controls different marker classes".to_string()]
            }
        };

        ConfigErrorDetails {
            code: self.code(),
            severity: self.severity(),
            message: self.to_string(),
            field: self.field().map(str::to_string),
            suggestions,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_code() {
        let error = ConfigError::FileNotFound { path: "/etc/ledgerview.yaml".to_string() };
        assert_eq!(error.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(error.code().to_string(), "FILE_NOT_FOUND");
        assert_eq!(error.to_details().suggestions.len(), 2);
    }

    #[test]
    fn test_conflict_is_warning() {
        let error = ConfigError::Conflict { message: "classes collide".to_string() };
        assert_eq!(error.severity(), ConfigErrorSeverity::Warning);
        let yaml = ConfigError::InvalidYaml { reason: "bad indent".to_string() };
        assert_eq!(yaml.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_details_carry_field() {
        let error = ConfigError::InvalidValue {
            field: "currency.decimal_places".to_string(),
            reason: "too many".to_string(),
        };
        let details = error.to_details();
        assert_eq!(details.field.as_deref(), Some("currency.decimal_places"));
        assert_eq!(details.suggestions, vec!["too many".to_string()]);
        let text = details.to_string();
        assert!(text.starts_with("[INVALID_VALUE]"));
        assert!(text.contains("(at currency.decimal_places)"));
    }

    #[test]
    fn test_code_serializes_like_display() {
        let json = serde_yaml::to_string(&ConfigErrorCode::MissingField).unwrap();
        assert_eq!(json.trim(), ConfigErrorCode::MissingField.as_str());
    }
}
