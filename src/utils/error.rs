use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Settings file '{path}' has an unsupported format: {reason}")]
    SettingsFormatError { path: String, reason: String },

    #[error("Template '{name}' could not be loaded: {message}")]
    TemplateError { name: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Settings,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WizardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WizardError::IoError(_) => ErrorCategory::Io,
            WizardError::TomlError(_) | WizardError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            WizardError::SerializationError(_) | WizardError::SettingsFormatError { .. } => {
                ErrorCategory::Settings
            }
            WizardError::TemplateError { .. } => ErrorCategory::Template,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 範本載入失敗時仍可使用內建範本
            WizardError::TemplateError { .. } => ErrorSeverity::Low,
            WizardError::SettingsFormatError { .. } | WizardError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            WizardError::TomlError(_) | WizardError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            WizardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            WizardError::IoError(_) => {
                "Check that the file exists and the process can read it".to_string()
            }
            WizardError::TomlError(_) => "Fix the TOML syntax of the config file".to_string(),
            WizardError::SerializationError(_) => {
                "Make sure the settings file is valid JSON".to_string()
            }
            WizardError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            WizardError::SettingsFormatError { .. } => {
                "Use a .json or .toml settings file".to_string()
            }
            WizardError::TemplateError { name, .. } => {
                format!("Remove or fix the override for template '{}'", name)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read a required file: {}", self),
            ErrorCategory::Configuration => {
                format!("The wizard configuration is invalid: {}", self)
            }
            ErrorCategory::Settings => format!("The wizard settings could not be loaded: {}", self),
            ErrorCategory::Template => format!("A page template could not be loaded: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;
