use crate::utils::error::{Result, WizardError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid slug regex"))
}

/// 頁面 slug 只允許小寫英數字、`-` 與 `_`
pub fn validate_slug(field_name: &str, slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slug.to_string(),
            reason: "Slug cannot be empty".to_string(),
        });
    }

    if !slug_pattern().is_match(slug) {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: slug.to_string(),
            reason: "Slug may only contain lowercase letters, digits, '-' and '_'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WizardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("wizard.slug", "tm-wizard").is_ok());
        assert!(validate_slug("wizard.slug", "wizard_2").is_ok());
        assert!(validate_slug("wizard.slug", "").is_err());
        assert!(validate_slug("wizard.slug", "TM Wizard").is_err());
        assert!(validate_slug("wizard.slug", "-leading").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("settings", "settings.json", &["json", "toml"]).is_ok());
        assert!(validate_file_extension("settings", "settings.toml", &["json", "toml"]).is_ok());
        assert!(validate_file_extension("settings", "settings.yaml", &["json", "toml"]).is_err());
        assert!(validate_file_extension("settings", "settings", &["json", "toml"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("menu.position", 75, 0, 9999).is_ok());
        assert!(validate_range("menu.position", -1, 0, 9999).is_err());
    }
}
