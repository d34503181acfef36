use crate::core::{SettingsStore, Storage};
use crate::utils::error::{Result, WizardError};
use crate::utils::validation::validate_file_extension;
use serde_json::Value;
use std::path::Path;

/// 以記憶體中的 JSON 樹實作的設定儲存
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    root: Value,
}

impl JsonSettings {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Self::new(toml::from_str::<Value>(content)?))
    }

    /// 依副檔名 (.json / .toml) 讀取設定檔
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        validate_file_extension("settings_path", path, &["json", "toml"])?;

        let bytes = storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|e| WizardError::SettingsFormatError {
            path: path.to_string(),
            reason: format!("file is not valid UTF-8: {}", e),
        })?;

        let settings = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        if !settings.root.is_object() {
            return Err(WizardError::SettingsFormatError {
                path: path.to_string(),
                reason: "top level must be a table/object".to_string(),
            });
        }

        tracing::debug!("Loaded wizard settings from {}", path);
        Ok(settings)
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, path: &[&str]) -> Option<Value> {
        let mut node = &self.root;
        for key in path {
            node = node.as_object()?.get(*key)?;
        }
        Some(node.clone())
    }
}
