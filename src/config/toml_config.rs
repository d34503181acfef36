use crate::core::MenuPage;
use crate::utils::error::{Result, WizardError};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_slug, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub wizard: WizardSection,
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSection {
    pub slug: String,
    pub admin_url: String,
    pub dashboard_url: String,
    pub settings_path: String,
    pub templates_dir: Option<String>,
}

impl Default for WizardSection {
    fn default() -> Self {
        Self {
            slug: "tm-wizard".to_string(),
            admin_url: "admin.php".to_string(),
            dashboard_url: "index.php".to_string(),
            settings_path: "wizard-settings.json".to_string(),
            templates_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub page_title: String,
    pub menu_title: String,
    pub capability: String,
    pub icon: String,
    pub position: i64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            page_title: "TemplateMonster Installation Wizard".to_string(),
            menu_title: "TM Wizard".to_string(),
            capability: "manage_options".to_string(),
            icon: "dashicons-flag".to_string(),
            position: 75,
        }
    }
}

impl WizardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WizardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${WIZARD_SETTINGS})，未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> String {
        let re = match Regex::new(r"\$\{([^}]+)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_slug("wizard.slug", &self.wizard.slug)?;
        validate_non_empty_string("wizard.admin_url", &self.wizard.admin_url)?;
        validate_path("wizard.settings_path", &self.wizard.settings_path)?;
        validate_file_extension(
            "wizard.settings_path",
            &self.wizard.settings_path,
            &["json", "toml"],
        )?;

        if let Some(dir) = &self.wizard.templates_dir {
            validate_path("wizard.templates_dir", dir)?;
        }

        validate_non_empty_string("menu.page_title", &self.menu.page_title)?;
        validate_non_empty_string("menu.menu_title", &self.menu.menu_title)?;
        validate_non_empty_string("menu.capability", &self.menu.capability)?;
        validate_range("menu.position", self.menu.position, 0, 9999)?;

        Ok(())
    }

    pub fn menu_page(&self) -> MenuPage {
        MenuPage {
            page_title: self.menu.page_title.clone(),
            menu_title: self.menu.menu_title.clone(),
            capability: self.menu.capability.clone(),
            slug: self.wizard.slug.clone(),
            icon: self.menu.icon.clone(),
            position: self.menu.position,
        }
    }
}

impl Validate for WizardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
