use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SKIN_KEYS: &[&str] = &["name", "full", "lite", "demo", "thumb"];
const PLUGIN_KEYS: &[&str] = &["name", "source", "sourse", "path", "access"];

/// 設定中 `skins.advanced.<slug>` 的 skin 資料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full: Vec<String>,
    #[serde(default)]
    pub lite: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Skin {
    /// 寬鬆解析：型別不符的欄位取預設值，不會讓整筆 skin 失效
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        Self {
            name: string_field(fields, "name").unwrap_or_default(),
            full: list_field(fields, "full"),
            lite: list_field(fields, "lite"),
            demo: string_field(fields, "demo"),
            thumb: string_field(fields, "thumb"),
            extra: extra_fields(fields, SKIN_KEYS),
        }
    }

    pub fn plugins(&self, install_type: InstallType) -> &[String] {
        match install_type {
            InstallType::Full => &self.full,
            InstallType::Lite => &self.lite,
        }
    }
}

/// 設定中 `plugins.<slug>` 的外掛資料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default)]
    pub name: String,
    // 原設定檔的拼法是 "sourse"
    #[serde(default, alias = "sourse", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plugin {
    /// 寬鬆解析；不是物件時回傳 `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        Some(Self {
            name: string_field(fields, "name").unwrap_or_default(),
            source: string_field(fields, "source").or_else(|| string_field(fields, "sourse")),
            path: string_field(fields, "path"),
            access: string_field(fields, "access"),
            extra: extra_fields(fields, PLUGIN_KEYS),
        })
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn extra_fields(fields: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    #[default]
    Full,
    Lite,
}

impl InstallType {
    /// 只有 `lite` 會安裝精簡組合，其餘一律為完整安裝
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("lite") => InstallType::Lite,
            _ => InstallType::Full,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallType::Full => "full",
            InstallType::Lite => "lite",
        }
    }
}

/// 本次請求選取的 skin；`fields` 內也會帶有 `slug`
#[derive(Debug, Clone, PartialEq)]
pub struct SkinSelection {
    pub slug: String,
    pub fields: Map<String, Value>,
}

impl SkinSelection {
    pub fn new(slug: &str, mut fields: Map<String, Value>) -> Self {
        fields.insert("slug".to_string(), Value::String(slug.to_string()));
        Self {
            slug: slug.to_string(),
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPage {
    pub page_title: String,
    pub menu_title: String,
    pub capability: String,
    pub slug: String,
    pub icon: String,
    pub position: i64,
}

/// 寬鬆的「空值」判斷：null、false、0、""、"0" 與空集合都視為未設定
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n == 0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skin_keeps_unknown_fields() {
        let skin = Skin::from_value(&json!({
            "name": "Default",
            "full": ["elementor", "cherry-data-importer"],
            "thumb": "https://example.com/default.png",
            "type": "skin"
        }));

        assert_eq!(skin.name, "Default");
        assert_eq!(skin.plugins(InstallType::Full).len(), 2);
        assert!(skin.plugins(InstallType::Lite).is_empty());
        assert_eq!(skin.thumb.as_deref(), Some("https://example.com/default.png"));
        assert_eq!(skin.extra.get("type"), Some(&json!("skin")));
        assert!(skin.extra.get("name").is_none());
    }

    #[test]
    fn test_skin_tolerates_wrong_field_types() {
        let skin = Skin::from_value(&json!({
            "name": ["not", "a", "string"],
            "full": "elementor",
            "lite": ["cherry-data-importer", 42, null]
        }));

        assert_eq!(skin.name, "");
        assert!(skin.full.is_empty());
        assert_eq!(skin.lite, vec!["cherry-data-importer".to_string(), "42".to_string()]);

        assert_eq!(Skin::from_value(&json!("just a string")), Skin::default());
    }

    #[test]
    fn test_plugin_accepts_legacy_source_key() {
        let plugin = Plugin::from_value(&json!({
            "name": "Elementor",
            "sourse": "wordpress"
        }))
        .unwrap();

        assert_eq!(plugin.source.as_deref(), Some("wordpress"));
        assert!(plugin.extra.is_empty());
        assert!(Plugin::from_value(&json!("elementor")).is_none());
    }

    #[test]
    fn test_install_type_from_param() {
        assert_eq!(InstallType::from_param(Some("lite")), InstallType::Lite);
        assert_eq!(InstallType::from_param(Some("full")), InstallType::Full);
        assert_eq!(InstallType::from_param(Some("other")), InstallType::Full);
        assert_eq!(InstallType::from_param(None), InstallType::Full);
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!("0")));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!([])));
        assert!(!is_empty_value(&json!("Default")));
        assert!(!is_empty_value(&json!(["elementor"])));
        assert!(!is_empty_value(&json!(true)));
    }
}
