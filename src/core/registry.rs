use crate::core::SettingsStore;
use crate::domain::model::{is_empty_value, InstallType, Plugin, Skin, SkinSelection};
use serde_json::{Map, Value};
use std::cell::OnceCell;

pub const SKINS_PATH: &[&str] = &["skins", "advanced"];
pub const PLUGINS_PATH: &[&str] = &["plugins"];

const SKIN_PLUGIN_FORMAT_OPEN: &str = r#"<div class="tm-wizard-skin-plugins__item">"#;
const SKIN_PLUGIN_FORMAT_CLOSE: &str = "</div>";

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    slug: String,
    skin: Skin,
    fields: Map<String, Value>,
}

/// 依設定順序保存的 skin 清單
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinCatalog {
    entries: Vec<CatalogEntry>,
}

impl SkinCatalog {
    /// 解析 `skins.advanced`；每一筆都保留，欄位型別不符時取預設值
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            tracing::warn!("Skins setting is not a mapping, ignoring it");
            return None;
        };

        let entries = map
            .into_iter()
            .map(|(slug, data)| {
                let skin = Skin::from_value(&data);
                let fields = match data {
                    Value::Object(fields) => fields,
                    other => {
                        tracing::warn!("Skin '{}' is not a mapping: {}", slug, other);
                        Map::new()
                    }
                };
                CatalogEntry { slug, skin, fields }
            })
            .collect();

        Some(Self { entries })
    }

    pub fn get(&self, slug: &str) -> Option<&Skin> {
        self.entry(slug).map(|entry| &entry.skin)
    }

    /// 原始設定欄位，供 `select_skin` 使用
    pub fn fields(&self, slug: &str) -> Option<&Map<String, Value>> {
        self.entry(slug).map(|entry| &entry.fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Skin)> {
        self.entries
            .iter()
            .map(|entry| (entry.slug.as_str(), &entry.skin))
    }

    pub fn iter_fields(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.entries
            .iter()
            .map(|entry| (entry.slug.as_str(), &entry.fields))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, slug: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.slug == slug)
    }
}

/// 單次請求範圍內的 skin / plugin 查詢
///
/// skins 每個 registry 最多讀取一次；plugins 每次查詢都重新讀取。
pub struct SkinRegistry<'a, S: SettingsStore + ?Sized> {
    settings: &'a S,
    skins: OnceCell<Option<SkinCatalog>>,
    current: Option<SkinSelection>,
}

impl<'a, S: SettingsStore + ?Sized> SkinRegistry<'a, S> {
    pub fn new(settings: &'a S) -> Self {
        Self {
            settings,
            skins: OnceCell::new(),
            current: None,
        }
    }

    pub fn get_skins(&self) -> Option<&SkinCatalog> {
        self.skins
            .get_or_init(|| {
                tracing::debug!("Fetching skins from settings");
                self.settings.get(SKINS_PATH).and_then(SkinCatalog::from_value)
            })
            .as_ref()
    }

    pub fn skins_count(&self) -> usize {
        self.get_skins().map_or(0, SkinCatalog::len)
    }

    pub fn skin(&self, slug: &str) -> Option<&Skin> {
        self.get_skins()?.get(slug)
    }

    /// 設定目前的 skin，不檢查 slug 是否存在於清單中
    pub fn select_skin(&mut self, slug: &str, data: Map<String, Value>) {
        self.current = Some(SkinSelection::new(slug, data));
    }

    pub fn current_skin(&self) -> Option<&SkinSelection> {
        self.current.as_ref()
    }

    pub fn current_skin_field(&self, key: &str) -> Option<&Value> {
        self.current
            .as_ref()?
            .fields
            .get(key)
            .filter(|value| !is_empty_value(value))
    }

    pub fn current_skin_str(&self, key: &str) -> Option<String> {
        match self.current_skin_field(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// skin 某個群組中已註冊的外掛，依 skin 清單順序
    pub fn skin_plugins(&self, slug: &str, install_type: InstallType) -> Vec<(String, Plugin)> {
        let Some(skin) = self.skin(slug) else {
            return Vec::new();
        };

        let wanted = skin.plugins(install_type);
        if wanted.is_empty() {
            return Vec::new();
        }

        let registered = match self.settings.get(PLUGINS_PATH) {
            Some(Value::Object(map)) => map,
            _ => return Vec::new(),
        };

        wanted
            .iter()
            .filter_map(|plugin_slug| {
                let data = registered.get(plugin_slug)?;
                if is_empty_value(data) {
                    return None;
                }
                match Plugin::from_value(data) {
                    Some(plugin) => Some((plugin_slug.clone(), plugin)),
                    None => {
                        tracing::debug!("Skipping plugin '{}': not a mapping", plugin_slug);
                        None
                    }
                }
            })
            .collect()
    }

    pub fn render_skin_plugins(&self, slug: &str) -> String {
        self.render_skin_plugins_for(slug, InstallType::Full)
    }

    pub fn render_skin_plugins_for(&self, slug: &str, install_type: InstallType) -> String {
        self.skin_plugins(slug, install_type)
            .iter()
            .map(|(_, plugin)| {
                format!("{}{}{}", SKIN_PLUGIN_FORMAT_OPEN, plugin.name, SKIN_PLUGIN_FORMAT_CLOSE)
            })
            .collect()
    }
}
