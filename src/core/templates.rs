use crate::core::Storage;
use crate::utils::error::{Result, WizardError};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const PAGE_HEADER: &str = "page-header";
pub const PAGE_FOOTER: &str = "page-footer";
pub const BEFORE_INSTALL: &str = "before-install";
pub const INSTALL: &str = "install";
pub const AFTER_INSTALL: &str = "after-install";
pub const PLUGIN_ITEM: &str = "plugin-item";
pub const LOADER: &str = "loader";
pub const SKIN: &str = "skin";

const BUILTIN: &[(&str, &str)] = &[
    (PAGE_HEADER, include_str!("../../templates/page-header.html")),
    (PAGE_FOOTER, include_str!("../../templates/page-footer.html")),
    (BEFORE_INSTALL, include_str!("../../templates/before-install.html")),
    (INSTALL, include_str!("../../templates/install.html")),
    (AFTER_INSTALL, include_str!("../../templates/after-install.html")),
    (PLUGIN_ITEM, include_str!("../../templates/plugin-item.html")),
    (LOADER, include_str!("../../templates/loader.html")),
    (SKIN, include_str!("../../templates/skin.html")),
];

pub type TemplateContext = HashMap<&'static str, String>;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // `{{{data.slug}}}` 之類的前端範本標記不會被視為佔位符
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
    })
}

/// 具名頁面範本，使用 `{{ key }}` 佔位符
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<String, String>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateSet {
    pub fn builtin() -> Self {
        let templates = BUILTIN
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { templates }
    }

    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, source: impl Into<String>) {
        self.templates.insert(name.to_string(), source.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// 以 `<dir>/<name>.html` 取代對應的內建範本，回傳套用的數量
    pub async fn load_overrides<S: Storage>(&mut self, storage: &S, dir: &str) -> Result<usize> {
        let mut applied = 0;

        for (name, _) in BUILTIN {
            let path = format!("{}/{}.html", dir.trim_end_matches('/'), name);
            if !storage.exists(&path).await {
                continue;
            }

            let bytes = storage.read_file(&path).await?;
            let source = String::from_utf8(bytes).map_err(|e| WizardError::TemplateError {
                name: name.to_string(),
                message: format!("{} is not valid UTF-8: {}", path, e),
            })?;

            tracing::debug!("Template '{}' overridden by {}", name, path);
            self.insert(name, source);
            applied += 1;
        }

        Ok(applied)
    }

    /// 以 `context` 渲染範本；找不到範本時輸出空字串，未知佔位符換成空字串
    pub fn render(&self, name: &str, context: &TemplateContext) -> String {
        let Some(source) = self.templates.get(name) else {
            tracing::warn!("Template '{}' not found, nothing rendered", name);
            return String::new();
        };

        placeholder_pattern()
            .replace_all(source, |caps: &Captures| {
                let key = &caps[1];
                match context.get(key) {
                    Some(value) => value.clone(),
                    None => {
                        tracing::debug!("Template '{}' has no value for '{}'", name, key);
                        String::new()
                    }
                }
            })
            .into_owned()
    }

    pub fn render_into(&self, name: &str, context: &TemplateContext, out: &mut String) {
        out.push_str(&self.render(name, context));
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
