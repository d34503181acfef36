use crate::config::toml_config::WizardConfig;
use crate::core::dispatcher::{dispatch, Step, View};
use crate::core::request::{RequestContext, WizardRequest};
use crate::core::templates::{self, escape_html, TemplateContext, TemplateSet};
use crate::core::settings::JsonSettings;
use crate::core::{MenuRegistrar, SettingsStore, Storage};
use crate::domain::model::{InstallType, MenuPage};
use crate::utils::error::Result;

pub const TITLE_NO_DATA: &str = "No data found for installation";
pub const TITLE_SINGLE_SKIN: &str = "Start install";
pub const TITLE_MULTIPLE_SKINS: &str = "Select skin and start install";

pub const ITEM_TEMPLATE_ID: &str = "tmpl-wizard-item";
const ITEM_SLUG_TOKEN: &str = "{{{data.slug}}}";
const ITEM_NAME_TOKEN: &str = "{{{data.name}}}";

/// 安裝精靈的管理頁面
///
/// 啟動時建立一次並以參考共用；請求相關的狀態都放在
/// [`WizardInterface::begin_request`] 回傳的 [`RequestContext`]。
pub struct WizardInterface<S: SettingsStore> {
    page: MenuPage,
    admin_url: String,
    dashboard_url: String,
    settings: S,
    templates: TemplateSet,
}

impl<S: SettingsStore> WizardInterface<S> {
    pub fn from_config(config: &WizardConfig, settings: S, templates: TemplateSet) -> Self {
        Self {
            page: config.menu_page(),
            admin_url: config.wizard.admin_url.clone(),
            dashboard_url: config.wizard.dashboard_url.clone(),
            settings,
            templates,
        }
    }

    pub fn slug(&self) -> &str {
        &self.page.slug
    }

    pub fn register_page<M: MenuRegistrar + ?Sized>(&self, menu: &mut M) {
        tracing::info!("Registering admin page '{}'", self.page.slug);
        menu.add_menu_page(self.page.clone());
    }

    pub fn begin_request(&self, request: WizardRequest) -> RequestContext<'_, S> {
        RequestContext::new(request, &self.settings)
    }

    /// 頁面內容加上 footer hook 的輸出，即管理頁面實際送出的內容
    pub fn render_document(&self, request: WizardRequest) -> String {
        let mut ctx = self.begin_request(request);
        let mut out = String::new();
        self.render_page(&mut ctx, &mut out);
        self.emit_item_template(&ctx, &mut out);
        out
    }

    pub fn render_page(&self, ctx: &mut RequestContext<'_, S>, out: &mut String) {
        let mut header = TemplateContext::new();
        header.insert("page_title", escape_html(&self.page.page_title));
        header.insert("step", ctx.request().step().0.to_string());

        self.templates.render_into(templates::PAGE_HEADER, &header, out);
        self.dispatch(ctx, out);
        self.templates
            .render_into(templates::PAGE_FOOTER, &TemplateContext::new(), out);
    }

    pub fn dispatch(&self, ctx: &mut RequestContext<'_, S>, out: &mut String) {
        let step = ctx.request().step();
        let Some(view) = dispatch(step) else {
            return;
        };

        tracing::debug!("Rendering wizard view '{}'", view.template_name());
        let context = match view {
            View::BeforeInstall => self.before_install_context(ctx),
            View::Install => self.install_context(ctx),
            View::AfterInstall => self.after_install_context(ctx),
        };
        self.templates.render_into(view.template_name(), &context, out);
    }

    /// 輸出前端用的項目範本，只在本精靈的頁面輸出
    pub fn emit_item_template(&self, ctx: &RequestContext<'_, S>, out: &mut String) {
        if ctx.request().page() != Some(self.slug()) {
            return;
        }

        out.push_str(&format!(
            r#"<script type="text/html" id="{}">{}</script>"#,
            ITEM_TEMPLATE_ID,
            self.build_item(ITEM_SLUG_TOKEN, ITEM_NAME_TOKEN)
        ));
    }

    pub fn build_item(&self, slug: &str, name: &str) -> String {
        let mut context = TemplateContext::new();
        context.insert("slug", slug.to_string());
        context.insert("name", name.to_string());
        context.insert("loader", self.build_loading_fragment());
        self.templates.render(templates::PLUGIN_ITEM, &context)
    }

    pub fn build_loading_fragment(&self) -> String {
        self.templates.render(templates::LOADER, &TemplateContext::new())
    }

    pub fn before_import_title(&self, ctx: &RequestContext<'_, S>) -> &'static str {
        match ctx.registry().skins_count() {
            0 => TITLE_NO_DATA,
            1 => TITLE_SINGLE_SKIN,
            _ => TITLE_MULTIPLE_SKINS,
        }
    }

    /// 精靈步驟的管理連結，例如 `admin.php?page=tm-wizard&step=2&skin=default`
    pub fn step_url(&self, step: Step, params: &[(&str, &str)]) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", self.slug());
        query.append_pair("step", &step.0.to_string());
        for (key, value) in params {
            query.append_pair(key, value);
        }
        format!("{}?{}", self.admin_url, query.finish())
    }

    fn before_install_context(&self, ctx: &mut RequestContext<'_, S>) -> TemplateContext {
        let mut context = TemplateContext::new();
        context.insert("title", self.before_import_title(ctx).to_string());

        let skins: Vec<_> = ctx
            .registry()
            .get_skins()
            .map(|catalog| {
                catalog
                    .iter_fields()
                    .map(|(slug, fields)| (slug.to_string(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let mut markup = String::new();
        for (slug, fields) in skins {
            ctx.registry_mut().select_skin(&slug, fields);
            markup.push_str(&self.render_current_skin(ctx));
        }
        context.insert("skins", markup);

        context
    }

    fn render_current_skin(&self, ctx: &RequestContext<'_, S>) -> String {
        let registry = ctx.registry();
        let slug = registry.current_skin_str("slug").unwrap_or_default();
        let field = |key: &str| escape_html(&registry.current_skin_str(key).unwrap_or_default());

        let mut context = TemplateContext::new();
        context.insert("name", field("name"));
        context.insert("thumb", field("thumb"));
        context.insert("demo", field("demo"));
        context.insert("plugins", registry.render_skin_plugins(&slug));
        context.insert(
            "install_url",
            escape_html(&self.step_url(
                Step::INSTALL,
                &[("skin", slug.as_str()), ("type", InstallType::Full.as_str())],
            )),
        );
        context.insert(
            "lite_url",
            escape_html(&self.step_url(
                Step::INSTALL,
                &[("skin", slug.as_str()), ("type", InstallType::Lite.as_str())],
            )),
        );
        context.insert("slug", escape_html(&slug));

        self.templates.render(templates::SKIN, &context)
    }

    fn install_context(&self, ctx: &mut RequestContext<'_, S>) -> TemplateContext {
        let install_type = ctx.request().install_type();
        let slug = self.select_requested_skin(ctx);

        let plugins: String = slug
            .as_deref()
            .map(|slug| {
                ctx.registry()
                    .skin_plugins(slug, install_type)
                    .iter()
                    .map(|(plugin_slug, plugin)| self.build_item(plugin_slug, &plugin.name))
                    .collect()
            })
            .unwrap_or_default();

        let slug = slug.unwrap_or_default();
        let mut context = TemplateContext::new();
        context.insert("plugins", plugins);
        context.insert("type", install_type.as_str().to_string());
        context.insert("skin_name", self.current_skin_name(ctx));
        context.insert(
            "next_url",
            escape_html(&self.step_url(
                Step::AFTER_INSTALL,
                &[("skin", slug.as_str()), ("type", install_type.as_str())],
            )),
        );
        context.insert("skin", escape_html(&slug));

        context
    }

    fn after_install_context(&self, ctx: &mut RequestContext<'_, S>) -> TemplateContext {
        let slug = self.select_requested_skin(ctx).unwrap_or_default();

        let mut context = TemplateContext::new();
        context.insert("skin", escape_html(&slug));
        context.insert("skin_name", self.current_skin_name(ctx));
        context.insert("dashboard_url", escape_html(&self.dashboard_url));

        context
    }

    /// `skin` 參數指定的 skin 存在於清單時才選取
    fn select_requested_skin(&self, ctx: &mut RequestContext<'_, S>) -> Option<String> {
        let slug = ctx.request().skin()?.to_string();

        let fields = ctx
            .registry()
            .get_skins()
            .and_then(|catalog| catalog.fields(&slug))
            .cloned();
        let Some(fields) = fields else {
            tracing::warn!("Requested skin '{}' is not registered", slug);
            return None;
        };

        ctx.registry_mut().select_skin(&slug, fields);
        Some(slug)
    }

    fn current_skin_name(&self, ctx: &RequestContext<'_, S>) -> String {
        escape_html(&ctx.registry().current_skin_str("name").unwrap_or_default())
    }
}

/// 依設定建立精靈：透過 `storage` 讀取設定檔與選用的範本覆寫
///
/// 範本覆寫讀取失敗時只記錄警告，沿用內建範本。
pub async fn load_wizard<T: Storage>(
    storage: &T,
    config: &WizardConfig,
) -> Result<WizardInterface<JsonSettings>> {
    let settings = JsonSettings::load(storage, &config.wizard.settings_path).await?;

    let mut templates = TemplateSet::builtin();
    if let Some(dir) = &config.wizard.templates_dir {
        let mut overridden = templates.clone();
        match overridden.load_overrides(storage, dir).await {
            Ok(count) => {
                tracing::info!("Applied {} template override(s) from {}", count, dir);
                templates = overridden;
            }
            Err(e) => {
                tracing::warn!("Ignoring template overrides in {}: {}", dir, e);
                tracing::warn!("Suggestion: {}", e.recovery_suggestion());
            }
        }
    }

    Ok(WizardInterface::from_config(config, settings, templates))
}
