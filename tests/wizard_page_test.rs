use serde_json::json;
use tm_wizard::core::wizard::{TITLE_MULTIPLE_SKINS, TITLE_NO_DATA, TITLE_SINGLE_SKIN};
use tm_wizard::{JsonSettings, TemplateSet, WizardConfig, WizardInterface, WizardRequest};

fn sample_settings() -> serde_json::Value {
    json!({
        "skins": {
            "advanced": {
                "default": {
                    "name": "Default",
                    "full": ["cherry-data-importer", "elementor", "removed-plugin"],
                    "lite": ["cherry-data-importer"],
                    "thumb": "https://example.com/default.png"
                },
                "fashion": {
                    "name": "Fashion <Store>",
                    "full": ["woocommerce"]
                }
            }
        },
        "plugins": {
            "cherry-data-importer": { "name": "Cherry Data Importer", "sourse": "remote" },
            "elementor": { "name": "Elementor", "sourse": "wordpress" },
            "woocommerce": { "name": "WooCommerce", "sourse": "wordpress" }
        }
    })
}

/// Header and footer only, so step bodies are easy to isolate.
fn bare_templates() -> TemplateSet {
    let mut templates = TemplateSet::builtin();
    templates.insert("page-header", "[header]");
    templates.insert("page-footer", "[footer]");
    templates
}

fn wizard_with(
    settings: serde_json::Value,
    templates: TemplateSet,
) -> WizardInterface<JsonSettings> {
    WizardInterface::from_config(&WizardConfig::default(), JsonSettings::new(settings), templates)
}

fn render(wizard: &WizardInterface<JsonSettings>, query: &str) -> String {
    let mut ctx = wizard.begin_request(WizardRequest::from_query(query));
    let mut out = String::new();
    wizard.render_page(&mut ctx, &mut out);
    out
}

#[test]
fn test_unknown_steps_render_header_and_footer_only() {
    let wizard = wizard_with(sample_settings(), bare_templates());

    for step in ["4", "-1", "abc", "17"] {
        let out = render(&wizard, &format!("page=tm-wizard&step={}", step));
        assert_eq!(out, "[header][footer]", "step={}", step);
    }
}

#[test]
fn test_missing_step_renders_before_install() {
    let wizard = wizard_with(sample_settings(), bare_templates());

    let out = render(&wizard, "page=tm-wizard");
    assert!(out.starts_with("[header]"));
    assert!(out.ends_with("[footer]"));
    assert!(out.contains(TITLE_MULTIPLE_SKINS));
    assert!(out.contains(r#"data-skin="default""#));
    assert!(out.contains(r#"data-skin="fashion""#));
}

#[test]
fn test_before_install_titles() {
    let empty = wizard_with(json!({}), bare_templates());
    assert!(render(&empty, "step=1").contains(TITLE_NO_DATA));

    let single = wizard_with(
        json!({ "skins": { "advanced": { "default": { "name": "Default" } } } }),
        bare_templates(),
    );
    assert!(render(&single, "step=1").contains(TITLE_SINGLE_SKIN));
}

#[test]
fn test_before_install_escapes_skin_names() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "");

    assert!(out.contains("Fashion &lt;Store&gt;"));
    assert!(!out.contains("Fashion <Store>"));
}

#[test]
fn test_before_install_links_to_install_step() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "");

    assert!(out.contains("admin.php?page=tm-wizard&amp;step=2&amp;skin=default&amp;type=full"));
    assert!(out.contains("admin.php?page=tm-wizard&amp;step=2&amp;skin=default&amp;type=lite"));
}

#[test]
fn test_install_step_lists_known_plugins_in_order() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "page=tm-wizard&step=2&skin=default");

    let importer = out.find(r#"data-slug="cherry-data-importer""#).unwrap();
    let elementor = out.find(r#"data-slug="elementor""#).unwrap();
    assert!(importer < elementor);
    assert!(!out.contains("removed-plugin"));
    assert!(out.contains("Installing plugins for Default"));
    assert!(out.contains(&wizard.build_loading_fragment()));
    assert!(out.contains("step=3&amp;skin=default&amp;type=full"));
}

#[test]
fn test_install_step_lite_group() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "page=tm-wizard&step=2&skin=default&type=lite");

    assert!(out.contains(r#"data-slug="cherry-data-importer""#));
    assert!(!out.contains(r#"data-slug="elementor""#));
    assert!(out.contains(r#"data-type="lite""#));
}

#[test]
fn test_install_step_unknown_skin_renders_no_items() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "page=tm-wizard&step=2&skin=missing");

    assert!(out.contains(r#"<div class="tm-wizard-plugins" data-skin="" data-type="full"></div>"#));
}

#[test]
fn test_after_install_step() {
    let wizard = wizard_with(sample_settings(), bare_templates());
    let out = render(&wizard, "page=tm-wizard&step=3&skin=fashion");

    assert!(out.contains("Installation complete"));
    assert!(out.contains("All plugins for Fashion &lt;Store&gt; are installed."));
    assert!(out.contains(r#"href="index.php""#));
}

#[test]
fn test_requests_do_not_share_state() {
    let wizard = wizard_with(sample_settings(), bare_templates());

    let query = "page=tm-wizard&step=2&skin=default";
    let mut first = wizard.begin_request(WizardRequest::from_query(query));
    let mut out = String::new();
    wizard.render_page(&mut first, &mut out);
    assert_eq!(
        first.registry().current_skin().map(|skin| skin.slug.as_str()),
        Some("default")
    );

    let second = wizard.begin_request(WizardRequest::from_query("page=tm-wizard&step=3"));
    assert!(second.registry().current_skin().is_none());
    assert!(second.registry().current_skin_field("name").is_none());
}

#[test]
fn test_render_document_appends_item_template() {
    let wizard = wizard_with(sample_settings(), bare_templates());

    let on_page = wizard.render_document(WizardRequest::from_query("page=tm-wizard&step=9"));
    assert_eq!(
        on_page,
        format!(
            r#"[header][footer]<script type="text/html" id="tmpl-wizard-item">{}</script>"#,
            wizard.build_item("{{{data.slug}}}", "{{{data.name}}}")
        )
    );

    let elsewhere = wizard.render_document(WizardRequest::from_query("page=other&step=9"));
    assert_eq!(elsewhere, "[header][footer]");
}

#[test]
fn test_builtin_item_markup() {
    let wizard = wizard_with(json!({}), TemplateSet::builtin());

    assert_eq!(
        wizard.build_item("my-plugin", "My Plugin"),
        concat!(
            r#"<div class="tm-wizard-item" data-slug="my-plugin">"#,
            r#"<span class="tm-wizard-item__name">My Plugin</span>"#,
            r#"<span class="tm-wizard-loader">"#,
            r#"<span class="tm-wizard-loader__spinner"></span></span>"#,
            "</div>"
        )
    );
}
