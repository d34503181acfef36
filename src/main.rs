use clap::Parser;
use std::path::Path;
use tm_wizard::utils::error::ErrorSeverity;
use tm_wizard::utils::{logger, validation::Validate};
use tm_wizard::{load_wizard, AdminMenu, CliConfig, LocalStorage, WizardConfig, WizardRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tm-wizard");
    tracing::debug!("CLI config: {:?}", cli);

    // 設定檔不存在時使用預設值
    let mut config = if Path::new(&cli.config).exists() {
        match WizardConfig::from_file(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("Config file '{}' not found, using defaults", cli.config);
        WizardConfig::default()
    };

    if let Some(settings) = &cli.settings {
        config.wizard.settings_path = settings.clone();
    }
    if let Some(templates) = &cli.templates {
        config.wizard.templates_dir = Some(templates.clone());
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // 相對路徑以設定檔所在目錄為準
    let base_dir = Path::new(&cli.config)
        .parent()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default();
    let storage = LocalStorage::new(base_dir);

    let wizard = match load_wizard(&storage, &config).await {
        Ok(wizard) => wizard,
        Err(e) => {
            tracing::error!(
                "Wizard setup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let mut menu = AdminMenu::new();
    wizard.register_page(&mut menu);

    if cli.list_menu {
        for page in menu.pages() {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                page.position, page.slug, page.menu_title, page.capability, page.icon
            );
        }
        return Ok(());
    }

    let request = WizardRequest::from_query(&cli.query);
    let Some(page) = request.page().and_then(|page| menu.resolve(page)) else {
        anyhow::bail!(
            "no admin page registered for page={:?}",
            request.page().unwrap_or_default()
        );
    };
    tracing::info!("Rendering '{}' (step {})", page.page_title, request.step().0);

    print!("{}", wizard.render_document(request));
    Ok(())
}
