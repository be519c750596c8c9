use std::path::PathBuf;

use anyhow::Context;
use menu_card_core::config::{AppConfig, load_config};
use menu_card_core::navigation::NavigateOutcome;
use menu_card_core::preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use menu_card_core::{EventOutcome, Language, MenuPage, PageEvent};
use tracing::info;

use crate::{CliError, CliResult};

pub(crate) async fn load_app_config() -> CliResult<AppConfig> {
    load_config()
        .await
        .map_err(|e| CliError::Config(format!("{:#}", e)))
}

pub(crate) fn parse_language(code: &str) -> CliResult<Language> {
    code.parse::<Language>()
        .map_err(|e| CliError::Language(e.to_string()))
}

/// Load the page the way a browser opening it would.
fn open_page(cfg: &AppConfig, store: Box<dyn PreferenceStore>) -> CliResult<MenuPage> {
    let menu = cfg
        .load_menu()
        .map_err(|e| CliError::Menu(format!("{:#}", e)))?;
    let catalog = cfg
        .load_allergens()
        .map_err(|e| CliError::Menu(format!("{:#}", e)))?;
    let locale = cfg.runtime_locale();
    Ok(MenuPage::load(
        &menu,
        catalog,
        store,
        locale.as_deref(),
        cfg.transitions.timings(),
    ))
}

pub async fn handle_render_cmd(
    lang: Option<String>,
    section: Option<String>,
    out: Option<PathBuf>,
) -> CliResult<()> {
    let cfg = load_app_config().await?;
    // An explicit --lang renders that language without touching the stored preference.
    let store: Box<dyn PreferenceStore> = match lang.as_deref() {
        Some(code) => {
            let lang = parse_language(code)?;
            Box::new(MemoryPreferenceStore::new(Some(lang.code())))
        }
        None => Box::new(FilePreferenceStore::in_home()),
    };
    let mut page = open_page(&cfg, store)?;

    if let Some(id) = section.as_deref() {
        let outcome = page.dispatch(PageEvent::OpenSection(id.to_string()), 0);
        if outcome == EventOutcome::Navigation(NavigateOutcome::UnknownSection) {
            return Err(CliError::Menu(format!("unknown section '{}'", id)));
        }
        // Let every transition finish so the page is rendered at rest.
        page.tick(u64::MAX);
    }

    let html = page.to_html(cfg.page_title());
    match out {
        Some(path) => {
            std::fs::write(&path, html).with_context(|| format!("writing {:?}", path))?;
            info!("wrote {:?} ({})", path, page.language());
            println!("Wrote {} page to {:?}", page.language(), path);
        }
        None => print!("{html}"),
    }
    Ok(())
}

pub async fn handle_browse_cmd() -> CliResult<()> {
    let cfg = load_app_config().await?;
    let page = open_page(&cfg, Box::new(FilePreferenceStore::in_home()))?;
    menu_card_tui::tui::run_browser(page, cfg.page_title()).await?;
    Ok(())
}
