use menu_card_core::locale;
use menu_card_core::preference::{FilePreferenceStore, PreferenceStore};
use owo_colors::OwoColorize;

use super::render::{load_app_config, parse_language};
use crate::{CliError, CliResult, LangCommand};

pub async fn handle_lang_cmd(cmd: LangCommand) -> CliResult<()> {
    let mut store = FilePreferenceStore::in_home();
    match cmd {
        LangCommand::Show => {
            let cfg = load_app_config().await?;
            let stored = store.load();
            let runtime = cfg.runtime_locale();
            let resolved = locale::resolve(stored.as_deref(), runtime.as_deref());

            println!("stored:   {}", stored.as_deref().unwrap_or("-"));
            println!("locale:   {}", runtime.as_deref().unwrap_or("-"));
            println!(
                "resolved: {} {} ({})",
                resolved.flag(),
                resolved.code().bold(),
                resolved.native_name()
            );
            println!("file:     {}", store.path().display());
        }
        LangCommand::Set { code } => {
            let lang = parse_language(&code)?;
            store
                .store(lang.code())
                .map_err(|e| CliError::Language(e.to_string()))?;
            println!("Preferred language set to {} ({})", lang.code(), lang.native_name());
        }
        LangCommand::Clear => {
            store
                .clear()
                .map_err(|e| CliError::Language(e.to_string()))?;
            println!("Preferred language cleared");
        }
    }
    Ok(())
}
