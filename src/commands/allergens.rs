use menu_card_core::Language;
use menu_card_core::allergens::{AllergenCatalog, contains_phrase};
use menu_card_core::locale;
use menu_card_core::preference::{FilePreferenceStore, PreferenceStore};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::render::{load_app_config, parse_language};
use crate::{CliError, CliResult};

#[derive(Debug, Serialize)]
struct DishAllergens<'a> {
    dish: &'a str,
    allergens: Vec<&'a str>,
}

fn rows<'a>(catalog: &'a AllergenCatalog, lang: Language, dish: Option<&str>) -> Vec<DishAllergens<'a>> {
    let mut rows: Vec<DishAllergens<'a>> = catalog
        .dishes()
        .filter(|(name, _)| dish.is_none_or(|d| d == *name))
        .map(|(name, tags)| DishAllergens {
            dish: name,
            allergens: tags.iter().map(|a| catalog.name(*a, lang)).collect(),
        })
        .collect();
    rows.sort_by(|a, b| a.dish.cmp(b.dish));
    rows
}

pub async fn handle_allergens_cmd(
    lang: Option<String>,
    dish: Option<String>,
    json: bool,
) -> CliResult<()> {
    let cfg = load_app_config().await?;
    let lang = match lang.as_deref() {
        Some(code) => parse_language(code)?,
        None => {
            let stored = FilePreferenceStore::in_home().load();
            locale::resolve(stored.as_deref(), cfg.runtime_locale().as_deref())
        }
    };
    let catalog = cfg
        .load_allergens()
        .map_err(|e| CliError::Menu(format!("{:#}", e)))?;

    let rows = rows(&catalog, lang, dish.as_deref());
    if let Some(d) = dish.as_deref()
        && rows.is_empty()
    {
        return Err(CliError::Menu(format!("no allergen entry for '{}'", d)));
    }

    if json {
        let text = serde_json::to_string_pretty(&rows).map_err(|e| CliError::Other(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    for row in rows {
        if row.allergens.is_empty() {
            println!("{}", row.dish.bold());
            continue;
        }
        println!(
            "{}  {} {}",
            row.dish.bold(),
            contains_phrase(lang).dimmed(),
            row.allergens.join(", ").to_lowercase()
        );
    }
    Ok(())
}
