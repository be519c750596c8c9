use std::path::Path;

use anyhow::Context;
use menu_card_core::extract::extract_menu;
use tracing::info;

use crate::{CliError, CliResult};

pub async fn handle_extract_cmd(input: &Path, out: Option<&Path>) -> CliResult<()> {
    let html = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("reading {:?}", input))?;
    let menu = extract_menu(&html).map_err(|e| CliError::Menu(e.to_string()))?;
    let json = menu
        .to_json_pretty()
        .map_err(|e| CliError::Menu(e.to_string()))?;

    let item_count: usize = menu.sections.iter().map(|s| s.items.len()).sum();
    info!(
        "extracted {} sections, {} items from {:?}",
        menu.sections.len(),
        item_count,
        input
    );

    match out {
        Some(path) => {
            tokio::fs::write(path, format!("{json}\n"))
                .await
                .with_context(|| format!("writing {:?}", path))?;
            println!(
                "Extracted {} sections ({} items) to {:?}",
                menu.sections.len(),
                item_count,
                path
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
