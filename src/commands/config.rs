use menu_card_core::config::{config_file_path, init_config_toml, load_config, menu_card_home};

use crate::{CliError, CliResult, ConfigCommand};

pub async fn handle_config_cmd(cmd: ConfigCommand) -> CliResult<()> {
    match cmd {
        ConfigCommand::Init { force } => {
            let path = init_config_toml(force)
                .await
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("Wrote TOML config template to {:?}", path);
        }
        ConfigCommand::Path => {
            let path = config_file_path();
            if path.exists() {
                // Parse it so a broken file is reported here rather than at render time.
                load_config()
                    .await
                    .map_err(|e| CliError::Config(format!("{:#}", e)))?;
                println!("{}", path.display());
            } else {
                println!("{} (not created yet; home {})", path.display(), menu_card_home().display());
            }
        }
    }
    Ok(())
}
