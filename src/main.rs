mod commands;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use menu_card_core::config::menu_card_home;

#[derive(Parser, Debug)]
#[command(name = "menu-card")]
#[command(about = "Multilingual restaurant menu: render, browse and extract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    /// Errors related to menu-card's own config.toml
    Config(String),
    /// Errors while loading, validating or extracting menu data
    Menu(String),
    /// Unsupported language codes and preference store failures
    Language(String),
    /// Generic fallback for other failures
    Other(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Config error: {}", msg),
            CliError::Menu(msg) => write!(f, "Menu error: {}", msg),
            CliError::Language(msg) => write!(f, "Language error: {}", msg),
            CliError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        CliError::Other(format!("{:#}", e))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the menu as a static HTML page
    Render {
        /// Language code (it, en, es, fr, de, ru); defaults to the resolved language
        #[arg(long)]
        lang: Option<String>,
        /// Open this section instead of the home grid
        #[arg(long)]
        section: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Browse the menu in the terminal (default)
    Browse,
    /// Show or change the stored language preference
    Lang {
        #[command(subcommand)]
        cmd: LangCommand,
    },
    /// List allergens per dish
    Allergens {
        /// Language for allergen names
        #[arg(long)]
        lang: Option<String>,
        /// Canonical (Italian) dish name; all dishes when omitted
        dish: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Extract menu JSON from an authored index.html
    Extract {
        input: std::path::PathBuf,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Manage ~/.menu-card/config.toml
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LangCommand {
    /// Print the stored preference, the runtime locale and the resolved language
    Show,
    /// Store a preferred language
    Set { code: String },
    /// Forget the stored preference
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Initialize a commented config template (TOML)
    Init {
        /// Overwrite existing config.toml (backing up to config.toml.bak)
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() {
    if let Err(err) = real_main().await {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }
}

async fn real_main() -> CliResult<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli);

    match cli.command.unwrap_or(Command::Browse) {
        Command::Render { lang, section, out } => {
            commands::render::handle_render_cmd(lang, section, out).await?
        }
        Command::Browse => commands::render::handle_browse_cmd().await?,
        Command::Lang { cmd } => commands::lang::handle_lang_cmd(cmd).await?,
        Command::Allergens { lang, dish, json } => {
            commands::allergens::handle_allergens_cmd(lang, dish, json).await?
        }
        Command::Extract { input, out } => {
            commands::extract::handle_extract_cmd(&input, out.as_deref()).await?
        }
        Command::Config { cmd } => commands::config::handle_config_cmd(cmd).await?,
    }
    Ok(())
}

fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    // Default to info logs unless the user sets RUST_LOG.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The browser owns the terminal; logs written there would tear the screen.
    let interactive_tui = matches!(cli.command, None | Some(Command::Browse))
        && atty::is(atty::Stream::Stdin)
        && atty::is(atty::Stream::Stdout);

    if interactive_tui {
        let log_dir = menu_card_home().join("logs");
        let _ = std::fs::create_dir_all(&log_dir);

        rotate_runtime_log_if_needed(&log_dir);

        let file_appender = tracing_appender::rolling::never(&log_dir, "runtime.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(non_blocking)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}

fn rotate_runtime_log_if_needed(log_dir: &std::path::Path) {
    fn parse_env<T: std::str::FromStr + PartialOrd + Default>(key: &str) -> Option<T> {
        std::env::var(key)
            .ok()
            .and_then(|s| s.trim().parse::<T>().ok())
            .filter(|n| *n > T::default())
    }

    let max_bytes: u64 = parse_env("MENU_CARD_RUNTIME_LOG_MAX_BYTES").unwrap_or(5 * 1024 * 1024);
    let max_files: usize = parse_env("MENU_CARD_RUNTIME_LOG_MAX_FILES").unwrap_or(5);

    let path = log_dir.join("runtime.log");
    let Ok(meta) = std::fs::metadata(&path) else {
        return;
    };
    if meta.len() < max_bytes {
        return;
    }

    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let _ = std::fs::rename(&path, log_dir.join(format!("runtime.log.{ts}")));

    let Ok(rd) = std::fs::read_dir(log_dir) else {
        return;
    };
    let mut rotated: Vec<std::path::PathBuf> = rd
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|s| s.starts_with("runtime.log."))
        })
        .collect();
    if rotated.len() <= max_files {
        return;
    }
    rotated.sort();
    let remove_count = rotated.len() - max_files;
    for p in rotated.into_iter().take(remove_count) {
        let _ = std::fs::remove_file(p);
    }
}
