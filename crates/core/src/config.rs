use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use crate::allergens::AllergenCatalog;
use crate::i18n::detect_runtime_locale;
use crate::menu::Menu;
use crate::navigation::TransitionTimings;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Optional config schema version for future migrations
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub transitions: TransitionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuConfig {
    /// Menu JSON as written by `menu-card extract`. Unset: the built-in sample.
    #[serde(default)]
    pub data: Option<PathBuf>,
    /// TOML overlay for the allergen tables.
    #[serde(default)]
    pub allergens: Option<PathBuf>,
    /// Page title used by `render`.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Stand-in for the browser locale: a locale tag such as `de-AT`, or
    /// `auto` (default) to read LC_ALL / LC_MESSAGES / LANGUAGE / LANG.
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransitionConfig {
    /// Exit animation length, e.g. `400ms`.
    #[serde(default)]
    pub exit: Option<String>,
    /// Delay before the pager is wired, e.g. `100ms`.
    #[serde(default)]
    pub settle: Option<String>,
}

const MAX_TRANSITION: Duration = Duration::from_secs(5);

impl TransitionConfig {
    pub fn timings(&self) -> TransitionTimings {
        fn parse(raw: Option<&str>, key: &str, fallback: Duration) -> Duration {
            let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
                return fallback;
            };
            match humantime::parse_duration(raw) {
                Ok(d) => d.min(MAX_TRANSITION),
                Err(err) => {
                    warn!("Invalid transitions.{} '{}' ({}), using default", key, raw, err);
                    fallback
                }
            }
        }

        let defaults = TransitionTimings::default();
        TransitionTimings {
            exit: parse(self.exit.as_deref(), "exit", defaults.exit),
            settle: parse(self.settle.as_deref(), "settle", defaults.settle),
        }
    }
}

impl AppConfig {
    /// The locale signal handed to the resolver.
    pub fn runtime_locale(&self) -> Option<String> {
        match self.ui.locale.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() && !s.eq_ignore_ascii_case("auto") => Some(s.to_string()),
            _ => detect_runtime_locale(),
        }
    }

    pub fn load_menu(&self) -> Result<Menu> {
        match &self.menu.data {
            Some(path) => {
                let path = resolve_relative(path);
                Menu::load(&path).with_context(|| format!("loading menu data {:?}", path))
            }
            None => Ok(Menu::builtin()),
        }
    }

    pub fn load_allergens(&self) -> Result<AllergenCatalog> {
        match &self.menu.allergens {
            Some(path) => {
                let path = resolve_relative(path);
                AllergenCatalog::load(&path)
                    .with_context(|| format!("loading allergen catalog {:?}", path))
            }
            None => Ok(AllergenCatalog::builtin()),
        }
    }

    pub fn page_title(&self) -> &str {
        self.menu.title.as_deref().unwrap_or("Menu")
    }
}

/// Relative data paths in the config are relative to the home directory.
fn resolve_relative(path: &std::path::Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        menu_card_home().join(path)
    }
}

/// Home directory for config, preference and logs.
pub fn menu_card_home() -> PathBuf {
    if let Ok(dir) = env::var("MENU_CARD_HOME") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    #[cfg(test)]
    {
        static TEST_HOME: std::sync::OnceLock<PathBuf> = std::sync::OnceLock::new();
        TEST_HOME
            .get_or_init(|| {
                let mut dir = std::env::temp_dir();
                dir.push(format!("menu-card-test-{}", std::process::id()));
                dir.push(".menu-card");
                let _ = std::fs::create_dir_all(&dir);
                dir
            })
            .clone()
    }

    #[cfg(not(test))]
    {
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".menu-card")
    }
}

pub fn config_file_path() -> PathBuf {
    menu_card_home().join("config.toml")
}

fn config_backup_path() -> PathBuf {
    menu_card_home().join("config.toml.bak")
}

const CONFIG_VERSION: u32 = 1;

const CONFIG_TOML_TEMPLATE: &str = r#"# menu-card config.toml
#
# Relative paths are resolved against this directory.
version = 1

[menu]
# Menu JSON produced by `menu-card extract index.html`.
# data = "menu-data.json"
# Allergen overlay: [names.<tag>] and [dishes] tables.
# allergens = "allergens.toml"
title = "Menu"

[ui]
# Locale used when no language was chosen yet: "auto" reads LANG and friends.
locale = "auto"

[transitions]
exit = "400ms"
settle = "100ms"
"#;

pub async fn load_config() -> Result<AppConfig> {
    let path = config_file_path();
    if !path.exists() {
        return Ok(AppConfig {
            version: Some(CONFIG_VERSION),
            ..Default::default()
        });
    }
    let text = fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {:?}", path))?;
    let mut cfg = toml::from_str::<AppConfig>(&text).with_context(|| format!("parsing {:?}", path))?;
    if cfg.version.is_none() {
        cfg.version = Some(CONFIG_VERSION);
    }
    Ok(cfg)
}

pub async fn save_config(cfg: &AppConfig) -> Result<()> {
    let mut cfg = cfg.clone();
    if cfg.version.is_none() {
        cfg.version = Some(CONFIG_VERSION);
    }

    let dir = menu_card_home();
    fs::create_dir_all(&dir).await?;
    let path = config_file_path();
    let body = toml::to_string_pretty(&cfg)?;

    if path.exists()
        && let Err(err) = fs::copy(&path, config_backup_path()).await
    {
        warn!("failed to backup {:?}: {}", path, err);
    }

    let tmp_path = dir.join("config.tmp");
    fs::write(&tmp_path, body.as_bytes()).await?;
    fs::rename(&tmp_path, &path).await?;
    Ok(())
}

/// Write the commented template; refuses to overwrite unless `force`.
pub async fn init_config_toml(force: bool) -> Result<PathBuf> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!("{:?} already exists (use --force to overwrite)", path);
    }
    let dir = menu_card_home();
    fs::create_dir_all(&dir).await?;
    if path.exists()
        && let Err(err) = fs::copy(&path, config_backup_path()).await
    {
        warn!("failed to backup {:?}: {}", path, err);
    }
    let tmp_path = dir.join("config.tmp");
    fs::write(&tmp_path, CONFIG_TOML_TEMPLATE).await?;
    fs::rename(&tmp_path, &path).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Mutex, OnceLock};

    struct ScopedEnv {
        saved: Vec<(String, Option<String>)>,
    }

    impl ScopedEnv {
        fn new() -> Self {
            Self { saved: Vec::new() }
        }

        unsafe fn set(&mut self, key: &str, value: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::set_var(key, value) };
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, old) in self.saved.drain(..).rev() {
                unsafe {
                    match old {
                        Some(v) => std::env::set_var(&key, v),
                        None => std::env::remove_var(&key),
                    }
                }
            }
        }
    }

    pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(g) => g,
            Err(e) => e.into_inner(),
        }
    }

    struct TestEnv {
        _lock: std::sync::MutexGuard<'static, ()>,
        _env: ScopedEnv,
        home: PathBuf,
    }

    fn setup_temp_home() -> TestEnv {
        let lock = env_lock();
        let dir = std::env::temp_dir().join(format!("menu-card-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp home");
        let mut scoped = ScopedEnv::new();
        unsafe {
            scoped.set("MENU_CARD_HOME", dir.to_str().expect("utf-8 temp dir"));
        }
        TestEnv {
            _lock: lock,
            _env: scoped,
            home: dir,
        }
    }

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build tokio runtime")
            .block_on(f)
    }

    #[test]
    fn missing_config_yields_defaults() {
        let _env = setup_temp_home();
        let cfg = block_on(load_config()).expect("load");
        assert_eq!(cfg.version, Some(CONFIG_VERSION));
        assert!(cfg.menu.data.is_none());
        assert_eq!(cfg.transitions.timings(), TransitionTimings::default());
    }

    #[test]
    fn template_round_trips_through_load() {
        let env = setup_temp_home();
        let path = block_on(init_config_toml(false)).expect("init");
        assert_eq!(path, env.home.join("config.toml"));
        assert!(block_on(init_config_toml(false)).is_err());

        let cfg = block_on(load_config()).expect("load");
        assert_eq!(cfg.page_title(), "Menu");
        assert_eq!(cfg.ui.locale.as_deref(), Some("auto"));
        assert_eq!(cfg.transitions.timings().exit, Duration::from_millis(400));
    }

    #[test]
    fn save_keeps_a_backup() {
        let env = setup_temp_home();
        let mut cfg = AppConfig::default();
        cfg.menu.title = Some("Skalette".into());
        block_on(save_config(&cfg)).expect("save");
        cfg.menu.title = Some("Skalette bar".into());
        block_on(save_config(&cfg)).expect("save again");

        let loaded = block_on(load_config()).expect("load");
        assert_eq!(loaded.page_title(), "Skalette bar");
        let backup = std::fs::read_to_string(env.home.join("config.toml.bak")).expect("backup");
        assert!(backup.contains("Skalette"));
    }

    #[test]
    fn transition_durations_parse_and_clamp() {
        let t = TransitionConfig {
            exit: Some("1s 250ms".into()),
            settle: Some("soon".into()),
        };
        let timings = t.timings();
        assert_eq!(timings.exit, Duration::from_millis(1_250));
        assert_eq!(timings.settle, TransitionTimings::default().settle);

        let long = TransitionConfig {
            exit: Some("2min".into()),
            settle: None,
        };
        assert_eq!(long.timings().exit, MAX_TRANSITION);
    }

    #[test]
    fn configured_locale_overrides_detection() {
        let cfg = AppConfig {
            ui: UiConfig {
                locale: Some("de-AT".into()),
            },
            ..Default::default()
        };
        assert_eq!(cfg.runtime_locale().as_deref(), Some("de-AT"));
    }

    #[test]
    fn relative_data_paths_resolve_against_home() {
        let env = setup_temp_home();
        std::fs::write(
            env.home.join("menu.json"),
            r#"{"sections":[{"id":"bar","name":{"it":"Bar","en":"Bar"}}]}"#,
        )
        .expect("write menu");
        let cfg = AppConfig {
            menu: MenuConfig {
                data: Some(PathBuf::from("menu.json")),
                ..Default::default()
            },
            ..Default::default()
        };
        let menu = cfg.load_menu().expect("menu");
        assert_eq!(menu.sections[0].id, "bar");
    }
}
