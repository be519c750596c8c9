use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::i18n::{LocalizedString, deserialize_optional_localized};

/// Menu data as produced by the extractor and consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Menu {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: LocalizedString,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Wine(WineItem),
    Dish(MenuItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: LocalizedString,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_localized",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<LocalizedString>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub no_border: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineItem {
    pub name: LocalizedString,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_localized",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<LocalizedString>,
    pub price_glass: String,
    pub price_bottle: String,
    #[serde(default)]
    pub no_border: bool,
}

impl Item {
    pub fn name(&self) -> &LocalizedString {
        match self {
            Item::Dish(d) => &d.name,
            Item::Wine(w) => &w.name,
        }
    }

    pub fn description(&self) -> Option<&LocalizedString> {
        match self {
            Item::Dish(d) => d.description.as_ref(),
            Item::Wine(w) => w.description.as_ref(),
        }
    }

    pub fn no_border(&self) -> bool {
        match self {
            Item::Dish(d) => d.no_border,
            Item::Wine(w) => w.no_border,
        }
    }
}

impl Menu {
    pub fn from_json(text: &str) -> Result<Menu> {
        let menu: Menu = serde_json::from_str(text)?;
        menu.validate()?;
        Ok(menu)
    }

    pub fn load(path: &Path) -> Result<Menu> {
        let text = std::fs::read_to_string(path).map_err(|source| MenuError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Menu::from_json(&text)
    }

    /// The sample menu shipped with the crate, used when no data file is
    /// configured.
    pub fn builtin() -> Menu {
        // The embedded file is covered by `builtin_menu_parses`.
        Menu::from_json(include_str!("../data/menu.json")).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Section ids become element ids, so they must be unique and non-empty.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            let id = section.id.trim();
            if id.is_empty() {
                return Err(MenuError::InvalidMenu("section with empty id".into()));
            }
            if id.contains(char::is_whitespace) {
                return Err(MenuError::InvalidMenu(format!(
                    "section id '{id}' contains whitespace"
                )));
            }
            if !seen.insert(id) {
                return Err(MenuError::InvalidMenu(format!("duplicate section id '{id}'")));
            }
        }
        Ok(())
    }
}
