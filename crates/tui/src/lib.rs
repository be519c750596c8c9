pub use menu_card_core::{
    allergens, config, dom, i18n, markup, menu, navigation, page, preference, switcher,
};

#[path = "../../../src/tui/mod.rs"]
pub mod tui;
