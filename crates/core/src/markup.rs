//! Element ids and class names shared by the renderer and the page logic.

pub const MENU_CONTAINER: &str = "menu-container";
pub const MAIN_BUTTONS_GRID: &str = "main-buttons-grid";
pub const SECONDARY_NAVIGATION: &str = "secondary-navigation";
pub const SECONDARY_BUTTONS_GRID: &str = "secondary-buttons-grid";
pub const HOME_PAGE_BUTTON: &str = "home-page-btn";
pub const CURRENT_LANG_BUTTON: &str = "current-lang-btn";
pub const LANG_OPTIONS: &str = "lang-options";

pub const MENU_SECTION: &str = "menu-section";
pub const MENU_BUTTON: &str = "menu-button";
pub const CATEGORY_TITLE: &str = "category-title";
pub const MENU_ITEM: &str = "menu-item";
pub const WINE_ITEM: &str = "wine-item";
pub const ITEM_DETAILS: &str = "item-details";
pub const ITEM_NAME: &str = "item-name";
pub const ITEM_DESCRIPTION: &str = "item-description";
pub const ITEM_PRICE: &str = "item-price";
pub const WINE_PRICE_GLASS: &str = "wine-price-glass";
pub const WINE_PRICE_BOTTLE: &str = "wine-price-bottle";
pub const NO_BORDER: &str = "no-border";

pub const ALLERGEN_CONTAINER: &str = "allergen-container";
pub const ALLERGEN_BADGE: &str = "allergen-badge";

pub const LANG_BUTTON: &str = "lang-btn";
pub const ACTIVE_LANG: &str = "active-lang";
pub const FLAG_ICON: &str = "flag-icon";
pub const LANG_CODE: &str = "lang-code";
pub const ARROW: &str = "arrow";

pub const SECTION_PAGER: &str = "section-pager";
pub const PAGER_PREV: &str = "pager-prev";
pub const PAGER_NEXT: &str = "pager-next";

/// Sub-elements that survive re-translation of their parent.
pub const ICON_CLASSES: &[&str] = &["whatsapp-icon-img", "review-icon", "home-icon"];

pub const DATA_TARGET: &str = "data-target";
pub const DATA_LANG: &str = "data-lang";
