pub mod allergens;
pub mod annotator;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod i18n;
pub mod locale;
pub mod markup;
pub mod menu;
pub mod navigation;
pub mod page;
pub mod preference;
pub mod render;
pub mod switcher;
pub mod translator;

pub use error::{MenuError, Result};
pub use i18n::{Language, LocalizedString};
pub use page::{EventOutcome, MenuPage, PageEvent};
