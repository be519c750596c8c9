use tracing::{info, warn};

use crate::allergens::AllergenCatalog;
use crate::annotator::annotate;
use crate::dom::{Document, NodeId};
use crate::i18n::Language;
use crate::markup;
use crate::navigation::NavigationController;
use crate::preference::PreferenceStore;
use crate::translator::translate_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Already active, or not a supported code; only the dropdown closed.
    Unchanged,
    Switched,
}

/// The language dropdown and the active language it owns.
#[derive(Debug, Clone)]
pub struct LanguageSwitcher {
    active: Language,
    open: bool,
}

impl LanguageSwitcher {
    pub fn new(active: Language) -> Self {
        Self {
            active,
            open: false,
        }
    }

    pub fn active(&self) -> Language {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        let open = !self.open;
        self.set_open(doc, open);
    }

    pub fn close(&mut self, doc: &mut Document) {
        self.set_open(doc, false);
    }

    fn set_open(&mut self, doc: &mut Document, open: bool) {
        self.open = open;
        let Some(button) = doc.get_element_by_id(markup::CURRENT_LANG_BUTTON) else {
            return;
        };
        doc.set_attr(button, "aria-expanded", if open { "true" } else { "false" });
        if let Some(options) = doc.get_element_by_id(markup::LANG_OPTIONS) {
            doc.set_style(options, "display", if open { "flex" } else { "none" });
        }
        if let Some(arrow) = doc.first_by_class(button, markup::ARROW) {
            let rotation = if open { "rotate(180deg)" } else { "rotate(0deg)" };
            doc.set_style(arrow, "transform", rotation);
        }
    }

    /// Show the active language on the dropdown button and mark its option.
    pub fn sync_indicator(&self, doc: &mut Document) {
        let lang = self.active;
        let options = doc
            .get_element_by_id(markup::LANG_OPTIONS)
            .map(|o| doc.find_by_class(o, markup::LANG_BUTTON))
            .unwrap_or_default();
        let active_option = options
            .iter()
            .copied()
            .find(|&o| doc.attr(o, markup::DATA_LANG) == Some(lang.code()));

        if let Some(button) = doc.get_element_by_id(markup::CURRENT_LANG_BUTTON) {
            rebuild_indicator(doc, button, active_option, lang);
        }

        for option in options {
            let is_active = doc.attr(option, markup::DATA_LANG) == Some(lang.code());
            doc.set_disabled(option, is_active);
            doc.set_class(option, markup::ACTIVE_LANG, is_active);
            doc.set_style(option, "display", "inline-flex");
        }
    }

    /// Switch the page to `lang`.
    ///
    /// Selecting the active language only closes the dropdown. A failing
    /// store is logged and the switch still happens.
    pub fn select_language(
        &mut self,
        doc: &mut Document,
        lang: Language,
        store: &mut dyn PreferenceStore,
        nav: &NavigationController,
        catalog: &AllergenCatalog,
    ) -> SwitchOutcome {
        if lang == self.active {
            self.close(doc);
            return SwitchOutcome::Unchanged;
        }

        if let Err(err) = store.store(lang.code()) {
            warn!("could not persist language preference: {}", err);
        }
        info!("language {} -> {}", self.active, lang);
        self.active = lang;
        self.sync_indicator(doc);
        translate_page(doc, lang, nav);
        annotate(doc, catalog, lang);
        self.close(doc);
        SwitchOutcome::Switched
    }

    /// Like [`select_language`](Self::select_language) for a raw `data-lang` value.
    pub fn select_code(
        &mut self,
        doc: &mut Document,
        code: &str,
        store: &mut dyn PreferenceStore,
        nav: &NavigationController,
        catalog: &AllergenCatalog,
    ) -> SwitchOutcome {
        match Language::from_code(code) {
            Some(lang) => self.select_language(doc, lang, store, nav, catalog),
            None => {
                warn!("ignoring unsupported language code '{}'", code);
                self.close(doc);
                SwitchOutcome::Unchanged
            }
        }
    }
}

fn rebuild_indicator(doc: &mut Document, button: NodeId, option: Option<NodeId>, lang: Language) {
    let arrow = doc.first_by_class(button, markup::ARROW);
    let stale: Vec<NodeId> = doc
        .children(button)
        .iter()
        .copied()
        .filter(|&c| Some(c) != arrow)
        .collect();
    for node in stale {
        doc.discard(node);
    }

    let mut fresh = Vec::new();
    if let Some(flag) = option.and_then(|o| doc.first_by_class(o, markup::FLAG_ICON)) {
        fresh.push(doc.deep_clone(flag));
    }
    let code = doc.create_element("span");
    doc.add_class(code, markup::LANG_CODE);
    let text = doc.create_text(&lang.code().to_uppercase());
    doc.append_child(code, text);
    fresh.push(code);

    for node in fresh {
        match arrow {
            Some(arrow) => doc.insert_before(button, node, arrow),
            None => doc.append_child(button, node),
        }
    }
    doc.set_attr(button, markup::DATA_LANG, lang.code());
}
