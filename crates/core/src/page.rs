//! The page as one state object: document, navigation, active language and
//! the preference store, driven by explicit events.

use tracing::{debug, info};

use crate::allergens::AllergenCatalog;
use crate::annotator::annotate;
use crate::dom::{Document, NodeId};
use crate::i18n::Language;
use crate::locale;
use crate::markup;
use crate::menu::Menu;
use crate::navigation::{NavigateOutcome, NavigationController, SwipeDirection, TransitionTimings};
use crate::preference::PreferenceStore;
use crate::render::{page_html, render_document};
use crate::switcher::{LanguageSwitcher, SwitchOutcome};
use crate::translator::translate_page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    OpenSection(String),
    Home,
    ToggleLanguageMenu,
    SelectLanguage(String),
    Previous,
    Next,
    Swipe(SwipeDirection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Navigation(NavigateOutcome),
    Language(SwitchOutcome),
    /// Home shown or dropdown toggled.
    Done,
    /// Previous/next with nowhere to go.
    Ignored,
}

pub struct MenuPage {
    doc: Document,
    nav: NavigationController,
    switcher: LanguageSwitcher,
    catalog: AllergenCatalog,
    store: Box<dyn PreferenceStore>,
}

impl MenuPage {
    /// Page-load flow: resolve the language, build the markup, show it
    /// translated and annotated, start at home.
    pub fn load(
        menu: &Menu,
        catalog: AllergenCatalog,
        store: Box<dyn PreferenceStore>,
        runtime_locale: Option<&str>,
        timings: TransitionTimings,
    ) -> Self {
        let stored = store.load();
        let lang = locale::resolve(stored.as_deref(), runtime_locale);
        info!(
            "page language {} (stored: {:?}, locale: {:?})",
            lang, stored, runtime_locale
        );

        let mut doc = render_document(menu);
        let mut nav = NavigationController::from_document(&doc, timings);
        let switcher = LanguageSwitcher::new(lang);
        switcher.sync_indicator(&mut doc);
        translate_page(&mut doc, lang, &nav);
        annotate(&mut doc, &catalog, lang);
        nav.show_home(&mut doc);

        Self {
            doc,
            nav,
            switcher,
            catalog,
            store,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn language(&self) -> Language {
        self.switcher.active()
    }

    pub fn is_language_menu_open(&self) -> bool {
        self.switcher.is_open()
    }

    pub fn catalog(&self) -> &AllergenCatalog {
        &self.catalog
    }

    pub fn dispatch(&mut self, event: PageEvent, now_ms: u64) -> EventOutcome {
        debug!("page event {:?} at {}ms", event, now_ms);
        let lang = self.switcher.active();
        match event {
            PageEvent::OpenSection(id) => {
                EventOutcome::Navigation(self.nav.navigate_to(&mut self.doc, &id, lang, now_ms))
            }
            PageEvent::Home => {
                self.nav.show_home(&mut self.doc);
                EventOutcome::Done
            }
            PageEvent::ToggleLanguageMenu => {
                self.switcher.toggle(&mut self.doc);
                EventOutcome::Done
            }
            PageEvent::SelectLanguage(code) => EventOutcome::Language(self.switcher.select_code(
                &mut self.doc,
                &code,
                self.store.as_mut(),
                &self.nav,
                &self.catalog,
            )),
            PageEvent::Previous => navigation(self.nav.previous(&mut self.doc, lang, now_ms)),
            PageEvent::Next => navigation(self.nav.next(&mut self.doc, lang, now_ms)),
            PageEvent::Swipe(dir) => navigation(self.nav.swipe(&mut self.doc, dir, lang, now_ms)),
        }
    }

    /// Map a click on `node` (or anything inside it) to a page event.
    pub fn event_for_click(&self, node: NodeId) -> Option<PageEvent> {
        let doc = &self.doc;
        let mut cur = Some(node);
        while let Some(n) = cur {
            match doc.id(n) {
                Some(markup::HOME_PAGE_BUTTON) => return Some(PageEvent::Home),
                Some(markup::CURRENT_LANG_BUTTON) => return Some(PageEvent::ToggleLanguageMenu),
                _ => {}
            }
            if doc.has_class(n, markup::LANG_BUTTON) {
                return doc
                    .attr(n, markup::DATA_LANG)
                    .map(|code| PageEvent::SelectLanguage(code.to_string()));
            }
            if doc.tag(n) == Some("button") {
                if doc.is_disabled(n) {
                    return None;
                }
                return doc
                    .attr(n, markup::DATA_TARGET)
                    .map(|target| PageEvent::OpenSection(target.to_string()));
            }
            cur = doc.parent(n);
        }
        None
    }

    pub fn click(&mut self, node: NodeId, now_ms: u64) -> Option<EventOutcome> {
        let event = self.event_for_click(node)?;
        Some(self.dispatch(event, now_ms))
    }

    pub fn tick(&mut self, now_ms: u64) {
        let lang = self.switcher.active();
        self.nav.tick(&mut self.doc, lang, now_ms);
    }

    pub fn to_html(&self, title: &str) -> String {
        page_html(&self.doc, self.switcher.active(), title)
    }
}

fn navigation(outcome: Option<NavigateOutcome>) -> EventOutcome {
    outcome.map_or(EventOutcome::Ignored, EventOutcome::Navigation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Direction, NavigationState};
    use crate::preference::MemoryPreferenceStore;
    use pretty_assertions::assert_eq;

    fn load(stored: Option<&str>, locale: Option<&str>) -> MenuPage {
        MenuPage::load(
            &Menu::builtin(),
            AllergenCatalog::builtin(),
            Box::new(MemoryPreferenceStore::new(stored)),
            locale,
            TransitionTimings::default(),
        )
    }

    fn first_menu_button(page: &MenuPage) -> NodeId {
        let doc = page.document();
        let grid = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID).unwrap();
        doc.find_by_class(grid, markup::MENU_BUTTON)[0]
    }

    #[test]
    fn load_applies_resolved_language() {
        let page = load(None, Some("de-DE"));
        assert_eq!(page.language(), Language::De);
        let doc = page.document();
        assert_eq!(doc.text_content(first_menu_button(&page)), "Feinkost");
        assert_eq!(page.navigation().state(), &NavigationState::Home);

        let badge = doc.first_by_class(doc.root(), markup::ALLERGEN_BADGE).unwrap();
        assert!(doc.attr(badge, "title").unwrap().starts_with("Enthält"));
        let button = doc.get_element_by_id(markup::CURRENT_LANG_BUTTON).unwrap();
        assert_eq!(doc.attr(button, markup::DATA_LANG), Some("de"));
    }

    #[test]
    fn stored_preference_beats_locale() {
        assert_eq!(load(Some("fr"), Some("en-US")).language(), Language::Fr);
        assert_eq!(load(Some("xx"), Some("ja-JP")).language(), Language::It);
    }

    #[test]
    fn clicks_map_to_events() {
        let mut page = load(None, None);
        let button = first_menu_button(&page);
        assert_eq!(
            page.event_for_click(button),
            Some(PageEvent::OpenSection("gastronomia".into()))
        );
        assert_eq!(
            page.click(button, 0),
            Some(EventOutcome::Navigation(NavigateOutcome::Started(
                Direction::Forward
            )))
        );

        let doc = page.document();
        let home = doc.get_element_by_id(markup::HOME_PAGE_BUTTON).unwrap();
        let icon = doc.first_by_class(home, "home-icon").unwrap();
        assert_eq!(page.event_for_click(icon), Some(PageEvent::Home));

        let options = doc.get_element_by_id(markup::LANG_OPTIONS).unwrap();
        let es = doc
            .find_by_class(options, markup::LANG_BUTTON)
            .into_iter()
            .find(|&b| doc.attr(b, markup::DATA_LANG) == Some("es"))
            .unwrap();
        let flag = doc.first_by_class(es, markup::FLAG_ICON).unwrap();
        assert_eq!(
            page.event_for_click(flag),
            Some(PageEvent::SelectLanguage("es".into()))
        );

        let title = doc.first_by_class(doc.root(), markup::CATEGORY_TITLE).unwrap();
        assert_eq!(page.event_for_click(title), None);
    }

    #[test]
    fn language_switch_mid_section_relabels_secondary_navigation() {
        let mut page = load(Some("it"), None);
        page.dispatch(PageEvent::OpenSection("dolci".into()), 0);
        page.tick(1_000);

        let outcome = page.dispatch(PageEvent::SelectLanguage("en".into()), 1_000);
        assert_eq!(outcome, EventOutcome::Language(SwitchOutcome::Switched));

        let doc = page.document();
        let grid = doc.get_element_by_id(markup::SECONDARY_BUTTONS_GRID).unwrap();
        let labels: Vec<String> = doc
            .children(grid)
            .iter()
            .map(|&b| doc.text_content(b))
            .collect();
        assert_eq!(labels, vec!["Deli", "Breakfast", "Kitchen", "Wines"]);
        let title = doc
            .get_element_by_id("dolci")
            .and_then(|s| doc.first_by_class(s, markup::CATEGORY_TITLE))
            .unwrap();
        assert_eq!(doc.text_content(title), "Desserts");
    }

    fn pager_labels(page: &MenuPage, section: &str) -> (String, String) {
        let doc = page.document();
        let section = doc.get_element_by_id(section).unwrap();
        let prev = doc.first_by_class(section, markup::PAGER_PREV).unwrap();
        let next = doc.first_by_class(section, markup::PAGER_NEXT).unwrap();
        (doc.text_content(prev), doc.text_content(next))
    }

    #[test]
    fn language_switch_mid_section_relabels_pager() {
        let mut page = load(Some("it"), None);
        page.dispatch(PageEvent::OpenSection("dolci".into()), 0);
        page.tick(1_000);
        assert_eq!(
            pager_labels(&page, "dolci"),
            ("‹ Cucina".to_string(), "Vini ›".to_string())
        );

        page.dispatch(PageEvent::SelectLanguage("en".into()), 1_000);
        assert_eq!(
            pager_labels(&page, "dolci"),
            ("‹ Kitchen".to_string(), "Wines ›".to_string())
        );
        let doc = page.document();
        let next = doc
            .get_element_by_id("dolci")
            .and_then(|s| doc.first_by_class(s, markup::PAGER_NEXT))
            .unwrap();
        assert_eq!(doc.attr(next, markup::DATA_TARGET), Some("vini"));
    }

    #[test]
    fn switch_during_transition_labels_pager_on_settle() {
        let mut page = load(Some("it"), None);
        page.dispatch(PageEvent::OpenSection("dolci".into()), 0);
        page.dispatch(PageEvent::SelectLanguage("de".into()), 10);
        page.tick(1_000);
        assert_eq!(
            pager_labels(&page, "dolci"),
            ("‹ Küche".to_string(), "Weine ›".to_string())
        );
    }

    #[test]
    fn long_session_keeps_document_size_steady() {
        let mut page = load(Some("it"), None);
        page.dispatch(PageEvent::OpenSection("dolci".into()), 0);
        page.tick(1_000);

        let mut now = 1_000;
        let mut round = |page: &mut MenuPage| {
            for code in ["en", "ru", "it"] {
                page.dispatch(PageEvent::SelectLanguage(code.into()), now);
            }
            page.dispatch(PageEvent::Next, now);
            now += 1_000;
            page.tick(now);
            page.dispatch(PageEvent::Previous, now);
            now += 1_000;
            page.tick(now);
        };

        // The first rounds wire pagers that were never shown before.
        round(&mut page);
        round(&mut page);
        let size = page.document().arena_len();
        for _ in 0..10 {
            round(&mut page);
        }
        assert_eq!(page.document().arena_len(), size);
        assert_eq!(page.navigation().current_section(), Some("dolci"));
    }

    #[test]
    fn pager_click_navigates_after_settle() {
        let mut page = load(None, Some("en"));
        page.dispatch(PageEvent::OpenSection("gastronomia".into()), 0);
        page.tick(500);

        let doc = page.document();
        let section = doc.get_element_by_id("gastronomia").unwrap();
        let prev = doc.first_by_class(section, markup::PAGER_PREV).unwrap();
        let next = doc.first_by_class(section, markup::PAGER_NEXT).unwrap();
        assert_eq!(page.event_for_click(prev), None);
        assert_eq!(
            page.click(next, 500),
            Some(EventOutcome::Navigation(NavigateOutcome::Started(
                Direction::Forward
            )))
        );
        page.tick(2_000);
        assert_eq!(page.navigation().current_section(), Some("colazioni"));
    }

    #[test]
    fn edge_moves_are_ignored() {
        let mut page = load(None, None);
        assert_eq!(page.dispatch(PageEvent::Previous, 0), EventOutcome::Ignored);
        page.dispatch(PageEvent::OpenSection("gastronomia".into()), 0);
        page.tick(1_000);
        assert_eq!(
            page.dispatch(PageEvent::Swipe(SwipeDirection::Right), 1_000),
            EventOutcome::Ignored
        );
    }

    #[test]
    fn html_carries_active_language() {
        let page = load(Some("ru"), None);
        let html = page.to_html("Menu");
        assert!(html.contains("<html lang=\"ru\">"));
        assert!(html.contains("Главное меню"));
    }
}
