use ratatui::prelude::Color;
use unicode_width::UnicodeWidthStr;

use crate::dom::{Document, NodeId};
use crate::i18n::Language;
use crate::markup;
use crate::navigation::TransitionPhase;
use crate::page::MenuPage;

#[derive(Debug, Clone, Copy)]
pub(in crate::tui) struct Palette {
    pub(in crate::tui) bg: Color,
    pub(in crate::tui) panel: Color,
    pub(in crate::tui) border: Color,
    pub(in crate::tui) focus: Color,
    pub(in crate::tui) text: Color,
    pub(in crate::tui) muted: Color,
    pub(in crate::tui) accent: Color,
    pub(in crate::tui) good: Color,
    pub(in crate::tui) warn: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(24, 20, 18),
            panel: Color::Rgb(34, 29, 26),
            border: Color::Rgb(74, 62, 54),
            focus: Color::Rgb(201, 162, 92),
            text: Color::Rgb(236, 228, 214),
            muted: Color::Rgb(150, 138, 124),
            accent: Color::Rgb(214, 120, 84),
            good: Color::Rgb(132, 176, 116),
            warn: Color::Rgb(222, 178, 92),
        }
    }
}

/// Something the user can activate; activating clicks `node`.
#[derive(Debug, Clone)]
pub(in crate::tui) struct Target {
    pub(in crate::tui) label: String,
    pub(in crate::tui) node: NodeId,
}

#[derive(Debug, Clone)]
pub(in crate::tui) struct ItemView {
    pub(in crate::tui) name: String,
    pub(in crate::tui) description: Option<String>,
    pub(in crate::tui) price: String,
    pub(in crate::tui) badges: Vec<String>,
}

#[derive(Debug, Clone)]
pub(in crate::tui) struct SectionView {
    pub(in crate::tui) id: String,
    pub(in crate::tui) title: String,
    pub(in crate::tui) items: Vec<ItemView>,
    /// Set while the section plays its exit animation.
    pub(in crate::tui) leaving: bool,
}

#[derive(Debug, Clone)]
pub(in crate::tui) struct LanguageOption {
    pub(in crate::tui) label: String,
    pub(in crate::tui) active: bool,
    pub(in crate::tui) node: NodeId,
}

/// What the document shows right now, read back from its markup.
#[derive(Debug, Clone)]
pub(in crate::tui) struct Snapshot {
    pub(in crate::tui) language: Language,
    pub(in crate::tui) indicator: String,
    pub(in crate::tui) home: Vec<Target>,
    pub(in crate::tui) section: Option<SectionView>,
    pub(in crate::tui) pager: Vec<Target>,
    pub(in crate::tui) secondary: Vec<Target>,
    pub(in crate::tui) home_button: Option<Target>,
    pub(in crate::tui) languages: Vec<LanguageOption>,
    pub(in crate::tui) language_menu_open: bool,
    pub(in crate::tui) transition: Option<String>,
}

impl Snapshot {
    /// Targets in focus order for the current screen.
    pub(in crate::tui) fn targets(&self) -> Vec<Target> {
        if self.language_menu_open {
            return self
                .languages
                .iter()
                .map(|l| Target {
                    label: l.label.clone(),
                    node: l.node,
                })
                .collect();
        }
        if self.section.is_none() {
            return self.home.clone();
        }
        let mut out = self.pager.clone();
        out.extend(self.secondary.iter().cloned());
        out.extend(self.home_button.iter().cloned());
        out
    }
}

pub(in crate::tui) fn build_snapshot(page: &MenuPage) -> Snapshot {
    let doc = page.document();
    let root = doc.root();

    let home = doc
        .get_element_by_id(markup::MAIN_BUTTONS_GRID)
        .filter(|&g| doc.is_displayed(g))
        .map(|g| buttons(doc, doc.find_by_class(g, markup::MENU_BUTTON)))
        .unwrap_or_default();

    let visible = doc
        .find_by_class(root, markup::MENU_SECTION)
        .into_iter()
        .find(|&s| doc.is_displayed(s));
    let section = visible.map(|s| section_view(doc, s));
    let pager = visible
        .and_then(|s| doc.first_by_class(s, markup::SECTION_PAGER))
        .map(|p| {
            let live = doc
                .children(p)
                .iter()
                .copied()
                .filter(|&b| doc.is_displayed(b) && !doc.is_disabled(b))
                .collect();
            buttons(doc, live)
        })
        .unwrap_or_default();

    let secondary_shown = doc
        .get_element_by_id(markup::SECONDARY_NAVIGATION)
        .is_some_and(|s| doc.is_displayed(s));
    let secondary = if secondary_shown {
        doc.get_element_by_id(markup::SECONDARY_BUTTONS_GRID)
            .map(|g| buttons(doc, doc.children(g).to_vec()))
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let home_button = doc
        .get_element_by_id(markup::HOME_PAGE_BUTTON)
        .filter(|_| secondary_shown)
        .map(|b| Target {
            label: clean(&doc.text_content(b)),
            node: b,
        });

    let languages = doc
        .get_element_by_id(markup::LANG_OPTIONS)
        .map(|o| doc.find_by_class(o, markup::LANG_BUTTON))
        .unwrap_or_default()
        .into_iter()
        .map(|b| LanguageOption {
            label: clean(&doc.text_content(b)),
            active: doc.has_class(b, markup::ACTIVE_LANG),
            node: b,
        })
        .collect();
    let indicator = doc
        .get_element_by_id(markup::CURRENT_LANG_BUTTON)
        .map(|b| clean(&doc.text_content(b)))
        .unwrap_or_default();

    let transition = match page.navigation().phase() {
        TransitionPhase::Idle => None,
        TransitionPhase::ExitingOld { from, to, .. } => Some(format!("{from} → {to}")),
        TransitionPhase::EnteringNew { to, .. } => Some(format!("→ {to}")),
    };

    Snapshot {
        language: page.language(),
        indicator,
        home,
        section,
        pager,
        secondary,
        home_button,
        languages,
        language_menu_open: page.is_language_menu_open(),
        transition,
    }
}

fn buttons(doc: &Document, nodes: Vec<NodeId>) -> Vec<Target> {
    nodes
        .into_iter()
        .map(|node| Target {
            label: clean(&doc.text_content(node)),
            node,
        })
        .filter(|t| !t.label.is_empty())
        .collect()
}

fn section_view(doc: &Document, section: NodeId) -> SectionView {
    let title = doc
        .first_by_class(section, markup::CATEGORY_TITLE)
        .map(|t| clean(&doc.text_content(t)))
        .unwrap_or_default();
    let items = doc
        .descendants(section)
        .into_iter()
        .filter(|&n| doc.has_class(n, markup::MENU_ITEM) || doc.has_class(n, markup::WINE_ITEM))
        .map(|n| item_view(doc, n))
        .collect();
    SectionView {
        id: doc.id(section).unwrap_or_default().to_string(),
        title,
        items,
        leaving: doc.has_class(section, "exit-forward") || doc.has_class(section, "exit-backward"),
    }
}

fn item_view(doc: &Document, item: NodeId) -> ItemView {
    let text_of = |class: &str| {
        doc.first_by_class(item, class)
            .map(|n| clean(&doc.text_content(n)))
    };
    let price = match text_of(markup::ITEM_PRICE) {
        Some(price) => price,
        None => [markup::WINE_PRICE_GLASS, markup::WINE_PRICE_BOTTLE]
            .into_iter()
            .filter_map(|c| text_of(c))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" / "),
    };
    ItemView {
        name: text_of(markup::ITEM_NAME).unwrap_or_default(),
        description: text_of(markup::ITEM_DESCRIPTION).filter(|d| !d.is_empty()),
        price,
        badges: doc
            .find_by_class(item, markup::ALLERGEN_BADGE)
            .into_iter()
            .map(|b| clean(&doc.text_content(b)))
            .collect(),
    }
}

/// Collapse the whitespace left by markup indentation.
fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pad `s` with spaces to `width` terminal columns.
pub(in crate::tui) fn pad_to(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allergens::AllergenCatalog;
    use crate::menu::Menu;
    use crate::navigation::TransitionTimings;
    use crate::page::PageEvent;
    use crate::preference::MemoryPreferenceStore;
    use pretty_assertions::assert_eq;

    fn page(lang: &str) -> MenuPage {
        MenuPage::load(
            &Menu::builtin(),
            AllergenCatalog::builtin(),
            Box::new(MemoryPreferenceStore::new(Some(lang))),
            None,
            TransitionTimings::default(),
        )
    }

    #[test]
    fn home_snapshot_lists_sections() {
        let snap = build_snapshot(&page("en"));
        let labels: Vec<&str> = snap.home.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Deli", "Breakfast", "Kitchen", "Desserts", "Wines"]);
        assert!(snap.section.is_none());
        assert!(snap.secondary.is_empty());
        assert_eq!(snap.targets().len(), 5);
        assert!(snap.indicator.contains("EN"));
        assert_eq!(snap.languages.iter().filter(|l| l.active).count(), 1);
    }

    #[test]
    fn section_snapshot_carries_badges_and_navigation() {
        let mut page = page("it");
        page.dispatch(PageEvent::OpenSection("vini".into()), 0);
        page.tick(1_000);
        let snap = build_snapshot(&page);

        let section = snap.section.as_ref().unwrap();
        assert_eq!(section.id, "vini");
        assert_eq!(section.items[0].price, "€ 6,00 / € 28,00");
        assert!(section.items.iter().all(|i| i.badges.is_empty()));
        assert_eq!(snap.pager.len(), 1);
        assert_eq!(snap.pager[0].label, "‹ Dolci");
        assert_eq!(snap.secondary.len(), 4);
        assert_eq!(snap.home_button.as_ref().unwrap().label, "⌂ Menu principale");
        assert!(snap.transition.is_none());

        page.dispatch(PageEvent::OpenSection("cucina".into()), 1_000);
        let leaving = build_snapshot(&page);
        assert!(leaving.section.as_ref().unwrap().leaving);
        assert_eq!(leaving.transition.as_deref(), Some("vini → cucina"));

        page.tick(2_000);
        let snap = build_snapshot(&page);
        let pad_thai = snap
            .section
            .as_ref()
            .unwrap()
            .items
            .iter()
            .find(|i| i.name == "Pad Thai")
            .unwrap();
        assert_eq!(pad_thai.badges, vec!["Arachidi", "Crostacei", "Soia", "Sesamo"]);
    }

    #[test]
    fn padding_counts_display_columns() {
        assert_eq!(pad_to("Küche", 7), "Küche  ");
        assert_eq!(pad_to("Кухня", 3), "Кухня");
    }
}
