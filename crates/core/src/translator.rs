use crate::dom::{Document, NodeId};
use crate::i18n::{Language, SOURCE_LANGUAGE};
use crate::markup;
use crate::navigation::NavigationController;

/// Show every translatable element in `lang`.
///
/// Elements without a variant for `lang` keep whatever they display. When
/// a section is open its secondary navigation and pager are relabelled too.
pub fn translate_page(doc: &mut Document, lang: Language, nav: &NavigationController) {
    let translatable = doc.find_with_attr(doc.root(), SOURCE_LANGUAGE.data_attribute());
    for el in translatable {
        translate_element(doc, el, lang);
    }

    let secondary_shown = doc
        .get_element_by_id(markup::SECONDARY_NAVIGATION)
        .is_some_and(|nav_el| doc.is_displayed(nav_el));
    if secondary_shown && let Some(active) = nav.current_section() {
        nav.build_secondary_navigation(doc, active, lang);
    }
    // A pager still being wired picks up `lang` when its transition settles.
    if !nav.is_transitioning()
        && let Some(active) = nav.current_section()
    {
        nav.wire_pager(doc, active, lang);
    }
}

/// Returns false when the element has no variant for `lang`.
pub fn translate_element(doc: &mut Document, el: NodeId, lang: Language) -> bool {
    let Some(translation) = doc.attr(el, lang.data_attribute()).map(str::to_string) else {
        return false;
    };
    if translation.is_empty() {
        return false;
    }

    if has_icon(doc, el) {
        let text_nodes: Vec<NodeId> = doc
            .children(el)
            .iter()
            .copied()
            .filter(|&c| doc.is_text(c))
            .collect();
        for node in text_nodes {
            doc.discard(node);
        }
        doc.append_text(el, &format!(" {translation}"));
    } else {
        doc.set_text_content(el, &translation);
    }
    true
}

fn has_icon(doc: &Document, el: NodeId) -> bool {
    markup::ICON_CLASSES
        .iter()
        .any(|class| doc.first_by_class(el, class).is_some())
}
