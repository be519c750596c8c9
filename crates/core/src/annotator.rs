use crate::allergens::{AllergenCatalog, contains_phrase};
use crate::dom::Document;
use crate::i18n::{Language, SOURCE_LANGUAGE};
use crate::markup;

/// (Re)build the allergen badges of every menu item in `lang`.
///
/// Items are looked up by their canonical (source-language) name, never by
/// the text on screen. Existing badge containers are dropped first, so
/// repeated calls leave exactly one set.
pub fn annotate(doc: &mut Document, catalog: &AllergenCatalog, lang: Language) {
    for item in doc.find_by_class(doc.root(), markup::MENU_ITEM) {
        let Some(details) = doc.first_by_class(item, markup::ITEM_DETAILS) else {
            continue;
        };
        for stale in doc.find_by_class(details, markup::ALLERGEN_CONTAINER) {
            doc.discard(stale);
        }

        let Some(canonical) = doc
            .first_by_class(details, markup::ITEM_NAME)
            .and_then(|name| doc.attr(name, SOURCE_LANGUAGE.data_attribute()))
            .map(str::to_string)
        else {
            continue;
        };
        let allergens = catalog.allergens_for(&canonical);
        if allergens.is_empty() {
            continue;
        }

        let container = doc.append_element(details, "div");
        doc.add_class(container, markup::ALLERGEN_CONTAINER);
        for allergen in allergens {
            let label = catalog.name(*allergen, lang);
            let badge = doc.append_element(container, "span");
            doc.add_class(badge, markup::ALLERGEN_BADGE);
            doc.set_attr(
                badge,
                "title",
                &format!("{} {}", contains_phrase(lang), label.to_lowercase()),
            );
            doc.append_text(badge, label);
        }
    }
}
