use crate::dom::{Document, NodeId};
use crate::i18n::{Language, LocalizedString};
use crate::markup;
use crate::menu::{Item, Menu, Section};

fn home_label() -> LocalizedString {
    LocalizedString::new("Menu principale")
        .with(Language::En, "Main menu")
        .with(Language::Es, "Menú principal")
        .with(Language::Fr, "Menu principal")
        .with(Language::De, "Hauptmenü")
        .with(Language::Ru, "Главное меню")
}

fn review_label() -> LocalizedString {
    LocalizedString::new("Lascia una recensione")
        .with(Language::En, "Leave a review")
        .with(Language::Es, "Deja una reseña")
        .with(Language::Fr, "Laissez un avis")
        .with(Language::De, "Bewertung abgeben")
        .with(Language::Ru, "Оставить отзыв")
}

fn whatsapp_label() -> LocalizedString {
    LocalizedString::new("Scrivici su WhatsApp")
        .with(Language::En, "Message us on WhatsApp")
        .with(Language::Es, "Escríbenos por WhatsApp")
        .with(Language::Fr, "Écrivez-nous sur WhatsApp")
        .with(Language::De, "Schreib uns auf WhatsApp")
        .with(Language::Ru, "Напишите нам в WhatsApp")
}

/// Put one `data-<code>` attribute per variant on `node`.
pub fn set_localized_attrs(doc: &mut Document, node: NodeId, text: &LocalizedString) {
    for (lang, value) in text.variants() {
        doc.set_attr(node, lang.data_attribute(), value);
    }
}

fn localized_element(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    class: &str,
    text: &LocalizedString,
) -> NodeId {
    let el = doc.append_element(parent, tag);
    doc.add_class(el, class);
    set_localized_attrs(doc, el, text);
    doc.append_text(el, text.source());
    el
}

/// Build the page markup for `menu`, with every text in the source language
/// and everything but the home grid hidden.
pub fn render_document(menu: &Menu) -> Document {
    let mut doc = Document::new();
    let body = doc.root();

    render_language_switcher(&mut doc, body);

    let container = doc.append_element(body, "main");
    doc.set_attr(container, "id", markup::MENU_CONTAINER);

    let grid = doc.append_element(container, "nav");
    doc.set_attr(grid, "id", markup::MAIN_BUTTONS_GRID);
    doc.set_style(grid, "display", "flex");
    for section in &menu.sections {
        let button = localized_element(&mut doc, grid, "button", markup::MENU_BUTTON, &section.name);
        doc.set_attr(button, markup::DATA_TARGET, &section.id);
    }

    for section in &menu.sections {
        render_section(&mut doc, container, section);
    }

    let secondary = doc.append_element(container, "div");
    doc.set_attr(secondary, "id", markup::SECONDARY_NAVIGATION);
    doc.set_style(secondary, "display", "none");
    let secondary_grid = doc.append_element(secondary, "div");
    doc.set_attr(secondary_grid, "id", markup::SECONDARY_BUTTONS_GRID);
    let home = doc.append_element(secondary, "button");
    doc.set_attr(home, "id", markup::HOME_PAGE_BUTTON);
    let label = home_label();
    set_localized_attrs(&mut doc, home, &label);
    let icon = doc.append_element(home, "span");
    doc.add_class(icon, "home-icon");
    doc.append_text(icon, "⌂");
    doc.append_text(home, &format!(" {}", label.source()));

    render_footer(&mut doc, body);
    doc
}

fn render_language_switcher(doc: &mut Document, body: NodeId) {
    let header = doc.append_element(body, "header");
    doc.add_class(header, "site-header");
    let switcher = doc.append_element(header, "div");
    doc.add_class(switcher, "lang-switcher");

    let current = doc.append_element(switcher, "button");
    doc.set_attr(current, "id", markup::CURRENT_LANG_BUTTON);
    doc.set_attr(current, "aria-expanded", "false");
    let arrow = doc.append_element(current, "span");
    doc.add_class(arrow, markup::ARROW);
    doc.append_text(arrow, "▾");

    let options = doc.append_element(switcher, "div");
    doc.set_attr(options, "id", markup::LANG_OPTIONS);
    doc.set_style(options, "display", "none");
    for lang in Language::all() {
        let btn = doc.append_element(options, "button");
        doc.add_class(btn, markup::LANG_BUTTON);
        doc.set_attr(btn, markup::DATA_LANG, lang.code());
        let flag = doc.append_element(btn, "span");
        doc.add_class(flag, markup::FLAG_ICON);
        doc.append_text(flag, lang.flag());
        let name = doc.append_element(btn, "span");
        doc.add_class(name, "lang-name");
        doc.append_text(name, lang.native_name());
    }
}

fn render_section(doc: &mut Document, container: NodeId, section: &Section) {
    let el = doc.append_element(container, "section");
    doc.set_attr(el, "id", &section.id);
    doc.add_class(el, markup::MENU_SECTION);
    doc.set_style(el, "display", "none");
    localized_element(doc, el, "h2", markup::CATEGORY_TITLE, &section.name);

    for item in &section.items {
        render_item(doc, el, item);
    }

    let pager = doc.append_element(el, "div");
    doc.add_class(pager, markup::SECTION_PAGER);
    for class in [markup::PAGER_PREV, markup::PAGER_NEXT] {
        let btn = doc.append_element(pager, "button");
        doc.add_class(btn, class);
        doc.set_style(btn, "display", "none");
    }
}

fn render_item(doc: &mut Document, section: NodeId, item: &Item) {
    let class = match item {
        Item::Dish(_) => markup::MENU_ITEM,
        Item::Wine(_) => markup::WINE_ITEM,
    };
    let el = doc.append_element(section, "div");
    doc.add_class(el, class);
    if item.no_border() {
        doc.add_class(el, markup::NO_BORDER);
    }

    let details = doc.append_element(el, "div");
    doc.add_class(details, markup::ITEM_DETAILS);
    localized_element(doc, details, "h3", markup::ITEM_NAME, item.name());
    if let Some(description) = item.description() {
        localized_element(doc, details, "p", markup::ITEM_DESCRIPTION, description);
    }

    match item {
        Item::Dish(dish) => {
            let price = doc.append_element(el, "span");
            doc.add_class(price, markup::ITEM_PRICE);
            doc.append_text(price, &dish.price);
        }
        Item::Wine(wine) => {
            let prices = doc.append_element(el, "div");
            doc.add_class(prices, "wine-prices");
            for (class, value) in [
                (markup::WINE_PRICE_GLASS, &wine.price_glass),
                (markup::WINE_PRICE_BOTTLE, &wine.price_bottle),
            ] {
                let span = doc.append_element(prices, "span");
                doc.add_class(span, class);
                doc.append_text(span, value);
            }
        }
    }
}

fn render_footer(doc: &mut Document, body: NodeId) {
    let footer = doc.append_element(body, "footer");
    doc.add_class(footer, "site-footer");
    for (class, icon_class, href, label) in [
        ("review-link", "review-icon", "#review", review_label()),
        ("whatsapp-link", "whatsapp-icon-img", "#whatsapp", whatsapp_label()),
    ] {
        let link = doc.append_element(footer, "a");
        doc.add_class(link, class);
        doc.set_attr(link, "href", href);
        set_localized_attrs(doc, link, &label);
        let icon = doc.append_element(link, "img");
        doc.add_class(icon, icon_class);
        doc.set_attr(icon, "alt", "");
        doc.append_text(link, &format!(" {}", label.source()));
    }
}

/// Serialize a whole HTML page around the document body.
pub fn page_html(doc: &Document, lang: Language, title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!("<html lang=\"{}\">\n", lang.code()));
    out.push_str("<head>\n  <meta charset=\"utf-8\">\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    out.push_str(&format!("  <title>{}</title>\n", title.replace('<', "&lt;")));
    out.push_str("  <link rel=\"stylesheet\" href=\"style.css\">\n</head>\n");
    out.push_str(&doc.outer_html(doc.root()));
    out.push_str("</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_markup_contract() {
        let menu = Menu::builtin();
        let doc = render_document(&menu);

        let grid = doc.get_element_by_id(markup::MAIN_BUTTONS_GRID).unwrap();
        let buttons = doc.find_by_class(grid, markup::MENU_BUTTON);
        assert_eq!(buttons.len(), menu.sections.len());
        assert_eq!(doc.attr(buttons[0], markup::DATA_TARGET), Some("gastronomia"));
        assert_eq!(doc.attr(buttons[0], "data-en"), Some("Deli"));

        let sections = doc.find_by_class(doc.root(), markup::MENU_SECTION);
        assert_eq!(sections.len(), menu.sections.len());
        assert!(sections.iter().all(|&s| !doc.is_displayed(s)));

        let name = doc.first_by_class(sections[0], markup::ITEM_NAME).unwrap();
        assert_eq!(doc.attr(name, "data-it"), Some("Polpetta di Carne"));
        assert_eq!(doc.text_content(name), "Polpetta di Carne");

        let wine = doc.first_by_class(doc.root(), markup::WINE_ITEM).unwrap();
        let bottle = doc.first_by_class(wine, markup::WINE_PRICE_BOTTLE).unwrap();
        assert_eq!(doc.text_content(bottle), "€ 28,00");
    }

    #[test]
    fn page_html_wraps_body() {
        let doc = render_document(&Menu::builtin());
        let html = page_html(&doc, Language::Fr, "Menu");
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"fr\">"));
        assert!(html.contains("id=\"main-buttons-grid\""));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
