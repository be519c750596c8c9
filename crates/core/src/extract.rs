//! Pull menu data out of an authored HTML page.
//!
//! The page is scanned, not parsed: sections are `<section class="menu-section">`
//! blocks, items are `menu-item` / `wine-item` divs matched by counting
//! nested `<div` / `</div>` pairs, and every localized text comes from the
//! `data-<code>` attributes of the element carrying the right class.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{MenuError, Result};
use crate::i18n::{Language, LocalizedString};
use crate::markup;
use crate::menu::{Item, Menu, MenuItem, Section, WineItem};

/// Section the page uses for opening hours; it has no dishes.
const HOURS_SECTION: &str = "hours-section";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").expect("tag regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'))?"#)
        .expect("attribute regex")
});
static DIV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?div\b").expect("div regex"));

struct Tag<'a> {
    name: &'a str,
    start: usize,
    end: usize,
    attrs: Vec<(String, String)>,
}

impl Tag<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// `data-<code>` attributes as a localized text.
    fn localized(&self) -> Option<LocalizedString> {
        let pairs = Language::all()
            .iter()
            .filter_map(|lang| self.attr(lang.data_attribute()).map(|v| (lang.code(), v)));
        LocalizedString::from_pairs(pairs.map(|(code, v)| (code, v.trim().to_string()))).ok()
    }
}

fn tags(html: &str) -> impl Iterator<Item = Tag<'_>> {
    TAG_RE.captures_iter(html).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let attrs = caps
            .get(2)
            .map(|raw| parse_attrs(raw.as_str()))
            .unwrap_or_default();
        Some(Tag {
            name,
            start: whole.start(),
            end: whole.end(),
            attrs,
        })
    })
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            Some((key, value))
        })
        .collect()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// End offset (after `</div>`) of the div whose opening tag ends at `from`.
fn balanced_div_end(html: &str, from: usize) -> usize {
    let mut depth = 1usize;
    for m in DIV_RE.find_iter(&html[from..]) {
        if m.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                let close = from + m.end();
                return html[close..]
                    .find('>')
                    .map_or(html.len(), |gt| close + gt + 1);
            }
        } else {
            depth += 1;
        }
    }
    html.len()
}

fn first_with_class<'a>(html: &'a str, class: &str) -> Option<Tag<'a>> {
    tags(html).find(|t| t.has_class(class))
}

/// Text directly after the opening tag, up to the next tag.
fn inner_text(html: &str, class: &str) -> Option<String> {
    let tag = first_with_class(html, class)?;
    let rest = &html[tag.end..];
    let text = &rest[..rest.find('<').unwrap_or(rest.len())];
    Some(decode_entities(text.trim()))
}

pub fn extract_menu(html: &str) -> Result<Menu> {
    let openings: Vec<(String, usize, usize)> = tags(html)
        .filter(|t| t.name.eq_ignore_ascii_case("section") && t.has_class(markup::MENU_SECTION))
        .filter_map(|t| t.attr("id").map(|id| (id.to_string(), t.start, t.end)))
        .collect();

    let mut sections = Vec::new();
    for (id, start, body_start) in openings {
        if id == HOURS_SECTION {
            continue;
        }
        let end = html[body_start..]
            .find("</section>")
            .map_or(html.len(), |i| body_start + i);
        let body = &html[start..end];

        let name = first_with_class(body, markup::CATEGORY_TITLE)
            .and_then(|t| t.localized())
            .unwrap_or_else(|| LocalizedString::new(id.clone()));
        let items = extract_items(body);
        debug!("section '{}': {} items", id, items.len());
        if items.is_empty() {
            continue;
        }
        sections.push(Section { id, name, items });
    }

    if sections.is_empty() {
        return Err(MenuError::InvalidMenu("no menu sections found".into()));
    }
    let menu = Menu { sections };
    menu.validate()?;
    info!(
        "extracted {} sections, {} items",
        menu.sections.len(),
        menu.sections.iter().map(|s| s.items.len()).sum::<usize>()
    );
    Ok(menu)
}

fn extract_items(section: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut resume = 0;
    for tag in tags(section) {
        if tag.start < resume || !tag.name.eq_ignore_ascii_case("div") {
            continue;
        }
        let wine = tag.has_class(markup::WINE_ITEM);
        if !wine && !tag.has_class(markup::MENU_ITEM) {
            continue;
        }
        let end = balanced_div_end(section, tag.end);
        resume = end;
        let block = &section[tag.start..end];

        let Some(name) = first_with_class(block, markup::ITEM_NAME).and_then(|t| t.localized())
        else {
            debug!("skipping item without a name at offset {}", tag.start);
            continue;
        };
        let description =
            first_with_class(block, markup::ITEM_DESCRIPTION).and_then(|t| t.localized());
        let no_border = tag.has_class(markup::NO_BORDER);

        let item = if wine {
            Item::Wine(WineItem {
                name,
                description,
                price_glass: inner_text(block, markup::WINE_PRICE_GLASS).unwrap_or_default(),
                price_bottle: inner_text(block, markup::WINE_PRICE_BOTTLE).unwrap_or_default(),
                no_border,
            })
        } else {
            Item::Dish(MenuItem {
                name,
                description,
                price: inner_text(block, markup::ITEM_PRICE).unwrap_or_default(),
                no_border,
            })
        };
        items.push(item);
    }
    items
}
