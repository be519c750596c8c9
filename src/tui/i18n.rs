use crate::i18n::Language;

/// Pick the string for `lang` from texts ordered it, en, es, fr, de, ru.
pub(in crate::tui) fn pick(lang: Language, texts: [&'static str; 6]) -> &'static str {
    let idx = match lang {
        Language::It => 0,
        Language::En => 1,
        Language::Es => 2,
        Language::Fr => 3,
        Language::De => 4,
        Language::Ru => 5,
    };
    texts[idx]
}

pub(in crate::tui) fn footer_hints(lang: Language) -> &'static str {
    pick(
        lang,
        [
            "↑↓ scegli · Invio apri · ←→ sfoglia · h home · l lingua · q esci",
            "↑↓ select · Enter open · ←→ page · h home · l language · q quit",
            "↑↓ elegir · Intro abrir · ←→ pasar · h inicio · l idioma · q salir",
            "↑↓ choisir · Entrée ouvrir · ←→ pages · h accueil · l langue · q quitter",
            "↑↓ wählen · Enter öffnen · ←→ blättern · h Start · l Sprache · q Ende",
            "↑↓ выбор · Enter открыть · ←→ листать · h главная · l язык · q выход",
        ],
    )
}

pub(in crate::tui) fn language_title(lang: Language) -> &'static str {
    pick(lang, ["Lingua", "Language", "Idioma", "Langue", "Sprache", "Язык"])
}

pub(in crate::tui) fn sections_title(lang: Language) -> &'static str {
    pick(
        lang,
        ["Sezioni", "Sections", "Secciones", "Rubriques", "Bereiche", "Разделы"],
    )
}

pub(in crate::tui) fn allergens_label(lang: Language) -> &'static str {
    pick(
        lang,
        ["Allergeni", "Allergens", "Alérgenos", "Allergènes", "Allergene", "Аллергены"],
    )
}

pub(in crate::tui) fn empty_section(lang: Language) -> &'static str {
    pick(
        lang,
        [
            "Nessun piatto in questa sezione.",
            "No dishes in this section.",
            "No hay platos en esta sección.",
            "Aucun plat dans cette rubrique.",
            "Keine Gerichte in diesem Bereich.",
            "В этом разделе нет блюд.",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pick_follows_language_order() {
        for (i, lang) in Language::all().iter().enumerate() {
            assert_eq!(pick(*lang, ["0", "1", "2", "3", "4", "5"]), i.to_string());
        }
    }
}
