use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{MenuError, Result};
use crate::i18n::{Language, LocalizedString};

/// Allergens declared on the menu (the EU list without lupin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Allergen {
    Gluten,
    Lactose,
    Eggs,
    Fish,
    Crustaceans,
    Molluscs,
    Peanuts,
    TreeNuts,
    Soy,
    Celery,
    Mustard,
    Sesame,
    Sulphites,
}

impl Allergen {
    pub fn all() -> &'static [Allergen] {
        &[
            Allergen::Gluten,
            Allergen::Lactose,
            Allergen::Eggs,
            Allergen::Fish,
            Allergen::Crustaceans,
            Allergen::Molluscs,
            Allergen::Peanuts,
            Allergen::TreeNuts,
            Allergen::Soy,
            Allergen::Celery,
            Allergen::Mustard,
            Allergen::Sesame,
            Allergen::Sulphites,
        ]
    }

    /// Source-language identifier; also the badge text of last resort.
    pub fn canonical(&self) -> &'static str {
        match self {
            Allergen::Gluten => "Glutine",
            Allergen::Lactose => "Lattosio",
            Allergen::Eggs => "Uova",
            Allergen::Fish => "Pesce",
            Allergen::Crustaceans => "Crostacei",
            Allergen::Molluscs => "Molluschi",
            Allergen::Peanuts => "Arachidi",
            Allergen::TreeNuts => "Frutta a guscio",
            Allergen::Soy => "Soia",
            Allergen::Celery => "Sedano",
            Allergen::Mustard => "Senape",
            Allergen::Sesame => "Sesamo",
            Allergen::Sulphites => "Solfiti",
        }
    }

    fn ident(&self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Lactose => "lactose",
            Allergen::Eggs => "eggs",
            Allergen::Fish => "fish",
            Allergen::Crustaceans => "crustaceans",
            Allergen::Molluscs => "molluscs",
            Allergen::Peanuts => "peanuts",
            Allergen::TreeNuts => "treenuts",
            Allergen::Soy => "soy",
            Allergen::Celery => "celery",
            Allergen::Mustard => "mustard",
            Allergen::Sesame => "sesame",
            Allergen::Sulphites => "sulphites",
        }
    }

    /// Accepts the canonical name (`"Frutta a guscio"`) or the identifier
    /// (`"TreeNuts"`, `"tree_nuts"`), case-insensitively.
    pub fn parse(tag: &str) -> Option<Allergen> {
        let tag = tag.trim();
        let ident: String = tag
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        Allergen::all()
            .iter()
            .copied()
            .find(|a| a.canonical().eq_ignore_ascii_case(tag) || a.ident() == ident)
    }

    fn builtin_name(&self) -> LocalizedString {
        let [en, es, fr, de, ru] = match self {
            Allergen::Gluten => ["Gluten", "Gluten", "Gluten", "Gluten", "Глютен"],
            Allergen::Lactose => ["Lactose", "Lactosa", "Lactose", "Laktose", "Лактоза"],
            Allergen::Eggs => ["Eggs", "Huevos", "Œufs", "Eier", "Яйца"],
            Allergen::Fish => ["Fish", "Pescado", "Poisson", "Fisch", "Рыба"],
            Allergen::Crustaceans => [
                "Crustaceans",
                "Crustáceos",
                "Crustacés",
                "Krebstiere",
                "Ракообразные",
            ],
            Allergen::Molluscs => ["Molluscs", "Moluscos", "Mollusques", "Weichtiere", "Моллюски"],
            Allergen::Peanuts => ["Peanuts", "Cacahuetes", "Arachides", "Erdnüsse", "Арахис"],
            Allergen::TreeNuts => [
                "Tree nuts",
                "Frutos de cáscara",
                "Fruits à coque",
                "Schalenfrüchte",
                "Орехи",
            ],
            Allergen::Soy => ["Soy", "Soja", "Soja", "Soja", "Соя"],
            Allergen::Celery => ["Celery", "Apio", "Céleri", "Sellerie", "Сельдерей"],
            Allergen::Mustard => ["Mustard", "Mostaza", "Moutarde", "Senf", "Горчица"],
            Allergen::Sesame => ["Sesame", "Sésamo", "Sésame", "Sesam", "Кунжут"],
            Allergen::Sulphites => ["Sulphites", "Sulfitos", "Sulfites", "Sulfite", "Сульфиты"],
        };
        LocalizedString::new(self.canonical())
            .with(Language::En, en)
            .with(Language::Es, es)
            .with(Language::Fr, fr)
            .with(Language::De, de)
            .with(Language::Ru, ru)
    }
}

/// Tooltip prefix for a badge: "<phrase> <allergen>".
pub fn contains_phrase(lang: Language) -> &'static str {
    match lang {
        Language::It => "Contiene",
        Language::En => "Contains",
        Language::Es => "Contiene",
        Language::Fr => "Contient",
        Language::De => "Enthält",
        Language::Ru => "Содержит",
    }
}

const BUILTIN_DISHES: &[(&str, &[Allergen])] = {
    use Allergen::*;
    &[
        // Gastronomia
        ("Polpetta di Carne", &[Gluten, Eggs, Lactose]),
        ("Polpetta Vegetariana", &[Gluten, Eggs, Lactose]),
        ("Arancino al Tastasal", &[Gluten, Lactose]),
        ("Pizza Margherita", &[Gluten, Lactose]),
        ("Pizza Farcita", &[Gluten, Lactose]),
        ("Toast", &[Gluten, Lactose]),
        ("Focaccia", &[Gluten, Lactose]),
        ("Pizzetta", &[Gluten, Lactose]),
        ("Edamame", &[Soy]),
        ("Nachos (fino alle 22:00)", &[Gluten, Lactose]),
        // Colazioni
        ("English Breakfast", &[Gluten, Eggs, Lactose]),
        ("Croque Monsieur", &[Gluten, Lactose]),
        ("Croque Madame", &[Gluten, Lactose, Eggs]),
        // Cucina
        ("Pata Negra de Bellota 100%", &[Gluten]),
        ("Vellutata di Verdure", &[Lactose, Celery, Crustaceans]),
        ("Battuta di Manzo alla Francese", &[Eggs, Mustard]),
        ("Insalata Mista di Pollo", &[Lactose]),
        ("Acciuga del Cantabrico", &[Fish, Gluten, Lactose]),
        ("Ovetto Poché", &[Eggs, Lactose, Gluten]),
        ("Tagliatelle al Ragù di Quaglia", &[Gluten, Eggs, Lactose]),
        ("Pad Thai", &[Peanuts, Crustaceans, Soy, Sesame]),
        ("Gyoza (6pz)", &[Gluten, Soy, Sesame]),
        ("Gnocchi alla Zucca", &[Gluten, Lactose]),
        ("Ravioli Artigianali alla Gricia", &[Gluten, Eggs, Lactose]),
        ("Tagliata di Manzo", &[Lactose]),
        ("Yakitori", &[Soy, Sesame]),
        ("Guancetta di Maiale", &[Sulphites]),
        ("Moscardini in Umido", &[Molluscs]),
        ("Trancio di Salmone", &[Fish]),
        ("Burrito", &[Gluten, Lactose]),
        ("Bacon Cheeseburger", &[Gluten, Lactose, Eggs]),
        ("Club Sandwich", &[Gluten, Eggs, Lactose]),
        ("Avocado Toast", &[Gluten, Lactose, Eggs, TreeNuts]),
        ("Veggie Burger", &[Gluten, Lactose]),
        // Dolci
        ("Tiramisù della Casa", &[Gluten, Eggs, Lactose]),
        ("Panna Cotta", &[Lactose]),
        ("Crema Catalana", &[Eggs, Lactose]),
        ("Sbrisolona e Grappa", &[Gluten, TreeNuts]),
        ("Banana Bread", &[Gluten, Eggs, Lactose]),
    ]
};

/// Read-only lookup tables: dish canonical name → tags, tag → display names.
#[derive(Debug, Clone)]
pub struct AllergenCatalog {
    names: BTreeMap<Allergen, LocalizedString>,
    dishes: HashMap<String, Vec<Allergen>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    names: BTreeMap<String, BTreeMap<String, String>>,
    dishes: Option<BTreeMap<String, Vec<String>>>,
}

impl Default for AllergenCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AllergenCatalog {
    pub fn builtin() -> Self {
        let names = Allergen::all()
            .iter()
            .map(|a| (*a, a.builtin_name()))
            .collect();
        let dishes = BUILTIN_DISHES
            .iter()
            .map(|(dish, tags)| (dish.to_string(), tags.to_vec()))
            .collect();
        Self { names, dishes }
    }

    /// Empty catalog with the built-in names; useful to build custom tables.
    pub fn without_dishes() -> Self {
        Self {
            dishes: HashMap::new(),
            ..Self::builtin()
        }
    }

    /// Overlay a TOML catalog on the built-in tables.
    ///
    /// `[names.<tag>]` entries replace the display names of that tag; a
    /// `[dishes]` table replaces the whole dish table. Unknown tags are
    /// dropped.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        let mut catalog = Self::builtin();

        for (tag, variants) in file.names {
            let Some(allergen) = Allergen::parse(&tag) else {
                debug!("ignoring names for unknown allergen '{}'", tag);
                continue;
            };
            let mut pairs: Vec<(String, String)> = variants.into_iter().collect();
            if !pairs.iter().any(|(code, _)| code == "it") {
                pairs.push(("it".to_string(), allergen.canonical().to_string()));
            }
            catalog
                .names
                .insert(allergen, LocalizedString::from_pairs(pairs)?);
        }

        if let Some(dishes) = file.dishes {
            catalog.dishes.clear();
            for (dish, tags) in dishes {
                catalog.insert_dish_tags(&dish, tags.iter().map(String::as_str));
            }
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MenuError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Register a dish from raw tag names; unrecognized tags are dropped.
    pub fn insert_dish_tags<'a>(&mut self, dish: &str, tags: impl IntoIterator<Item = &'a str>) {
        let parsed: Vec<Allergen> = tags
            .into_iter()
            .filter_map(|t| {
                let parsed = Allergen::parse(t);
                if parsed.is_none() {
                    debug!("dropping unknown allergen '{}' for dish '{}'", t, dish);
                }
                parsed
            })
            .collect();
        self.dishes.insert(dish.trim().to_string(), parsed);
    }

    pub fn allergens_for(&self, canonical_dish: &str) -> &[Allergen] {
        self.dishes
            .get(canonical_dish.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn name(&self, allergen: Allergen, lang: Language) -> &str {
        self.names
            .get(&allergen)
            .and_then(|n| n.get(lang))
            .unwrap_or_else(|| allergen.canonical())
    }

    pub fn dishes(&self) -> impl Iterator<Item = (&str, &[Allergen])> {
        self.dishes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_canonical_names_and_identifiers() {
        assert_eq!(Allergen::parse("Frutta a guscio"), Some(Allergen::TreeNuts));
        assert_eq!(Allergen::parse("tree_nuts"), Some(Allergen::TreeNuts));
        assert_eq!(Allergen::parse("GLUTINE"), Some(Allergen::Gluten));
        assert_eq!(Allergen::parse("Lupini"), None);
    }

    #[test]
    fn builtin_lookup_uses_canonical_dish_names() {
        let catalog = AllergenCatalog::builtin();
        assert_eq!(
            catalog.allergens_for("Pad Thai"),
            &[
                Allergen::Peanuts,
                Allergen::Crustaceans,
                Allergen::Soy,
                Allergen::Sesame
            ]
        );
        assert!(catalog.allergens_for("Beef Tagliata").is_empty());
        assert_eq!(catalog.name(Allergen::Eggs, Language::Fr), "Œufs");
    }

    #[test]
    fn toml_overlay_drops_unknown_tags_and_falls_back() {
        let catalog = AllergenCatalog::from_toml(
            r#"
            [names.Senape]
            en = "Mustard seed"

            [dishes]
            "Hot Dog" = ["Glutine", "Senape", "Lupini"]
            "#,
        )
        .unwrap();
        assert_eq!(
            catalog.allergens_for("Hot Dog"),
            &[Allergen::Gluten, Allergen::Mustard]
        );
        assert!(catalog.allergens_for("Pad Thai").is_empty());
        assert_eq!(catalog.name(Allergen::Mustard, Language::En), "Mustard seed");
        // The override carried no German entry, so the canonical name is shown.
        assert_eq!(catalog.name(Allergen::Mustard, Language::De), "Senape");
    }
}
