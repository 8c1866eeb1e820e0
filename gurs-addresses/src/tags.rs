//! Vocabulaire des tags OpenStreetMap produits

use std::collections::BTreeMap;

pub const HOUSENUMBER: &str = "addr:housenumber";
pub const CITY: &str = "addr:city";
pub const POSTCODE: &str = "addr:postcode";
pub const STREET: &str = "addr:street";
pub const PLACE: &str = "addr:place";
pub const SOURCE: &str = "source:addr";
pub const SOURCE_DATE: &str = "source:addr:date";

/// Anciens tags de provenance, vidés à chaque export
pub const LEGACY_SOURCE: &str = "source";
pub const LEGACY_SOURCE_DATE: &str = "source:date";

/// Identifiant du registre
pub const SOURCE_VALUE: &str = "GURS";

/// Référence vers l'identifiant de la hišna številka (HS_MID)
pub const REF: &str = "ref:gurs:hs_mid";

pub const SUFFIX_SLOVENIAN: &str = ":sl";
pub const SUFFIX_ITALIAN: &str = ":it";
pub const SUFFIX_HUNGARIAN: &str = ":hu";

/// Séparateur du nom combiné "slovène / seconde langue"
pub const BILINGUAL_SEPARATOR: &str = " / ";

/// Mise à jour d'un tag ; une valeur vide efface une valeur par défaut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUpdate {
    pub key: String,
    pub value: String,
}

impl TagUpdate {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn clear(key: impl Into<String>) -> Self {
        Self::set(key, "")
    }
}

/// Tags d'une adresse, triés par nom pour une sortie reproductible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn apply(&mut self, updates: impl IntoIterator<Item = TagUpdate>) {
        for update in updates {
            self.0.insert(update.key, update.value);
        }
    }

    /// Valeur d'un tag ; `None` si le tag n'a jamais été posé
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
