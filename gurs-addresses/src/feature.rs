//! Adresse résolue et clé de regroupement

use std::cmp::Ordering;
use std::fmt;

use geo::Point;

use crate::housenumber;
use crate::tags::{self, Tags};

/// Catégorie de sortie "Commune/Localité" (espaces remplacés par `_`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category {
    pub municipality: String,
    pub settlement: String,
}

impl Category {
    /// Construit la catégorie depuis les noms décodés ; un nom inconnu reste vide
    pub fn new(municipality: &str, settlement: &str) -> Self {
        Self {
            municipality: municipality.replace(' ', "_"),
            settlement: settlement.replace(' ', "_"),
        }
    }

    /// Clé de regroupement
    pub fn key(&self) -> String {
        format!("{}/{}", self.municipality, self.settlement)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.municipality, self.settlement)
    }
}

/// Champs de tri d'une adresse ; `None` = tag jamais posé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub postcode: Option<String>,
    pub street: Option<String>,
    pub place: Option<String>,
    /// Numéro normalisé (toujours présent)
    pub housenumber: String,
}

impl SortKey {
    fn from_tags(tags: &Tags) -> Self {
        Self {
            postcode: tags.get(tags::POSTCODE).map(str::to_string),
            street: tags.get(tags::STREET).map(str::to_string),
            place: tags.get(tags::PLACE).map(str::to_string),
            housenumber: housenumber::normalize(tags.get(tags::HOUSENUMBER).unwrap_or_default()),
        }
    }

    /// Code postal, rue, localité puis numéro normalisé
    ///
    /// Un champ absent d'un côté ne départage pas : on passe au suivant.
    pub fn compare(&self, other: &Self) -> Ordering {
        compare_optional(&self.postcode, &other.postcode)
            .then_with(|| compare_optional(&self.street, &other.street))
            .then_with(|| compare_optional(&self.place, &other.place))
            .then_with(|| self.housenumber.cmp(&other.housenumber))
    }
}

fn compare_optional(left: &Option<String>, right: &Option<String>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(r),
        _ => Ordering::Equal,
    }
}

/// Une adresse prête à être exportée ; immuable une fois construite
#[derive(Debug, Clone, PartialEq)]
pub struct AddressFeature {
    point: Point<f64>,
    tags: Tags,
    sort_key: SortKey,
}

impl AddressFeature {
    pub fn new(point: Point<f64>, tags: Tags) -> Self {
        let sort_key = SortKey::from_tags(&tags);
        Self {
            point,
            tags,
            sort_key,
        }
    }

    /// Position (longitude, latitude)
    pub fn point(&self) -> Point<f64> {
        self.point
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key)
    }

    pub fn sort_key(&self) -> &SortKey {
        &self.sort_key
    }
}
