//! Résolution d'une hišna številka en adresse taguée

use geo::Point;
use tracing::{debug, warn};

use crate::bilingual;
use crate::feature::{AddressFeature, Category};
use crate::lookup::Lookups;
use crate::record::HouseNumberRecord;
use crate::tags::{self, Tags};

/// 7 décimales (~1 cm)
const ROUNDING_FACTOR: f64 = 10_000_000.0;

/// Issue de la résolution d'un enregistrement
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Adresse produite et sa catégorie de sortie
    Feature {
        feature: AddressFeature,
        category: Category,
    },
    /// Enregistrement non valide, ignoré
    Skipped,
}

/// Arrondit une coordonnée à 7 décimales (demi-valeur loin de zéro)
pub fn round_coordinate(value: f64) -> f64 {
    (value * ROUNDING_FACTOR).round() / ROUNDING_FACTOR
}

/// YYYYMMDD → YYYY-MM-DD ; une valeur d'une autre forme est gardée telle quelle
pub fn format_date(raw: &str) -> String {
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
    } else {
        warn!(date = raw, "Unexpected validity date format");
        raw.to_string()
    }
}

/// Résout un enregistrement à l'aide des tables de correspondance
///
/// Une clé étrangère inconnue donne une valeur vide, jamais une erreur.
pub fn resolve(record: &HouseNumberRecord, lookups: &Lookups) -> Resolution {
    if !record.is_valid() {
        debug!(id = %record.id, status = %record.status, "Skipping invalid record");
        return Resolution::Skipped;
    }

    let lon = round_coordinate(record.position.x);
    let lat = round_coordinate(record.position.y);

    let mut tags = Tags::new();
    tags.set(tags::HOUSENUMBER, record.label.to_lowercase());

    tags.apply(bilingual::street_or_place_tags(
        &record.street_id,
        &record.settlement_id,
        lon,
        lookups,
    ));

    let postal_id = record.postal_id.as_str();
    tags.set(
        tags::POSTCODE,
        lookups.postal_code.get(postal_id).unwrap_or_default(),
    );
    tags.set(
        tags::CITY,
        lookups.postal_name.get(postal_id).unwrap_or_default(),
    );

    tags.set(tags::SOURCE_DATE, format_date(&record.valid_from));
    tags.set(tags::LEGACY_SOURCE_DATE, "");
    tags.set(tags::SOURCE, tags::SOURCE_VALUE);
    tags.set(tags::LEGACY_SOURCE, "");
    tags.set(tags::REF, record.id.as_str());

    let category = Category::new(
        lookups
            .municipality_name
            .get(&record.municipality_id)
            .unwrap_or_default(),
        lookups
            .settlement_name
            .get(&record.settlement_id)
            .unwrap_or_default(),
    );

    Resolution::Feature {
        feature: AddressFeature::new(Point::new(lon, lat), tags),
        category,
    }
}
