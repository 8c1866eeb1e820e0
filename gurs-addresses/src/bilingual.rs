//! Noms bilingues des rues et des localités
//!
//! Les zones bilingues slovènes sont italophones au sud-ouest (côte) et
//! magyarophones au nord-est. La langue seconde est déduite de la longitude.

use crate::lookup::Lookups;
use crate::tags::{self, TagUpdate};

/// Méridien séparant les noms italiens (ouest) des noms hongrois (est)
pub const ITALIAN_HUNGARIAN_SPLIT_LONGITUDE: f64 = 14.5;

/// Langue seconde d'une zone bilingue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryLanguage {
    Italian,
    Hungarian,
}

impl SecondaryLanguage {
    /// Hongrois strictement à l'est du méridien de partage, italien sinon
    pub fn from_longitude(longitude: f64) -> Self {
        if longitude > ITALIAN_HUNGARIAN_SPLIT_LONGITUDE {
            Self::Hungarian
        } else {
            Self::Italian
        }
    }

    /// Code ISO 639-1
    pub fn code(self) -> &'static str {
        match self {
            Self::Italian => "it",
            Self::Hungarian => "hu",
        }
    }

    /// Suffixe de tag (":it" / ":hu")
    pub fn tag_suffix(self) -> &'static str {
        match self {
            Self::Italian => tags::SUFFIX_ITALIAN,
            Self::Hungarian => tags::SUFFIX_HUNGARIAN,
        }
    }
}

/// Code de la langue seconde à une longitude donnée
pub fn language_suffix(longitude: f64) -> &'static str {
    SecondaryLanguage::from_longitude(longitude).code()
}

/// Ajoute au tag le suffixe de langue seconde déduit de la longitude
pub fn apply_tag_language_suffix(prefix: &str, longitude: f64) -> String {
    format!(
        "{}{}",
        prefix,
        SecondaryLanguage::from_longitude(longitude).tag_suffix()
    )
}

/// Tags de rue ou, à défaut de rue, de localité
///
/// L'ordre des mises à jour compte : une valeur vide efface une valeur posée
/// auparavant sous la même clé.
pub fn street_or_place_tags(
    street_id: &str,
    settlement_id: &str,
    longitude: f64,
    lookups: &Lookups,
) -> Vec<TagUpdate> {
    let mut updates = Vec::with_capacity(5);

    if let Some(street) = lookups.street_name.get(street_id) {
        let bilingual = lookups.street_name_bilingual.get(street_id);
        push_name(&mut updates, tags::STREET, street, bilingual, longitude);
        return updates;
    }

    // Pas de rue : adresse rattachée à la localité
    let place = lookups.settlement_name.get(settlement_id).unwrap_or_default();
    let bilingual = lookups.settlement_name_bilingual.get(settlement_id);

    if push_name(&mut updates, tags::PLACE, place, bilingual, longitude) {
        updates.push(TagUpdate::clear(format!(
            "{}{}",
            tags::STREET,
            tags::SUFFIX_SLOVENIAN
        )));
        updates.push(TagUpdate::clear(apply_tag_language_suffix(
            tags::STREET,
            longitude,
        )));
    }
    updates.push(TagUpdate::clear(tags::STREET));

    updates
}

/// Pose le nom simple ou le triplet bilingue ; vrai si le nom est bilingue
fn push_name(
    updates: &mut Vec<TagUpdate>,
    tag: &str,
    primary: &str,
    secondary: Option<&str>,
    longitude: f64,
) -> bool {
    match secondary.filter(|s| *s != primary) {
        Some(secondary) => {
            updates.push(TagUpdate::set(
                tag,
                format!("{}{}{}", primary, tags::BILINGUAL_SEPARATOR, secondary),
            ));
            updates.push(TagUpdate::set(
                format!("{}{}", tag, tags::SUFFIX_SLOVENIAN),
                primary,
            ));
            updates.push(TagUpdate::set(
                apply_tag_language_suffix(tag, longitude),
                secondary,
            ));
            true
        }
        None => {
            updates.push(TagUpdate::set(tag, primary));
            false
        }
    }
}
