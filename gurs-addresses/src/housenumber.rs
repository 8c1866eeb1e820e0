//! Normalisation des numéros de maison pour le tri
//!
//! Clé de largeur fixe (4 caractères) comparable comme une chaîne :
//! "9" < "10" et "12" < "12a".

use std::sync::OnceLock;

use regex::Regex;

/// Chiffre décimal Unicode (catégorie Nd) en fin de chaîne
fn ends_with_decimal_digit(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Nd}$").expect("digit pattern is valid"))
        .is_match(value)
}

/// Retourne la clé de tri d'un numéro de maison
///
/// - se termine par un chiffre décimal (ou vide) : zéros à gauche sur 3, puis `_` ("12" → "012_")
/// - se termine par autre chose : zéros à gauche sur 4 ("2b" → "002b", "12½" → "012½")
pub fn normalize(housenumber: &str) -> String {
    if housenumber.is_empty() || ends_with_decimal_digit(housenumber) {
        let mut key = pad_left(housenumber, 3);
        key.push('_');
        key
    } else {
        pad_left(housenumber, 4)
    }
}

/// Complète à gauche avec des zéros jusqu'à `width` caractères
fn pad_left(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut padded = String::with_capacity(value.len() + width.saturating_sub(len));
    for _ in len..width {
        padded.push('0');
    }
    padded.push_str(value);
    padded
}
