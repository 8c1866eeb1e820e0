//! Conversion Windows-1250 ↔ UTF-8
//!
//! Les tables du registre sont encodées en Windows-1250 (Europe centrale).

use encoding_rs::WINDOWS_1250;

/// Décode des octets Windows-1250 en texte UTF-8
///
/// Aucun BOM n'est interprété : une cellule commençant par `EF BB BF` reste
/// du Windows-1250.
pub fn decode_windows1250(data: &[u8]) -> String {
    let (decoded, _) = WINDOWS_1250.decode_without_bom_handling(data);
    decoded.into_owned()
}

/// Encode un texte UTF-8 en Windows-1250
///
/// Les caractères non représentables sont remplacés par des entités numériques HTML.
pub fn encode_windows1250(text: &str) -> Vec<u8> {
    let (encoded, _, _) = WINDOWS_1250.encode(text);
    encoded.into_owned()
}
