//! Configuration du système

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::lookup::LookupKind;

/// Configuration principale
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Tables de référence à charger
    pub lookups: Vec<LookupSource>,
}

/// Source d'une table de correspondance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupSource {
    /// Rôle de la table
    pub kind: LookupKind,

    /// Shapefile de référence, relatif au dossier des tables
    pub file: PathBuf,

    /// Colonne identifiant
    pub key_column: String,

    /// Colonne valeur (donne aussi le nom du fichier de corrections)
    pub value_column: String,

    /// Signaler les valeurs contenant un tiret (nom bilingue possible)
    #[serde(default)]
    pub warn_bilingual: bool,
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Noms des presets embarqués
    pub const PRESETS: &'static [&'static str] = &["gurs"];

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "gurs" => Self::load_embedded(include_str!("presets/gurs.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: {}", preset, Self::PRESETS.join(", ")),
        }
    }

    /// Preset embarqué ou chemin vers un fichier JSON
    ///
    /// Un nom de preset l'emporte sur un fichier du même nom.
    pub fn resolve(spec: &str) -> Result<Self> {
        if Self::PRESETS.contains(&spec) {
            return Self::from_preset(spec);
        }
        let path = Path::new(spec);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(spec)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Vérifie que chaque rôle est décrit exactement une fois
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for source in &self.lookups {
            if !seen.insert(source.kind) {
                bail!("Lookup {} is configured more than once", source.kind);
            }
        }
        for kind in LookupKind::ALL {
            if !seen.contains(&kind) {
                bail!("Lookup {} is missing from the configuration", kind);
            }
        }
        Ok(())
    }
}

/// Dossiers d'entrée par défaut
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// Dossier des tables de référence (PT, UL, NA, OB)
    pub lookup_dir: PathBuf,

    /// Dossier des listes de corrections
    pub overrides_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lookup_dir: "data/temp".into(),
            overrides_dir: "overrides".into(),
        }
    }
}

impl PathsConfig {
    /// Charge les dossiers depuis les variables d'environnement
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lookup_dir: std::env::var_os("GURS_LOOKUP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.lookup_dir),
            overrides_dir: std::env::var_os("GURS_OVERRIDES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.overrides_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_preset() {
        let config = Config::from_preset("gurs").unwrap();
        assert_eq!(config.lookups.len(), 7);
        config.validate().unwrap();

        let bilingual = config
            .lookups
            .iter()
            .find(|s| s.kind == LookupKind::StreetNameBilingual)
            .unwrap();
        assert_eq!(bilingual.value_column, "UL_DJ");
        assert!(bilingual.warn_bilingual);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(Config::from_preset("full").is_err());
        assert!(Config::resolve("nope").is_err());
    }

    #[test]
    fn test_validate_rejects_missing_and_duplicates() {
        let mut config = Config::from_preset("gurs").unwrap();
        let first = config.lookups[0].clone();
        config.lookups.push(first);
        assert!(config.validate().is_err());

        config.lookups.truncate(6);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(
            &path,
            r#"{"lookups":[{"kind":"postal_code","file":"PT/PT.shp","key_column":"PT_MID","value_column":"PT_ID"}]}"#,
        )
        .unwrap();

        let config = Config::resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(config.lookups.len(), 1);
        assert!(!config.lookups[0].warn_bilingual);
        assert!(config.validate().is_err());
    }
}
