//! Corrections manuelles des valeurs des tables de référence
//!
//! Une liste par colonne de valeur : `<dossier>/<COLONNE>.csv`, deux colonnes
//! sans en-tête (valeur brute, valeur corrigée).

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Corrections d'une colonne de valeur
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: HashMap<String, String>,
}

impl Overrides {
    /// Charge les corrections de `value_column`
    ///
    /// Un fichier absent donne une liste vide ; un fichier illisible ou mal
    /// formé est une erreur.
    pub fn load(dir: &Path, value_column: &str) -> Result<Self> {
        let path = dir.join(format!("{}.csv", value_column));
        if !path.exists() {
            debug!(column = value_column, "No override file");
            return Ok(Self::default());
        }

        let file = std::fs::File::open(&path)
            .with_context(|| format!("Cannot open overrides {}", path.display()))?;
        let overrides = Self::from_reader(file)
            .with_context(|| format!("Error reading overrides {}", path.display()))?;

        debug!(
            column = value_column,
            entries = overrides.len(),
            "Loaded overrides"
        );
        Ok(overrides)
    }

    /// Parse une liste CSV de corrections
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for (line, record) in csv.records().enumerate() {
            let record = record?;
            if record.len() < 2 {
                bail!(
                    "line {}: expected 2 columns, found {}",
                    line + 1,
                    record.len()
                );
            }
            entries.insert(record[0].to_string(), record[1].to_string());
        }

        Ok(Self { entries })
    }

    /// Valeur corrigée, si une correction existe
    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// Applique la correction éventuelle
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        self.get(value).unwrap_or(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
