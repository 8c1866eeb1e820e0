//! Tables de correspondance identifiant → nom
//!
//! Chaque table est construite une fois, par balayage d'une table de
//! référence du registre, puis partagée en lecture seule.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use gurs_shp::{decode_windows1250, DbfTable};
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, LookupSource};
use crate::overrides::Overrides;

/// Rôle d'une table de correspondance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    PostalCode,
    PostalName,
    StreetName,
    StreetNameBilingual,
    SettlementName,
    SettlementNameBilingual,
    MunicipalityName,
}

impl LookupKind {
    pub const ALL: [LookupKind; 7] = [
        LookupKind::PostalCode,
        LookupKind::PostalName,
        LookupKind::StreetName,
        LookupKind::StreetNameBilingual,
        LookupKind::SettlementName,
        LookupKind::SettlementNameBilingual,
        LookupKind::MunicipalityName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostalCode => "postal_code",
            Self::PostalName => "postal_name",
            Self::StreetName => "street_name",
            Self::StreetNameBilingual => "street_name_bilingual",
            Self::SettlementName => "settlement_name",
            Self::SettlementNameBilingual => "settlement_name_bilingual",
            Self::MunicipalityName => "municipality_name",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Avertissements à vérifier manuellement (n'interrompent jamais le traitement)
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LookupWarning {
    #[error("Possible new abbreviation in {column}: {value},{value}")]
    PossibleAbbreviation { column: String, value: String },

    #[error("Possible new bilingual name in {column}: {value},{value}")]
    PossibleBilingualName { column: String, value: String },
}

/// Abréviations connues : chiffres romains, nombres, "dr." et "sv."
fn allowed_abbreviations() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:[IVX]+|[0-9]+|(?i:dr|sv))\.").expect("abbreviation pattern is valid")
    })
}

/// Table identifiant → valeur décodée et corrigée
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    entries: HashMap<String, String>,
    warnings: Vec<LookupWarning>,
}

impl Lookup {
    /// Construit une table depuis des couples (clé brute, valeur brute)
    ///
    /// Les valeurs vides (ou composées uniquement de caractères nuls) ne
    /// produisent aucune entrée. Une clé répétée écrase la précédente.
    pub fn from_rows<'a, I>(
        rows: I,
        value_column: &str,
        overrides: &Overrides,
        warn_bilingual: bool,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
    {
        let mut entries = HashMap::new();
        let mut warnings = Vec::new();

        for (raw_key, raw_value) in rows {
            let value = decode_windows1250(raw_value).replace('\0', "");
            if value.is_empty() {
                continue;
            }

            let key = decode_windows1250(raw_key);
            let overridden = overrides.contains(&value);

            if !overridden && value.contains('.') {
                let cleared = allowed_abbreviations().replace_all(&value, "");
                if cleared.contains('.') {
                    warnings.push(LookupWarning::PossibleAbbreviation {
                        column: value_column.to_string(),
                        value: value.clone(),
                    });
                }
            }

            if warn_bilingual && !overridden && value.contains('-') {
                warnings.push(LookupWarning::PossibleBilingualName {
                    column: value_column.to_string(),
                    value: value.clone(),
                });
            }

            let resolved = overrides.resolve(&value).to_string();
            entries.insert(key, resolved);
        }

        Self { entries, warnings }
    }

    /// Construit la table décrite par `source`
    pub fn load(source: &LookupSource, lookup_dir: &Path, overrides_dir: &Path) -> Result<Self> {
        let path = lookup_dir.join(&source.file).with_extension("dbf");
        let table = DbfTable::open(&path)
            .with_context(|| format!("Failed to read lookup table {}", path.display()))?;

        let Some(key_index) = table.column_index(&source.key_column) else {
            bail!("Column {} not found in {}", source.key_column, path.display());
        };
        let Some(value_index) = table.column_index(&source.value_column) else {
            bail!("Column {} not found in {}", source.value_column, path.display());
        };

        let overrides = Overrides::load(overrides_dir, &source.value_column)?;

        let rows = table
            .records()
            .map(|r| (r.attribute(key_index), r.attribute(value_index)));
        let lookup = Self::from_rows(rows, &source.value_column, &overrides, source.warn_bilingual);

        for warning in &lookup.warnings {
            warn!("{}", warning);
        }
        if lookup.is_empty() {
            warn!(path = %path.display(), column = %source.value_column, "Lookup table read NO records");
        }

        Ok(lookup)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Avertissements relevés pendant la construction
    pub fn warnings(&self) -> &[LookupWarning] {
        &self.warnings
    }
}

impl FromIterator<(String, String)> for Lookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            warnings: Vec::new(),
        }
    }
}

/// Les sept tables utilisées pour résoudre une hišna številka
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub postal_code: Lookup,
    pub postal_name: Lookup,
    pub street_name: Lookup,
    pub street_name_bilingual: Lookup,
    pub settlement_name: Lookup,
    pub settlement_name_bilingual: Lookup,
    pub municipality_name: Lookup,
}

impl Lookups {
    /// Construit toutes les tables en parallèle
    ///
    /// Retourne seulement quand les sept tables sont prêtes ; la première
    /// erreur interrompt le chargement.
    pub fn load(config: &Config, lookup_dir: &Path, overrides_dir: &Path) -> Result<Self> {
        config.validate()?;

        let built: Vec<(LookupKind, Lookup)> = config
            .lookups
            .par_iter()
            .map(|source| {
                let lookup = Lookup::load(source, lookup_dir, overrides_dir)
                    .with_context(|| format!("Failed to build {} lookup", source.kind))?;
                Ok((source.kind, lookup))
            })
            .collect::<Result<_>>()?;

        let mut lookups = Self::default();
        for (kind, lookup) in built {
            info!(lookup = %kind, entries = lookup.len(), "Lookup ready");
            *lookups.get_mut(kind) = lookup;
        }

        Ok(lookups)
    }

    pub fn get(&self, kind: LookupKind) -> &Lookup {
        match kind {
            LookupKind::PostalCode => &self.postal_code,
            LookupKind::PostalName => &self.postal_name,
            LookupKind::StreetName => &self.street_name,
            LookupKind::StreetNameBilingual => &self.street_name_bilingual,
            LookupKind::SettlementName => &self.settlement_name,
            LookupKind::SettlementNameBilingual => &self.settlement_name_bilingual,
            LookupKind::MunicipalityName => &self.municipality_name,
        }
    }

    fn get_mut(&mut self, kind: LookupKind) -> &mut Lookup {
        match kind {
            LookupKind::PostalCode => &mut self.postal_code,
            LookupKind::PostalName => &mut self.postal_name,
            LookupKind::StreetName => &mut self.street_name,
            LookupKind::StreetNameBilingual => &mut self.street_name_bilingual,
            LookupKind::SettlementName => &mut self.settlement_name,
            LookupKind::SettlementNameBilingual => &mut self.settlement_name_bilingual,
            LookupKind::MunicipalityName => &mut self.municipality_name,
        }
    }

    /// Tous les avertissements, table par table
    pub fn warnings(&self) -> impl Iterator<Item = &LookupWarning> {
        LookupKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).warnings().iter())
    }
}
