//! Rapport de conversion
//!
//! Collecte les compteurs d'une exécution et les avertissements levés lors
//! de la construction des tables, pour affichage ou export JSON.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::lookup::{LookupKind, LookupWarning, Lookups};

/// Rapport complet d'une conversion
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Durée de la conversion
    pub duration_secs: f64,
    /// Enregistrements lus dans le fichier des hišne številke
    pub records_read: usize,
    /// Enregistrements ignorés (statut différent de "V")
    pub skipped_invalid: usize,
    /// Adresses écrites
    pub features: usize,
    /// Fichiers écrits
    pub categories: usize,
    /// Nombre d'entrées par table
    pub lookups: BTreeMap<LookupKind, usize>,
    /// Avertissements à vérifier manuellement
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre la taille et les avertissements de chaque table
    pub fn record_lookups(&mut self, lookups: &Lookups) {
        for kind in LookupKind::ALL {
            self.lookups.insert(kind, lookups.get(kind).len());
        }
        self.warnings
            .extend(lookups.warnings().map(LookupWarning::to_string));
    }

    pub fn record_read(&mut self) {
        self.records_read += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_invalid += 1;
    }

    /// Enregistre un fichier écrit
    pub fn record_collection(&mut self, features: usize) {
        self.categories += 1;
        self.features += features;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("GURS HOUSE NUMBERS REPORT");
        println!("{}", "=".repeat(60));

        println!("\nDuration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Records: {} read, {} skipped (not valid)",
            self.records_read, self.skipped_invalid
        );
        println!(
            "Output: {} addresses in {} files",
            self.features, self.categories
        );

        if !self.lookups.is_empty() {
            println!("\n--- LOOKUPS ---");
            for (kind, entries) in &self.lookups {
                println!("  {}: {} entries", kind, entries);
            }
        }

        if !self.warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", self.warnings.len());
            for w in self.warnings.iter().take(20) {
                println!("  {}", w);
            }
            if self.warnings.len() > 20 {
                println!("  ... and {} more", self.warnings.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} addresses in {} files ({} read, {} skipped, {} warnings)",
            self.features,
            self.categories,
            self.records_read,
            self.skipped_invalid,
            self.warnings.len()
        )
    }
}
