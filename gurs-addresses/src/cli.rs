//! Arguments CLI et déroulement d'une conversion
//!
//! Ordre : configuration → tables (en parallèle) → balayage des hišne
//! številke → reprojection → résolution → regroupement → tri → écriture.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use gurs_shp::ShapeReader;
use tracing::{debug, info};

use crate::config::{Config, PathsConfig};
use crate::export::{write_collection, OutputTemplate};
use crate::group::FeatureCollections;
use crate::lookup::Lookups;
use crate::record::HouseNumberRecord;
use crate::report::RunReport;
use crate::reproject_lite::Reprojector;
use crate::resolve::{resolve, Resolution};

pub const DEFAULT_INPUT: &str = "data/temp/HS-epsg4326/HS-epsg4326.shp";
pub const DEFAULT_OUTPUT: &str = "data/slovenia/%s-housenumbers-gurs.geojson";

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Shapefile des hišne številke (HS)
    #[arg(long = "in", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Gabarit du chemin de sortie ; %s est remplacé par "Commune/Localité"
    #[arg(long = "out", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Dossier des tables de référence PT, UL, NA et OB (défaut : env GURS_LOOKUP_DIR / data/temp)
    #[arg(long)]
    pub lookup_dir: Option<PathBuf>,

    /// Dossier des listes de corrections <COLONNE>.csv (défaut : env GURS_OVERRIDES_DIR / overrides)
    #[arg(long)]
    pub overrides_dir: Option<PathBuf>,

    /// Nom de preset (gurs) ou chemin vers une configuration JSON
    #[arg(long, default_value = "gurs")]
    pub config: String,

    /// SRID des coordonnées en entrée (4326 ou 3794)
    #[arg(long, default_value_t = 4326)]
    pub source_srid: u32,

    /// Écrire le rapport de conversion en JSON à ce chemin
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl ConvertArgs {
    /// Arguments par défaut pour un fichier d'entrée donné
    pub fn new(input: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            lookup_dir: None,
            overrides_dir: None,
            config: "gurs".to_string(),
            source_srid: 4326,
            report: None,
        }
    }

    /// Dossiers effectifs : les options CLI priment sur l'environnement
    pub fn paths(&self) -> PathsConfig {
        let mut paths = PathsConfig::from_env();
        if let Some(dir) = &self.lookup_dir {
            paths.lookup_dir = dir.clone();
        }
        if let Some(dir) = &self.overrides_dir {
            paths.overrides_dir = dir.clone();
        }
        paths
    }
}

/// Exécute une conversion complète et retourne son rapport
pub fn cmd_convert(args: &ConvertArgs) -> Result<RunReport> {
    let start = Instant::now();

    // Vérifications avant tout travail
    let template = OutputTemplate::parse(&args.output)?;
    let reprojector = Reprojector::new(args.source_srid)?;
    let config = Config::resolve(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config))?;
    let paths = args.paths();

    info!(
        input = %args.input.display(),
        output = template.as_str(),
        lookup_dir = %paths.lookup_dir.display(),
        overrides_dir = %paths.overrides_dir.display(),
        srid = args.source_srid,
        "Starting conversion"
    );

    // Les avertissements sont journalisés table par table au chargement
    let lookups = Lookups::load(&config, &paths.lookup_dir, &paths.overrides_dir)?;

    let mut report = RunReport::new();
    report.record_lookups(&lookups);

    let collections = collect_features(&args.input, &reprojector, &lookups, &mut report)?;
    write_collections(&template, &collections, &mut report)?;

    report.set_duration(start.elapsed());
    info!("{}", report.summary());

    if let Some(path) = &args.report {
        report.save_to_file(path)?;
        info!(path = %path.display(), "Report saved");
    }

    Ok(report)
}

/// Balaye le shapefile des hišne številke et regroupe les adresses triées
pub fn collect_features(
    input: &Path,
    reprojector: &Reprojector,
    lookups: &Lookups,
    report: &mut RunReport,
) -> Result<FeatureCollections> {
    let reader = ShapeReader::open(input)
        .with_context(|| format!("Failed to open house numbers: {}", input.display()))?;
    info!(records = reader.len(), "Reading house numbers");

    let mut collections = FeatureCollections::new();
    for shape_record in reader.records() {
        report.record_read();

        let mut record = HouseNumberRecord::from_shape_record(&shape_record)?;
        record.position = reprojector.transform(record.position);

        match resolve(&record, lookups) {
            Resolution::Feature { feature, category } => collections.insert(&category, feature),
            Resolution::Skipped => report.record_skipped(),
        }
    }

    debug!(categories = collections.len(), "Sorting collections");
    collections.sort();

    Ok(collections)
}

/// Écrit chaque collection, par ordre alphabétique de catégorie
pub fn write_collections(
    template: &OutputTemplate,
    collections: &FeatureCollections,
    report: &mut RunReport,
) -> Result<()> {
    for (category, features) in collections.iter() {
        let path = template.path_for(category);
        write_collection(&path, features)?;
        info!("Saved {} addresses to {}", features.len(), path.display());
        report.record_collection(features.len());
    }
    Ok(())
}
