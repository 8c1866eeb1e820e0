//! Export vers GeoJSON (un fichier par catégorie)

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use tempfile::NamedTempFile;

use crate::feature::AddressFeature;

const PLACEHOLDER: &str = "%s";

/// Gabarit de chemin de sortie contenant un unique `%s`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate(String);

impl OutputTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        match template.matches(PLACEHOLDER).count() {
            1 => Ok(Self(template.to_string())),
            0 => bail!("Output template '{}' has no %s placeholder", template),
            n => bail!(
                "Output template '{}' has {} %s placeholders, expected one",
                template,
                n
            ),
        }
    }

    /// Chemin du fichier d'une catégorie ; le `/` de la clé devient un dossier
    pub fn path_for(&self, category: &str) -> PathBuf {
        PathBuf::from(self.0.replacen(PLACEHOLDER, category, 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Convertit une adresse en feature GeoJSON (Point `[lon, lat]`, propriétés texte)
pub fn to_geojson_feature(feature: &AddressFeature) -> Feature {
    let point = feature.point();
    let properties: JsonObject = feature
        .tags()
        .iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Écrit une collection dans `path` (indentation de deux espaces)
///
/// Le fichier est d'abord écrit dans un fichier temporaire du même dossier
/// puis renommé.
pub fn write_collection(path: &Path, features: &[AddressFeature]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let collection = FeatureCollection {
        bbox: None,
        features: features.iter().map(to_geojson_feature).collect(),
        foreign_members: None,
    };

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &collection)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        writer.flush()?;
    }
    tmp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{self, Tags};
    use geo::Point;

    fn address(hn: &str) -> AddressFeature {
        let mut t = Tags::new();
        t.set(tags::HOUSENUMBER, hn);
        t.set(tags::CITY, "Ljubljana");
        t.set(tags::SOURCE, "GURS");
        AddressFeature::new(Point::new(14.5058, 46.0569), t)
    }

    #[test]
    fn test_template_parse() {
        assert!(OutputTemplate::parse("out/%s.geojson").is_ok());
        assert!(OutputTemplate::parse("out/all.geojson").is_err());
        assert!(OutputTemplate::parse("%s/%s.geojson").is_err());
    }

    #[test]
    fn test_template_path_for() {
        let template = OutputTemplate::parse("data/slovenia/%s-housenumbers-gurs.geojson").unwrap();
        assert_eq!(
            template.path_for("Ljubljana/Center"),
            PathBuf::from("data/slovenia/Ljubljana/Center-housenumbers-gurs.geojson")
        );
    }

    #[test]
    fn test_to_geojson_feature() {
        let f = to_geojson_feature(&address("12a"));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["geometry"]["coordinates"][0], 14.5058);
        assert_eq!(json["geometry"]["coordinates"][1], 46.0569);
        assert_eq!(json["properties"]["addr:housenumber"], "12a");
        assert_eq!(json["properties"]["source:addr"], "GURS");
    }

    #[test]
    fn test_write_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Ljubljana").join("Center.geojson");

        write_collection(&path, &[address("1"), address("2")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \""));
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"].as_array().unwrap().len(), 2);
        assert_eq!(json["features"][1]["properties"]["addr:housenumber"], "2");

        // Aucun fichier temporaire ne reste dans le dossier
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_collection_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.geojson");

        write_collection(&path, &[address("1"), address("2")]).unwrap();
        write_collection(&path, &[address("3")]).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["features"].as_array().unwrap().len(), 1);
    }
}
