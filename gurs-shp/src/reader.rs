//! Lecture conjointe d'un shapefile (.shp + .dbf)

use std::path::Path;

use geo::Rect;
use tracing::debug;

use crate::dbf::{DbfRecord, DbfTable};
use crate::shp::ShapeFile;
use crate::types::{FieldDescriptor, Shape};
use crate::ShpError;

/// Shapefile complet : géométries et attributs alignés par index
#[derive(Debug)]
pub struct ShapeReader {
    shapes: ShapeFile,
    table: DbfTable,
}

impl ShapeReader {
    /// Ouvre `<nom>.shp` et la table `<nom>.dbf` associée
    pub fn open(path: &Path) -> Result<Self, ShpError> {
        let shapes = ShapeFile::open(&path.with_extension("shp"))?;
        let table = DbfTable::open(&path.with_extension("dbf"))?;

        debug!(
            path = %path.display(),
            shapes = shapes.shapes.len(),
            fields = table.fields().len(),
            "Opened shapefile"
        );

        Self::new(shapes, table)
    }

    /// Associe des géométries et une table déjà parsées
    pub fn new(shapes: ShapeFile, table: DbfTable) -> Result<Self, ShpError> {
        if shapes.shapes.len() != table.len() {
            return Err(ShpError::RecordCountMismatch {
                shp: shapes.shapes.len(),
                dbf: table.len(),
            });
        }
        Ok(Self { shapes, table })
    }

    /// Descripteurs des champs attributaires
    pub fn fields(&self) -> &[FieldDescriptor] {
        self.table.fields()
    }

    /// Index d'une colonne par son nom
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.table.column_index(column)
    }

    /// Nombre d'enregistrements (supprimés compris)
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Itère sur les enregistrements non supprimés
    pub fn records(&self) -> impl Iterator<Item = ShapeRecord<'_>> {
        self.shapes
            .shapes
            .iter()
            .enumerate()
            .filter_map(move |(i, shape)| {
                let attributes = self.table.record(i)?;
                (!attributes.is_deleted()).then_some(ShapeRecord { shape, attributes })
            })
    }
}

/// Une géométrie et ses attributs
#[derive(Debug, Clone, Copy)]
pub struct ShapeRecord<'a> {
    shape: &'a Shape,
    attributes: DbfRecord<'a>,
}

impl<'a> ShapeRecord<'a> {
    /// Géométrie associée
    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    /// Emprise de la géométrie (absente pour une géométrie nulle)
    pub fn bbox(&self) -> Option<Rect<f64>> {
        self.shape.bbox
    }

    /// Cellule brute de la colonne `index`
    pub fn attribute(&self, index: usize) -> &'a [u8] {
        self.attributes.attribute(index)
    }

    /// Nombre de colonnes
    pub fn field_count(&self) -> usize {
        self.attributes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbf::tests::build_dbf;
    use crate::shp::tests::build_point_shp;

    #[test]
    fn test_open_pair() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("HS");
        std::fs::write(
            base.with_extension("shp"),
            build_point_shp(&[Some((14.5, 46.0)), Some((15.6, 46.5))]),
        )
        .unwrap();
        std::fs::write(
            base.with_extension("dbf"),
            build_dbf(
                &[("HS_MID", 8)],
                &[(false, vec!["1001"]), (true, vec!["1002"])],
            ),
        )
        .unwrap();

        let reader = ShapeReader::open(&base.with_extension("shp")).unwrap();
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.column_index("HS_MID"), Some(0));

        let records: Vec<_> = reader.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attribute(0), b"1001");
        assert_eq!(records[0].bbox().unwrap().min().x, 14.5);
        assert_eq!(records[0].field_count(), 1);
    }

    #[test]
    fn test_count_mismatch() {
        let shapes = ShapeFile::from_bytes("t.shp", &build_point_shp(&[Some((1.0, 1.0))])).unwrap();
        let table = DbfTable::from_bytes("t.dbf", build_dbf(&[("ID", 2)], &[])).unwrap();
        assert!(matches!(
            ShapeReader::new(shapes, table),
            Err(ShpError::RecordCountMismatch { shp: 1, dbf: 0 })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        assert!(ShapeReader::open(Path::new("nonexistent.shp")).is_err());
    }
}
