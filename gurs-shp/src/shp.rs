//! Parser pour les fichiers de géométries (.shp)
//!
//! Seule l'emprise de chaque géométrie est extraite : le registre publie des
//! points, et l'emprise d'un point est le point lui-même.

use std::path::Path;

use geo::{coord, Rect};

use crate::types::{Shape, ShapeType};
use crate::ShpError;

const FILE_CODE: i32 = 9994;
const VERSION: i32 = 1000;
const HEADER_LEN: usize = 100;
const RECORD_HEADER_LEN: usize = 8;

/// Fichier .shp chargé en mémoire
#[derive(Debug)]
pub struct ShapeFile {
    /// Type de géométrie déclaré par l'en-tête
    pub shape_type: ShapeType,

    /// Emprise globale du fichier
    pub bbox: Rect<f64>,

    /// Géométries, dans l'ordre du fichier
    pub shapes: Vec<Shape>,
}

impl ShapeFile {
    /// Ouvre et parse un fichier .shp
    pub fn open(path: &Path) -> Result<Self, ShpError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&path.display().to_string(), &data)
    }

    /// Parse le contenu brut d'un fichier .shp
    pub fn from_bytes(file: &str, data: &[u8]) -> Result<Self, ShpError> {
        if data.len() < HEADER_LEN {
            return Err(ShpError::truncated(file, HEADER_LEN, data.len()));
        }

        let file_code = read_i32_be(data, 0);
        if file_code != FILE_CODE {
            return Err(ShpError::invalid_header(
                file,
                format!("unexpected file code {}", file_code),
            ));
        }

        let version = read_i32_le(data, 28);
        if version != VERSION {
            return Err(ShpError::invalid_header(
                file,
                format!("unsupported version {}", version),
            ));
        }

        // Longueur exprimée en mots de 16 bits
        let declared_len = read_i32_be(data, 24).max(0) as usize * 2;
        if declared_len > data.len() {
            return Err(ShpError::truncated(file, declared_len, data.len()));
        }
        let end = declared_len.max(HEADER_LEN);

        let shape_type = ShapeType::from_code(read_i32_le(data, 32), file)?;
        let bbox = read_bbox(data, 36);

        let mut shapes = Vec::new();
        let mut offset = HEADER_LEN;

        while offset + RECORD_HEADER_LEN <= end {
            let number = read_i32_be(data, offset).max(0) as u32;
            let content_len = read_i32_be(data, offset + 4).max(0) as usize * 2;
            let content_start = offset + RECORD_HEADER_LEN;
            let content_end = content_start + content_len;

            if content_end > end || content_len < 4 {
                return Err(ShpError::truncated(file, content_end, end));
            }

            let content = &data[content_start..content_end];
            shapes.push(parse_shape(file, number, content)?);

            offset = content_end;
        }

        Ok(Self {
            shape_type,
            bbox,
            shapes,
        })
    }
}

/// Parse le contenu d'un enregistrement
fn parse_shape(file: &str, number: u32, content: &[u8]) -> Result<Shape, ShpError> {
    let shape_type = ShapeType::from_code(read_i32_le(content, 0), file)?;

    let bbox = if shape_type == ShapeType::Null {
        None
    } else if shape_type.is_point() {
        ensure_len(file, content, 20)?;
        let point = coord! { x: read_f64_le(content, 4), y: read_f64_le(content, 12) };
        Some(Rect::new(point, point))
    } else {
        ensure_len(file, content, 36)?;
        Some(read_bbox(content, 4))
    };

    Ok(Shape {
        number,
        shape_type,
        bbox,
    })
}

fn ensure_len(file: &str, content: &[u8], expected: usize) -> Result<(), ShpError> {
    if content.len() < expected {
        return Err(ShpError::truncated(file, expected, content.len()));
    }
    Ok(())
}

/// Lit une emprise xmin, ymin, xmax, ymax
fn read_bbox(data: &[u8], offset: usize) -> Rect<f64> {
    Rect::new(
        coord! { x: read_f64_le(data, offset), y: read_f64_le(data, offset + 8) },
        coord! { x: read_f64_le(data, offset + 16), y: read_f64_le(data, offset + 24) },
    )
}

fn read_i32_be(data: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_i32_le(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_f64_le(data: &[u8], offset: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[offset..offset + 8]);
    f64::from_le_bytes(buf)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Construit un fichier .shp de points (None = géométrie nulle)
    pub(crate) fn build_point_shp(points: &[Option<(f64, f64)>]) -> Vec<u8> {
        let mut records = Vec::new();
        for (i, point) in points.iter().enumerate() {
            let mut content = Vec::new();
            match point {
                Some((x, y)) => {
                    content.extend_from_slice(&1i32.to_le_bytes());
                    content.extend_from_slice(&x.to_le_bytes());
                    content.extend_from_slice(&y.to_le_bytes());
                }
                None => content.extend_from_slice(&0i32.to_le_bytes()),
            }
            records.extend_from_slice(&(i as i32 + 1).to_be_bytes());
            records.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
            records.extend_from_slice(&content);
        }

        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(&FILE_CODE.to_be_bytes());
        let total_words = ((HEADER_LEN + records.len()) / 2) as i32;
        data[24..28].copy_from_slice(&total_words.to_be_bytes());
        data[28..32].copy_from_slice(&VERSION.to_le_bytes());
        data[32..36].copy_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&records);
        data
    }

    #[test]
    fn test_parse_points() {
        let data = build_point_shp(&[Some((14.5058, 46.0569)), None, Some((13.7301, 45.5481))]);
        let shp = ShapeFile::from_bytes("HS.shp", &data).unwrap();

        assert_eq!(shp.shape_type, ShapeType::Point);
        assert_eq!(shp.shapes.len(), 3);

        let first = shp.shapes[0].bbox.unwrap();
        assert_eq!(first.min(), coord! { x: 14.5058, y: 46.0569 });
        assert_eq!(first.min(), first.max());
        assert_eq!(shp.shapes[0].number, 1);

        assert_eq!(shp.shapes[1].shape_type, ShapeType::Null);
        assert!(shp.shapes[1].bbox.is_none());
    }

    #[test]
    fn test_polygon_bbox() {
        let mut content = Vec::new();
        content.extend_from_slice(&5i32.to_le_bytes());
        for v in [1.0f64, 2.0, 3.0, 4.0] {
            content.extend_from_slice(&v.to_le_bytes());
        }
        let shape = parse_shape("t.shp", 7, &content).unwrap();
        let bbox = shape.bbox.unwrap();
        assert_eq!(bbox.min(), coord! { x: 1.0, y: 2.0 });
        assert_eq!(bbox.max(), coord! { x: 3.0, y: 4.0 });
    }

    #[test]
    fn test_invalid_file_code() {
        let mut data = build_point_shp(&[Some((1.0, 2.0))]);
        data[3] = 0;
        assert!(matches!(
            ShapeFile::from_bytes("t.shp", &data),
            Err(ShpError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_truncated_record() {
        let mut data = build_point_shp(&[Some((1.0, 2.0))]);
        data.truncate(data.len() - 4);
        assert!(ShapeFile::from_bytes("t.shp", &data).is_err());
    }

    #[test]
    fn test_unsupported_shape_type() {
        assert!(matches!(
            ShapeType::from_code(42, "t.shp"),
            Err(ShpError::UnsupportedShapeType { shape_type: 42, .. })
        ));
    }
}
