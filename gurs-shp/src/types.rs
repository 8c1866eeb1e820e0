//! Types de données pour le crate gurs-shp

use geo::Rect;

use crate::ShpError;

/// Types de géométries définis par la spécification ESRI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Null,
    Point,
    PolyLine,
    Polygon,
    MultiPoint,
    PointZ,
    PolyLineZ,
    PolygonZ,
    MultiPointZ,
    PointM,
    PolyLineM,
    PolygonM,
    MultiPointM,
    MultiPatch,
}

impl ShapeType {
    /// Décode le code numérique stocké dans les fichiers
    pub fn from_code(code: i32, file: &str) -> Result<Self, ShpError> {
        let shape_type = match code {
            0 => Self::Null,
            1 => Self::Point,
            3 => Self::PolyLine,
            5 => Self::Polygon,
            8 => Self::MultiPoint,
            11 => Self::PointZ,
            13 => Self::PolyLineZ,
            15 => Self::PolygonZ,
            18 => Self::MultiPointZ,
            21 => Self::PointM,
            23 => Self::PolyLineM,
            25 => Self::PolygonM,
            28 => Self::MultiPointM,
            31 => Self::MultiPatch,
            _ => {
                return Err(ShpError::UnsupportedShapeType {
                    file: file.to_string(),
                    shape_type: code,
                })
            }
        };
        Ok(shape_type)
    }

    /// Vrai pour les géométries ponctuelles (une seule coordonnée, pas de bbox stockée)
    pub fn is_point(self) -> bool {
        matches!(self, Self::Point | Self::PointZ | Self::PointM)
    }
}

/// Descripteur d'un champ de la table attributaire (.dbf)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Nom du champ (ex: "HS_MID")
    pub name: String,

    /// Type dBase (C, N, D, L, F...)
    pub field_type: char,

    /// Largeur en octets
    pub length: usize,

    /// Nombre de décimales (champs numériques)
    pub decimals: u8,

    /// Position du champ dans l'enregistrement (après l'octet de suppression)
    pub offset: usize,
}

/// Un enregistrement de géométrie du fichier .shp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// Numéro d'enregistrement (commence à 1)
    pub number: u32,

    /// Type de géométrie
    pub shape_type: ShapeType,

    /// Emprise de la géométrie, absente pour les géométries nulles
    pub bbox: Option<Rect<f64>>,
}
