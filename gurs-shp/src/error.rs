//! Types d'erreurs pour le crate gurs-shp

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture d'un shapefile
#[derive(Debug, Error)]
pub enum ShpError {
    /// Erreur d'I/O lors de la lecture d'un fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// En-tête illisible ou incohérent
    #[error("Invalid header in {file}: {reason}")]
    InvalidHeader { file: String, reason: String },

    /// Fichier plus court que ce qu'annonce son en-tête
    #[error("Truncated file {file}: expected {expected} bytes, got {actual}")]
    Truncated {
        file: String,
        expected: usize,
        actual: usize,
    },

    /// Type de géométrie inconnu
    #[error("Unsupported shape type {shape_type} in {file}")]
    UnsupportedShapeType { file: String, shape_type: i32 },

    /// Les fichiers .shp et .dbf ne décrivent pas les mêmes enregistrements
    #[error("Record count mismatch: {shp} shapes in .shp, {dbf} rows in .dbf")]
    RecordCountMismatch { shp: usize, dbf: usize },
}

impl ShpError {
    /// Crée une erreur d'en-tête avec contexte
    pub fn invalid_header(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de fichier tronqué
    pub fn truncated(file: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Truncated {
            file: file.into(),
            expected,
            actual,
        }
    }
}
