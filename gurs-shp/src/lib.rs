//! # gurs-shp
//!
//! Lecture des shapefiles publiés par le registre des adresses slovène (GURS).
//!
//! ## Features
//!
//! - Parsing en mémoire des fichiers `.shp` (emprises) et `.dbf` (attributs)
//! - Cellules rendues brutes, décodage Windows-1250 via `encoding_rs`
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gurs_shp::{decode_windows1250, ShapeReader};
//! use std::path::Path;
//!
//! let reader = ShapeReader::open(Path::new("HS/HS.shp"))?;
//! let label = reader.column_index("LABELA").unwrap();
//!
//! for record in reader.records() {
//!     println!("{:?} {}", record.bbox(), decode_windows1250(record.attribute(label)));
//! }
//! ```

pub mod dbf;
pub mod encoding;
pub mod error;
pub mod reader;
pub mod shp;
pub mod types;

pub use dbf::{DbfRecord, DbfTable};
pub use encoding::{decode_windows1250, encode_windows1250};
pub use error::ShpError;
pub use reader::{ShapeReader, ShapeRecord};
pub use shp::ShapeFile;
pub use types::{FieldDescriptor, Shape, ShapeType};
