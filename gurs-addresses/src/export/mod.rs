//! Export des collections d'adresses en GeoJSON

pub mod geojson;

pub use self::geojson::{write_collection, OutputTemplate};
