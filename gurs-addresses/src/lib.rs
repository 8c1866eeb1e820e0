//! # gurs-addresses
//!
//! Conversion du registre slovène des hišne številke (GURS) en fichiers
//! GeoJSON par "Commune/Localité", tagués pour OpenStreetMap.
//!
//! ## Features
//!
//! - Tables de correspondance construites en parallèle, avec corrections CSV
//! - Noms bilingues (italien à l'ouest de 14.5°E, hongrois à l'est)
//! - Tri reproductible des adresses dans chaque fichier
//! - Entrée WGS84 ou D96/TM
//!
//! ## Usage CLI
//!
//! ```bash
//! gurs-addresses --in data/temp/HS-epsg4326/HS-epsg4326.shp \
//!     --out 'data/slovenia/%s-housenumbers-gurs.geojson'
//! ```

pub mod bilingual;
pub mod cli;
pub mod config;
pub mod export;
pub mod feature;
pub mod group;
pub mod housenumber;
pub mod lookup;
pub mod overrides;
pub mod record;
pub mod report;
pub mod reproject_lite;
pub mod resolve;
pub mod tags;

pub use config::{Config, PathsConfig};
pub use feature::{AddressFeature, Category};
pub use group::FeatureCollections;
pub use lookup::{Lookup, LookupKind, LookupWarning, Lookups};
pub use report::RunReport;
pub use resolve::{resolve, Resolution};
pub use tags::Tags;
