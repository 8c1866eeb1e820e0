//! Reprojection légère en Rust pur (sans dépendances externes)
//!
//! Le registre GURS est publié soit en WGS84 (EPSG:4326), soit dans la
//! grille nationale D96/TM (EPSG:3794). La sortie est toujours en WGS84.

mod ellipsoid;
mod tmerc;

pub use ellipsoid::GRS80;
pub use tmerc::TransverseMercator;

use anyhow::{bail, Result};
use geo::Coord;

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }
}

/// Reprojection d'un SRID source vers WGS84
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reprojector {
    /// Déjà en WGS84
    Identity,
    /// D96/TM vers WGS84
    TransverseMercator(TransverseMercator),
}

impl Reprojector {
    /// Crée un reprojector pour l'EPSG source
    pub fn new(source_epsg: u32) -> Result<Self> {
        match source_epsg {
            4326 => Ok(Self::Identity),
            3794 => Ok(Self::TransverseMercator(TransverseMercator::d96_tm())),
            _ => bail!(
                "EPSG:{} non supporté. Sources supportées: 4326, 3794",
                source_epsg
            ),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Transforme un point en (lon, lat) degrés
    pub fn transform(&self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Self::Identity => coord,
            Self::TransverseMercator(tm) => {
                let (x, y) = tm.to_geographic(coord.x, coord.y).to_degrees();
                Coord { x, y }
            }
        }
    }
}
