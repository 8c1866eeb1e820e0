//! Projection Mercator transverse (inverse) sur GRS80
//!
//! Utilisée pour D96/TM (EPSG:3794), la grille nationale slovène.

use super::ellipsoid::GRS80;
use super::Geographic;

/// Paramètres d'une projection Mercator transverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    /// Méridien central en degrés
    pub lon0: f64,
    /// Facteur d'échelle sur le méridien central
    pub k0: f64,
    /// False easting
    pub x0: f64,
    /// False northing
    pub y0: f64,
}

impl TransverseMercator {
    /// D96/TM (EPSG:3794)
    pub fn d96_tm() -> Self {
        Self {
            lon0: 15.0,
            k0: 0.9999,
            x0: 500000.0,
            y0: -5000000.0,
        }
    }

    /// Convertit (easting, northing) vers coordonnées géographiques
    pub fn to_geographic(&self, x: f64, y: f64) -> Geographic {
        let a = GRS80::A;
        let e2 = GRS80::E2;
        let ep2 = GRS80::EP2;
        let k0 = self.k0;
        let lon0 = self.lon0.to_radians();

        let x = x - self.x0;
        let y = y - self.y0;

        // Latitude du pied de la perpendiculaire
        let m = y / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
        let t1 = tan_phi1.powi(2);
        let c1 = ep2 * cos_phi1.powi(2);
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
        let d = x / (n1 * k0);

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d.powi(2) / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4)
                        / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                        - 252.0 * ep2
                        - 3.0 * c1.powi(2))
                        * d.powi(6)
                        / 720.0);

        let lon = lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                    * d.powi(5)
                    / 120.0)
                / cos_phi1;

        Geographic::new(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ljubljana() {
        let geo = TransverseMercator::d96_tm().to_geographic(461761.0, 102019.0);
        let (lon, lat) = geo.to_degrees();

        // Prešernov trg: 14.5058°E, 46.0569°N
        assert!((lon - 14.5058).abs() < 0.001, "lon={}", lon);
        assert!((lat - 46.0569).abs() < 0.001, "lat={}", lat);
    }

    #[test]
    fn test_murska_sobota() {
        let geo = TransverseMercator::d96_tm().to_geographic(589260.0, 169872.0);
        let (lon, lat) = geo.to_degrees();

        assert!((lon - 16.1664).abs() < 0.001, "lon={}", lon);
        assert!((lat - 46.6625).abs() < 0.001, "lat={}", lat);
    }

    #[test]
    fn test_central_meridian() {
        // Sur le méridien central, la longitude est exactement lon0
        let geo = TransverseMercator::d96_tm().to_geographic(500000.0, 100000.0);
        let (lon, _) = geo.to_degrees();
        assert!((lon - 15.0).abs() < 1e-9, "lon={}", lon);
    }
}
