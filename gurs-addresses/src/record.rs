//! Enregistrements de la couche des hišne številke (HS)
//!
//! Structure des champs (RPE, e-prostor.gov.si) :
//!
//! | # | Champ  | Description                                  |
//! |---|--------|----------------------------------------------|
//! | 0 | ENOTA  | code d'unité                                 |
//! | 1 | HS_MID | identifiant de la hišna številka             |
//! | 2 | HS     | numéro                                       |
//! | 3 | HD     | complément du numéro                         |
//! | 4 | LABELA | numéro et complément (HS + HD)               |
//! | 5 | UL_MID | identifiant de rue                           |
//! | 6 | NA_MID | identifiant de localité (naselje)            |
//! | 7 | OB_MID | identifiant de commune (občina)              |
//! | 8 | PT_MID | identifiant de secteur postal                |
//! | 9 | PO_MID | identifiant de secteur spatial               |
//! | 10| D_OD   | date de validité (YYYYMMDD)                  |
//! | 11| DV_OD  | date de saisie                               |
//! | 12| STATUS | statut (V = valide)                          |
//! | 13| Y_C    | Y du centroïde                               |
//! | 14| X_C    | X du centroïde                               |

use anyhow::{bail, Result};
use geo::Coord;
use gurs_shp::{decode_windows1250, ShapeRecord};
use tracing::warn;

/// Nombre de champs attendus dans la table HS
pub const FIELD_COUNT: usize = 15;

const HS_MID: usize = 1;
const LABELA: usize = 4;
const UL_MID: usize = 5;
const NA_MID: usize = 6;
const OB_MID: usize = 7;
const PT_MID: usize = 8;
const PO_MID: usize = 9;
const D_OD: usize = 10;
const STATUS: usize = 12;

/// Marqueur de l'état valide
pub const STATUS_VALID: &str = "V";

/// Une hišna številka et ses clés étrangères
#[derive(Debug, Clone, PartialEq)]
pub struct HouseNumberRecord {
    /// Identifiant (HS_MID), gardé tel quel
    pub id: String,
    /// Numéro avec complément (LABELA)
    pub label: String,
    pub street_id: String,
    pub settlement_id: String,
    pub municipality_id: String,
    pub postal_id: String,
    pub spatial_unit_id: String,
    /// Date de validité, YYYYMMDD
    pub valid_from: String,
    pub status: String,
    /// Coin minimal de l'emprise, utilisé comme position
    pub position: Coord<f64>,
}

impl HouseNumberRecord {
    /// Construit l'enregistrement depuis une ligne du shapefile HS
    pub fn from_shape_record(record: &ShapeRecord<'_>) -> Result<Self> {
        if record.field_count() < FIELD_COUNT {
            bail!(
                "House-number table has {} fields, expected {}",
                record.field_count(),
                FIELD_COUNT
            );
        }

        let text = |index: usize| decode_windows1250(record.attribute(index));

        let position = match record.bbox() {
            Some(bbox) => bbox.min(),
            None => {
                warn!(
                    id = %String::from_utf8_lossy(record.attribute(HS_MID)),
                    "House number without geometry"
                );
                Coord { x: 0.0, y: 0.0 }
            }
        };

        Ok(Self {
            id: String::from_utf8_lossy(record.attribute(HS_MID)).into_owned(),
            label: text(LABELA),
            street_id: text(UL_MID),
            settlement_id: text(NA_MID),
            municipality_id: text(OB_MID),
            postal_id: text(PT_MID),
            spatial_unit_id: text(PO_MID),
            valid_from: text(D_OD),
            status: text(STATUS),
            position,
        })
    }

    /// Vrai si l'enregistrement décrit l'état en vigueur
    pub fn is_valid(&self) -> bool {
        self.status == STATUS_VALID
    }
}
