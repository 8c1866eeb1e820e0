//! Écriture de fixtures shapefile (.shp + .dbf) pour les tests d'intégration

#![allow(dead_code)]

use std::path::Path;

use gurs_shp::encode_windows1250;

/// Champs de la couche HS, dans l'ordre du registre
pub const HS_FIELDS: [(&str, usize); 15] = [
    ("ENOTA", 2),
    ("HS_MID", 8),
    ("HS", 4),
    ("HD", 2),
    ("LABELA", 6),
    ("UL_MID", 8),
    ("NA_MID", 8),
    ("OB_MID", 8),
    ("PT_MID", 8),
    ("PO_MID", 8),
    ("D_OD", 8),
    ("DV_OD", 8),
    ("STATUS", 1),
    ("Y_C", 10),
    ("X_C", 10),
];

/// Table dBase III ; les cellules sont encodées en Windows-1250
pub fn dbf_bytes(fields: &[(&str, usize)], rows: &[Vec<&str>]) -> Vec<u8> {
    let header_len = 32 + fields.len() * 32 + 1;
    let record_len = 1 + fields.iter().map(|(_, len)| len).sum::<usize>();

    let mut data = vec![0u8; 32];
    data[0] = 0x03;
    data[4..8].copy_from_slice(&(rows.len() as u32).to_le_bytes());
    data[8..10].copy_from_slice(&(header_len as u16).to_le_bytes());
    data[10..12].copy_from_slice(&(record_len as u16).to_le_bytes());

    for (name, len) in fields {
        let mut descriptor = [0u8; 32];
        descriptor[..name.len()].copy_from_slice(name.as_bytes());
        descriptor[11] = b'C';
        descriptor[16] = *len as u8;
        data.extend_from_slice(&descriptor);
    }
    data.push(0x0D);

    for cells in rows {
        data.push(b' ');
        for ((_, len), cell) in fields.iter().zip(cells) {
            let mut padded = encode_windows1250(cell);
            padded.resize(*len, b' ');
            data.extend_from_slice(&padded);
        }
    }
    data.push(0x1A);
    data
}

/// Fichier .shp de points
pub fn point_shp_bytes(points: &[(f64, f64)]) -> Vec<u8> {
    let mut records = Vec::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let mut content = Vec::new();
        content.extend_from_slice(&1i32.to_le_bytes());
        content.extend_from_slice(&x.to_le_bytes());
        content.extend_from_slice(&y.to_le_bytes());
        records.extend_from_slice(&(i as i32 + 1).to_be_bytes());
        records.extend_from_slice(&((content.len() / 2) as i32).to_be_bytes());
        records.extend_from_slice(&content);
    }

    let mut data = vec![0u8; 100];
    data[0..4].copy_from_slice(&9994i32.to_be_bytes());
    let total_words = ((100 + records.len()) / 2) as i32;
    data[24..28].copy_from_slice(&total_words.to_be_bytes());
    data[28..32].copy_from_slice(&1000i32.to_le_bytes());
    data[32..36].copy_from_slice(&1i32.to_le_bytes());
    data.extend_from_slice(&records);
    data
}

/// Écrit `<stem>.dbf` (et `<stem>.shp` si des points sont donnés)
pub fn write_layer(
    stem: &Path,
    fields: &[(&str, usize)],
    rows: &[Vec<&str>],
    points: Option<&[(f64, f64)]>,
) {
    if let Some(parent) = stem.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(stem.with_extension("dbf"), dbf_bytes(fields, rows)).unwrap();
    if let Some(points) = points {
        std::fs::write(stem.with_extension("shp"), point_shp_bytes(points)).unwrap();
    }
}

/// Tables de référence PT, UL, NA et OB
pub fn write_lookup_tables(dir: &Path) {
    write_layer(
        &dir.join("PT/PT"),
        &[("PT_MID", 8), ("PT_ID", 4), ("PT_UIME", 24)],
        &[
            vec!["11026", "1000", "Ljubljana"],
            vec!["11300", "6000", "Koper - Capodistria"],
        ],
        None,
    );
    write_layer(
        &dir.join("UL/UL"),
        &[("UL_MID", 8), ("UL_UIME", 32), ("UL_DJ", 32)],
        &[
            vec!["501", "Trubarjeva cesta", ""],
            vec!["502", "Ulica Ilirskih brigad", "Via Brigate Illiriche"],
            vec!["503", "Cankarjeva ul.", ""],
        ],
        None,
    );
    write_layer(
        &dir.join("NA/NA"),
        &[("NA_MID", 8), ("NA_UIME", 24), ("NA_DJ", 24)],
        &[
            vec!["10", "Center", ""],
            vec!["20", "Koper", "Capodistria"],
            vec!["30", "Črnuče", ""],
        ],
        None,
    );
    write_layer(
        &dir.join("OB/OB"),
        &[("OB_MID", 8), ("OB_UIME", 24)],
        &[vec!["61", "Ljubljana"], vec!["50", "Koper"]],
        None,
    );
}

/// Une ligne HS : (id, label, rue, localité, commune, poste, date, statut)
pub fn hs_row<'a>(
    id: &'a str,
    label: &'a str,
    street: &'a str,
    settlement: &'a str,
    municipality: &'a str,
    postal: &'a str,
    date: &'a str,
    status: &'a str,
) -> Vec<&'a str> {
    vec![
        "01", id, label, "", label, street, settlement, municipality, postal, "7001", date,
        date, status, "", "",
    ]
}
