//! Parser pour les tables attributaires dBase (.dbf)
//!
//! Le fichier est chargé en mémoire puis découpé en enregistrements de largeur
//! fixe. Les cellules sont rendues brutes (octets Windows-1250), le décodage
//! est laissé à l'appelant.

use std::path::Path;

use crate::types::FieldDescriptor;
use crate::ShpError;

/// Taille de l'en-tête fixe et d'un descripteur de champ
const BLOCK_SIZE: usize = 32;

/// Fin de la liste des descripteurs
const HEADER_TERMINATOR: u8 = 0x0D;

/// Marqueur d'enregistrement supprimé
const DELETED_FLAG: u8 = b'*';

/// Table dBase chargée en mémoire
#[derive(Debug)]
pub struct DbfTable {
    name: String,
    fields: Vec<FieldDescriptor>,
    record_count: usize,
    header_len: usize,
    record_len: usize,
    data: Vec<u8>,
}

impl DbfTable {
    /// Ouvre et parse un fichier .dbf
    pub fn open(path: &Path) -> Result<Self, ShpError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(path.display().to_string(), data)
    }

    /// Parse une table depuis son contenu brut
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self, ShpError> {
        let name = name.into();

        if data.len() < BLOCK_SIZE {
            return Err(ShpError::truncated(name, BLOCK_SIZE, data.len()));
        }

        let record_count = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
        let header_len = u16::from_le_bytes([data[8], data[9]]) as usize;
        let record_len = u16::from_le_bytes([data[10], data[11]]) as usize;

        if header_len < BLOCK_SIZE + 1 || header_len > data.len() {
            return Err(ShpError::invalid_header(
                name,
                format!("header length {} out of range", header_len),
            ));
        }

        let fields = parse_fields(&name, &data[BLOCK_SIZE..header_len])?;

        // L'octet de suppression précède les champs
        let fields_len: usize = fields.iter().map(|f| f.length).sum();
        if fields_len + 1 > record_len {
            return Err(ShpError::invalid_header(
                name,
                format!(
                    "record length {} smaller than field widths {}",
                    record_len,
                    fields_len + 1
                ),
            ));
        }

        let expected = header_len + record_count * record_len;
        if data.len() < expected {
            return Err(ShpError::truncated(name, expected, data.len()));
        }

        Ok(Self {
            name,
            fields,
            record_count,
            header_len,
            record_len,
            data,
        })
    }

    /// Nom de la table (chemin du fichier)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descripteurs des champs, dans l'ordre du fichier
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Index d'une colonne par son nom
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == column)
    }

    /// Nombre d'enregistrements annoncé par l'en-tête (supprimés compris)
    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Accès direct à l'enregistrement `index`
    pub fn record(&self, index: usize) -> Option<DbfRecord<'_>> {
        if index >= self.record_count {
            return None;
        }
        let start = self.header_len + index * self.record_len;
        Some(DbfRecord {
            raw: &self.data[start..start + self.record_len],
            fields: &self.fields,
        })
    }

    /// Itère sur les enregistrements non supprimés
    pub fn records(&self) -> impl Iterator<Item = DbfRecord<'_>> {
        (0..self.record_count)
            .filter_map(move |i| self.record(i))
            .filter(|r| !r.is_deleted())
    }
}

/// Parse la liste des descripteurs de champs
fn parse_fields(file: &str, block: &[u8]) -> Result<Vec<FieldDescriptor>, ShpError> {
    let mut fields = Vec::new();
    let mut offset = 1;

    for chunk in block.chunks(BLOCK_SIZE) {
        if chunk[0] == HEADER_TERMINATOR {
            return Ok(fields);
        }
        if chunk.len() < BLOCK_SIZE {
            break;
        }

        // Nom sur 11 octets, complété par des zéros
        let raw_name = &chunk[..11];
        let name_end = memchr::memchr(0, raw_name).unwrap_or(raw_name.len());
        let name = String::from_utf8_lossy(&raw_name[..name_end]).trim().to_string();

        let length = chunk[16] as usize;
        fields.push(FieldDescriptor {
            name,
            field_type: chunk[11] as char,
            length,
            decimals: chunk[17],
            offset,
        });
        offset += length;
    }

    Err(ShpError::invalid_header(
        file,
        "missing field descriptor terminator",
    ))
}

/// Un enregistrement de la table
#[derive(Debug, Clone, Copy)]
pub struct DbfRecord<'a> {
    raw: &'a [u8],
    fields: &'a [FieldDescriptor],
}

impl<'a> DbfRecord<'a> {
    /// Vrai si l'enregistrement est marqué comme supprimé
    pub fn is_deleted(&self) -> bool {
        self.raw.first() == Some(&DELETED_FLAG)
    }

    /// Cellule brute, sans les espaces de remplissage
    ///
    /// Retourne une tranche vide si l'index est hors limites.
    pub fn attribute(&self, index: usize) -> &'a [u8] {
        let Some(field) = self.fields.get(index) else {
            return &[];
        };
        trim_spaces(&self.raw[field.offset..field.offset + field.length])
    }

    /// Nombre de champs
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn trim_spaces(cell: &[u8]) -> &[u8] {
    let start = cell.iter().position(|&b| b != b' ').unwrap_or(cell.len());
    let end = cell.iter().rposition(|&b| b != b' ').map_or(start, |p| p + 1);
    &cell[start..end]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Construit une table dBase III minimale (champs caractère uniquement)
    pub(crate) fn build_dbf(fields: &[(&str, usize)], rows: &[(bool, Vec<&str>)]) -> Vec<u8> {
        let header_len = BLOCK_SIZE + fields.len() * BLOCK_SIZE + 1;
        let record_len = 1 + fields.iter().map(|(_, len)| len).sum::<usize>();

        let mut data = vec![0u8; BLOCK_SIZE];
        data[0] = 0x03;
        data[4..8].copy_from_slice(&(rows.len() as u32).to_le_bytes());
        data[8..10].copy_from_slice(&(header_len as u16).to_le_bytes());
        data[10..12].copy_from_slice(&(record_len as u16).to_le_bytes());

        for (name, len) in fields {
            let mut descriptor = [0u8; BLOCK_SIZE];
            descriptor[..name.len()].copy_from_slice(name.as_bytes());
            descriptor[11] = b'C';
            descriptor[16] = *len as u8;
            data.extend_from_slice(&descriptor);
        }
        data.push(HEADER_TERMINATOR);

        for (deleted, cells) in rows {
            data.push(if *deleted { DELETED_FLAG } else { b' ' });
            for ((_, len), cell) in fields.iter().zip(cells) {
                let mut padded = cell.as_bytes().to_vec();
                padded.resize(*len, b' ');
                data.extend_from_slice(&padded);
            }
        }
        data.push(0x1A);
        data
    }

    #[test]
    fn test_parse_fields_and_records() {
        let data = build_dbf(
            &[("PT_MID", 8), ("PT_UIME", 20)],
            &[
                (false, vec!["  11026", "Ljubljana"]),
                (false, vec!["11027", "Koper - Capodistria"]),
            ],
        );
        let table = DbfTable::from_bytes("PT.dbf", data).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("PT_UIME"), Some(1));
        assert_eq!(table.column_index("MISSING"), None);
        assert_eq!(table.fields()[1].offset, 9);

        let rows: Vec<_> = table.records().collect();
        assert_eq!(rows[0].attribute(0), b"11026");
        assert_eq!(rows[0].attribute(1), b"Ljubljana");
        assert_eq!(rows[1].attribute(1), b"Koper - Capodistria");
        assert_eq!(rows[1].attribute(9), b"");
    }

    #[test]
    fn test_deleted_records_are_skipped() {
        let data = build_dbf(
            &[("ID", 4)],
            &[(true, vec!["1"]), (false, vec!["2"])],
        );
        let table = DbfTable::from_bytes("t.dbf", data).unwrap();

        let ids: Vec<_> = table.records().map(|r| r.attribute(0).to_vec()).collect();
        assert_eq!(ids, vec![b"2".to_vec()]);
        assert!(table.record(0).unwrap().is_deleted());
    }

    #[test]
    fn test_null_padding_is_kept() {
        let data = build_dbf(&[("UL_DJ", 6)], &[(false, vec!["\0\0\0\0\0\0"])]);
        let table = DbfTable::from_bytes("UL.dbf", data).unwrap();

        let row = table.records().next().unwrap();
        assert_eq!(row.attribute(0), b"\0\0\0\0\0\0");
    }

    #[test]
    fn test_truncated_table() {
        let mut data = build_dbf(&[("ID", 4)], &[(false, vec!["1"])]);
        data.truncate(data.len() - 3);
        let result = DbfTable::from_bytes("t.dbf", data);
        assert!(matches!(result, Err(ShpError::Truncated { .. })));
    }

    #[test]
    fn test_too_short() {
        assert!(DbfTable::from_bytes("t.dbf", vec![0u8; 10]).is_err());
    }

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim_spaces(b"  a b  "), b"a b");
        assert_eq!(trim_spaces(b"    "), b"");
        assert_eq!(trim_spaces(b""), b"");
    }
}
