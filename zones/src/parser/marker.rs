//! Parser pour les enregistrements de marqueurs
//!
//! Format: `lat&long&type&date&heure`, ex: `46.7874&23.6018&robbery&2020-08-17&10:32:55`.

use memchr::memchr_iter;

use super::{parse_coordinate, parse_until_sentinel};
use crate::types::{Marker, Point};
use crate::ZoneError;

/// Séparateur de champs d'un enregistrement de marqueur
pub const FIELD_SEPARATOR: u8 = b'&';

const FIELDS: [&str; 5] = ["latitude", "longitude", "type", "date", "time"];

/// Découpe un enregistrement sur `&`
fn split_fields(record: &str) -> Vec<&str> {
    let bytes = record.as_bytes();
    let mut fields = Vec::with_capacity(FIELDS.len());
    let mut start = 0;

    for pos in memchr_iter(FIELD_SEPARATOR, bytes) {
        fields.push(&record[start..pos]);
        start = pos + 1;
    }
    fields.push(&record[start..]);

    fields
}

/// Extrait la position d'un enregistrement; les champs après la longitude sont ignorés
pub fn parse_position(index: usize, record: &str) -> Result<Point, ZoneError> {
    let fields = split_fields(record);
    position_from_fields(index, &fields)
}

fn position_from_fields(index: usize, fields: &[&str]) -> Result<Point, ZoneError> {
    let lat = fields
        .first()
        .filter(|f| !f.trim().is_empty())
        .ok_or(ZoneError::MissingField {
            record: index,
            field: FIELDS[0],
        })?;
    let long = fields.get(1).ok_or(ZoneError::MissingField {
        record: index,
        field: FIELDS[1],
    })?;

    Ok(Point::new(
        parse_coordinate(index, FIELDS[0], lat)?,
        parse_coordinate(index, FIELDS[1], long)?,
    ))
}

/// Parse un enregistrement complet (position, type, date et heure)
pub fn parse_marker(index: usize, record: &str) -> Result<Marker, ZoneError> {
    let fields = split_fields(record);
    let position = position_from_fields(index, &fields)?;

    let text_field = |i: usize| {
        fields
            .get(i)
            .map(|f| f.trim().to_string())
            .ok_or(ZoneError::MissingField {
                record: index,
                field: FIELDS[i],
            })
    };

    let kind = text_field(2)?;
    if kind.is_empty() {
        return Err(ZoneError::MissingField {
            record: index,
            field: FIELDS[2],
        });
    }

    Ok(Marker {
        position,
        kind,
        submit_date: text_field(3)?,
        submit_time: text_field(4)?,
    })
}

/// Extrait les positions d'un snapshot de marqueurs, jusqu'à la sentinelle `end`
pub fn parse_positions<I, S>(records: I) -> Result<Vec<Point>, ZoneError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_until_sentinel(records, parse_position)
}

/// Parse un snapshot de marqueurs complets, jusqu'à la sentinelle `end`
pub fn parse_markers<I, S>(records: I) -> Result<Vec<Marker>, ZoneError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_until_sentinel(records, parse_marker)
}
