//! Parser pour les enregistrements de zones
//!
//! Format: sommets `lat@long` séparés par des virgules, ex: `46.78@23.60,46.79@23.61`.

use super::{parse_coordinate, parse_until_sentinel};
use crate::types::Point;
use crate::ZoneError;

/// Séparateur entre deux sommets
pub const VERTEX_SEPARATOR: char = ',';

/// Séparateur entre latitude et longitude d'un sommet
pub const COORD_SEPARATOR: char = '@';

/// Parse un enregistrement de zone en liste de sommets
pub fn parse_zone_record(index: usize, record: &str) -> Result<Vec<Point>, ZoneError> {
    let record = record.trim();
    if record.is_empty() {
        return Err(ZoneError::invalid_record(index, "empty zone record"));
    }

    record
        .split(VERTEX_SEPARATOR)
        .map(|vertex| -> Result<Point, ZoneError> {
            let (lat, long) = vertex.split_once(COORD_SEPARATOR).ok_or_else(|| {
                ZoneError::invalid_record(
                    index,
                    format!("vertex {:?} has no '{}' separator", vertex, COORD_SEPARATOR),
                )
            })?;
            Ok(Point::new(
                parse_coordinate(index, "latitude", lat)?,
                parse_coordinate(index, "longitude", long)?,
            ))
        })
        .collect()
}

/// Parse une liste de zones jusqu'à la sentinelle `end`
pub fn parse_zone_records<I, S>(records: I) -> Result<Vec<Vec<Point>>, ZoneError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_until_sentinel(records, parse_zone_record)
}
