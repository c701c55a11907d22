//! Encodage textuel des marqueurs et des zones
//!
//! Chaque liste se termine par la sentinelle `end`, côté marqueurs comme côté zones.

use crate::parser::zone::{COORD_SEPARATOR, VERTEX_SEPARATOR};
use crate::parser::END_SENTINEL;
use crate::types::{Marker, Zone};

/// Formate une coordonnée; sans précision, la représentation la plus courte est utilisée
pub fn format_coordinate(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(decimals) => format!("{:.*}", decimals, value),
        None => value.to_string(),
    }
}

/// `lat&long&type&date&heure`
pub fn format_marker(marker: &Marker, precision: Option<usize>) -> String {
    format!(
        "{}&{}&{}&{}&{}",
        format_coordinate(marker.position.lat, precision),
        format_coordinate(marker.position.long, precision),
        marker.kind,
        marker.submit_date,
        marker.submit_time
    )
}

/// Tous les marqueurs puis la sentinelle
pub fn format_markers<'a, I>(markers: I, precision: Option<usize>) -> Vec<String>
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers
        .into_iter()
        .map(|m| format_marker(m, precision))
        .chain(std::iter::once(END_SENTINEL.to_string()))
        .collect()
}

/// `lat@long,lat@long,...`
pub fn format_zone(zone: &Zone, precision: Option<usize>) -> String {
    let mut record = String::new();
    for (i, vertex) in zone.boundary.iter().enumerate() {
        if i > 0 {
            record.push(VERTEX_SEPARATOR);
        }
        record.push_str(&format_coordinate(vertex.lat, precision));
        record.push(COORD_SEPARATOR);
        record.push_str(&format_coordinate(vertex.long, precision));
    }
    record
}

/// Toutes les zones puis la sentinelle
pub fn format_zones(zones: &[Zone], precision: Option<usize>) -> Vec<String> {
    zones
        .iter()
        .map(|z| format_zone(z, precision))
        .chain(std::iter::once(END_SENTINEL.to_string()))
        .collect()
}

impl Marker {
    /// Enregistrement textuel du marqueur, sans arrondi
    pub fn to_record(&self) -> String {
        format_marker(self, None)
    }
}
