//! # zones
//!
//! Construction des zones de danger à partir de marqueurs d'incidents géolocalisés.
//!
//! ## Features
//!
//! - Décodage des snapshots de marqueurs (`lat&long&type&date&heure`, terminés par `end`)
//! - Regroupement par proximité (union-find sur un seuil de distance)
//! - Contour de chaque cluster par enveloppe convexe (chaîne monotone)
//! - Types `geo` pour l'export vers l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust
//! use zones::{build_zones, DEFAULT_THRESHOLD};
//!
//! let records = [
//!     "46.7874&23.6018&robbery&2020-08-17&10:32:55",
//!     "46.7875&23.6019&theft&2020-08-18&09:12:00",
//!     "end",
//! ];
//!
//! let zones = build_zones(records, DEFAULT_THRESHOLD)?;
//! assert_eq!(zones.len(), 1);
//! assert_eq!(zones[0].boundary.len(), 2);
//! # Ok::<(), zones::ZoneError>(())
//! ```

pub mod builder;
pub mod cluster;
pub mod error;
pub mod hull;
pub mod parser;
pub mod types;
pub mod wire;

pub use builder::ZoneBuilder;
pub use cluster::{cluster, Clusters, DEFAULT_THRESHOLD};
pub use error::ZoneError;
pub use hull::boundary;
pub use parser::marker::{parse_markers, parse_positions};
pub use parser::END_SENTINEL;
pub use types::{region_key, Marker, Point, Region, Zone};

/// Décode un snapshot de marqueurs et renvoie ses zones de danger.
///
/// # Arguments
///
/// * `records` - Enregistrements de marqueurs, terminés par la sentinelle `end`
/// * `threshold` - Distance maximale entre deux marqueurs voisins (degrés)
///
/// # Errors
///
/// Retourne `ZoneError` si un enregistrement a une latitude ou une longitude
/// invalide, ou si le seuil est négatif ou non fini. Aucune zone n'est renvoyée
/// dans ce cas.
pub fn build_zones<I, S>(records: I, threshold: f64) -> Result<Vec<Zone>, ZoneError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ZoneBuilder::new(threshold).build_from_records(records)
}
