//! # safe-signal
//!
//! Zones de danger calculées à partir de signalements d'incidents géolocalisés.
//!
//! ## Features
//!
//! - Lecture de snapshots de marqueurs (`lat&long&type&date&heure`, terminés par `end`)
//! - Calcul des zones (regroupement par proximité + enveloppe convexe)
//! - Export texte (`lat@long,...`) ou GeoJSON
//! - Filtre par région et par type de marqueur
//!
//! ## Usage CLI
//!
//! ```bash
//! # Zones d'une région, format texte
//! safe-signal zones --input markers.txt --region 46,23
//!
//! # Zones en GeoJSON avec rapport
//! safe-signal zones --input markers.txt --format geojson --output zones.geojson --report run.json
//!
//! # Marqueurs bruts d'un type
//! safe-signal markers --input markers.txt --kind robbery --validate
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod report;

pub use config::Config;
pub use report::ZoneReport;
