//! Assemblage des zones: clusters puis contours

use rayon::prelude::*;
use tracing::debug;

use crate::cluster::{cluster, DEFAULT_THRESHOLD};
use crate::hull::boundary;
use crate::parser::marker::parse_positions;
use crate::types::{Point, Zone};
use crate::ZoneError;

/// Construit les zones de danger d'un ensemble de marqueurs
#[derive(Debug, Clone, Copy)]
pub struct ZoneBuilder {
    threshold: f64,
    parallel: bool,
}

impl Default for ZoneBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
        }
    }
}

impl ZoneBuilder {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Calcule les contours des clusters sur le pool rayon
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Une zone par cluster, dans l'ordre des labels de cluster
    ///
    /// Cet ordre n'est pas garanti aux consommateurs.
    pub fn build(&self, points: &[Point]) -> Result<Vec<Zone>, ZoneError> {
        let clusters: Vec<Vec<Point>> = cluster(points, self.threshold)?.into_values().collect();

        let zones: Vec<Zone> = if self.parallel {
            clusters.into_par_iter().map(zone_from_cluster).collect()
        } else {
            clusters.into_iter().map(zone_from_cluster).collect()
        };

        debug!(
            markers = points.len(),
            zones = zones.len(),
            parallel = self.parallel,
            "Built zones"
        );

        Ok(zones)
    }

    /// Décode un snapshot de marqueurs (jusqu'à `end`) puis construit les zones
    ///
    /// Échoue sans résultat partiel si un enregistrement est invalide.
    pub fn build_from_records<I, S>(&self, records: I) -> Result<Vec<Zone>, ZoneError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let points = parse_positions(records)?;
        self.build(&points)
    }
}

fn zone_from_cluster(points: Vec<Point>) -> Zone {
    let markers = points.len();
    Zone {
        boundary: boundary(points),
        markers,
    }
}
