//! Rapport d'exécution du calcul des zones
//!
//! Collecte quelques statistiques sur un calcul (marqueurs lus, zones produites,
//! zones dégénérées) pour l'affichage console et l'export JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use zones::Zone;

/// Statistiques d'un calcul de zones
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZoneReport {
    /// Clé de région filtrée, si un filtre a été appliqué
    pub region: Option<String>,
    /// Seuil de proximité utilisé
    pub threshold: f64,
    /// Durée du calcul
    pub duration_secs: f64,

    /// Nombre de marqueurs en entrée
    pub markers: usize,
    /// Nombre de marqueurs écartés par le filtre de région
    pub markers_filtered: usize,
    /// Nombre de zones produites (une par cluster)
    pub zones: usize,
    /// Zones sans surface (moins de 3 sommets distincts)
    pub degenerate_zones: usize,
    /// Taille du plus grand cluster
    pub largest_cluster: usize,
    /// Nombre total de sommets des contours
    pub boundary_vertices: usize,
}

impl ZoneReport {
    /// Crée un nouveau rapport pour un seuil donné
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Enregistre les zones produites
    pub fn record_zones(&mut self, zones: &[Zone]) {
        self.zones = zones.len();
        self.degenerate_zones = zones.iter().filter(|z| z.is_degenerate()).count();
        self.largest_cluster = zones.iter().map(|z| z.markers).max().unwrap_or(0);
        self.boundary_vertices = zones.iter().map(Zone::len).sum();
    }

    /// Définit la durée du calcul
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Affiche le rapport sur stderr (stdout porte les données)
    pub fn display(&self) {
        eprintln!("\n{}", "=".repeat(60));
        match &self.region {
            Some(region) => eprintln!("ZONE REPORT - Region {}", region),
            None => eprintln!("ZONE REPORT"),
        }
        eprintln!("{}", "=".repeat(60));

        eprintln!("\nThreshold: {}", self.threshold);
        eprintln!("Duration: {:.3}s", self.duration_secs);

        eprintln!("\n--- SUMMARY ---");
        eprintln!(
            "Markers: {} used, {} filtered out",
            self.markers, self.markers_filtered
        );
        eprintln!(
            "Zones: {} ({} degenerate), largest cluster {} markers, {} boundary vertices",
            self.zones, self.degenerate_zones, self.largest_cluster, self.boundary_vertices
        );

        eprintln!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} markers -> {} zones ({} degenerate), threshold {}",
            self.markers, self.zones, self.degenerate_zones, self.threshold
        )
    }
}
