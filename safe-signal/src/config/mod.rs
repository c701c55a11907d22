//! Configuration du service

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use zones::DEFAULT_THRESHOLD;

/// Variable d'environnement pointant vers un fichier de configuration JSON
pub const CONFIG_ENV: &str = "SAFE_SIGNAL_CONFIG";

/// Variable d'environnement surchargeant le seuil de proximité
pub const THRESHOLD_ENV: &str = "SAFE_SIGNAL_THRESHOLD";

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Distance maximale entre deux marqueurs d'une même zone (degrés)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Types de marqueurs acceptés
    #[serde(default = "default_marker_kinds")]
    pub marker_kinds: Vec<String>,

    /// Nombre de décimales des coordonnées en sortie (représentation la plus courte si absent)
    #[serde(default)]
    pub coordinate_precision: Option<usize>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_marker_kinds() -> Vec<String> {
    [
        "robbery",
        "assault",
        "harassment",
        "theft",
        "vandalism",
        "accident",
        "other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            marker_kinds: default_marker_kinds(),
            coordinate_precision: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Résout la configuration effective
    ///
    /// Fichier explicite, sinon `SAFE_SIGNAL_CONFIG`, sinon preset par défaut;
    /// puis `SAFE_SIGNAL_THRESHOLD` s'il est défini.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => match std::env::var(CONFIG_ENV) {
                Ok(path) => Self::load(Path::new(&path))?,
                Err(_) => Self::from_preset("default")?,
            },
        };

        config.with_threshold_override(std::env::var(THRESHOLD_ENV).ok().as_deref())
    }

    /// Applique une surcharge textuelle du seuil (variable d'environnement)
    pub fn with_threshold_override(mut self, raw: Option<&str>) -> Result<Self> {
        if let Some(raw) = raw {
            self.threshold = raw
                .trim()
                .parse()
                .context(format!("Invalid {}: {}", THRESHOLD_ENV, raw))?;
            self.validate()?;
        }
        Ok(self)
    }

    /// Vérifie la cohérence des valeurs
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            anyhow::bail!(
                "Invalid threshold: {}. Must be a finite, non-negative distance",
                self.threshold
            );
        }
        if self.marker_kinds.is_empty() {
            anyhow::bail!("marker_kinds must list at least one marker type");
        }
        Ok(())
    }

    /// Vrai si le type de marqueur est accepté
    pub fn is_known_kind(&self, kind: &str) -> bool {
        self.marker_kinds.iter().any(|k| k == kind)
    }
}
