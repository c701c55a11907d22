//! Types d'erreurs pour le crate zones

use thiserror::Error;

/// Erreurs pouvant survenir lors du décodage des marqueurs ou du calcul des zones
#[derive(Debug, Error)]
pub enum ZoneError {
    /// Coordonnée non numérique ou non finie
    #[error("Invalid {field} in record {record}: {value:?}")]
    InvalidCoordinate {
        record: usize,
        field: &'static str,
        value: String,
    },

    /// Champ obligatoire absent d'un enregistrement
    #[error("Missing {field} in record {record}")]
    MissingField { record: usize, field: &'static str },

    /// Enregistrement mal formé (délimiteurs absents, encodage, etc.)
    #[error("Invalid record {record}: {reason}")]
    InvalidRecord { record: usize, reason: String },

    /// Seuil de proximité négatif ou non fini
    #[error("Invalid clustering threshold: {0}")]
    InvalidThreshold(f64),
}

impl ZoneError {
    /// Crée une erreur de coordonnée invalide avec contexte
    pub fn invalid_coordinate(record: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            record,
            field,
            value: value.into(),
        }
    }

    /// Crée une erreur d'enregistrement mal formé
    pub fn invalid_record(record: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            record,
            reason: reason.into(),
        }
    }
}
