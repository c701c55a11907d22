//! Décodage des enregistrements textuels (marqueurs et zones)

pub mod marker;
pub mod zone;

use tracing::{debug, warn};

use crate::ZoneError;

/// Enregistrement terminant un snapshot de marqueurs ou une liste de zones
pub const END_SENTINEL: &str = "end";

/// Vrai si l'enregistrement est la sentinelle de fin
pub fn is_sentinel(record: &str) -> bool {
    record.trim() == END_SENTINEL
}

/// Découpe un snapshot brut en enregistrements (une ligne par enregistrement)
///
/// Les lignes vides sont ignorées. Le contenu doit être de l'UTF-8 valide.
pub fn split_records(data: &[u8]) -> Result<Vec<&str>, ZoneError> {
    let text = simdutf8::basic::from_utf8(data)
        .map_err(|_| ZoneError::invalid_record(0, "snapshot is not valid UTF-8"))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect())
}

/// Applique `parse` à chaque enregistrement jusqu'à la sentinelle de fin
///
/// Le premier échec interrompt tout: aucun résultat partiel n'est renvoyé.
pub(crate) fn parse_until_sentinel<I, S, T>(
    records: I,
    mut parse: impl FnMut(usize, &str) -> Result<T, ZoneError>,
) -> Result<Vec<T>, ZoneError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    let mut iter = records.into_iter().enumerate();

    while let Some((index, record)) = iter.next() {
        let record = record.as_ref();
        if is_sentinel(record) {
            let trailing = iter.count();
            if trailing > 0 {
                debug!(trailing, "Ignoring records after end sentinel");
            }
            return Ok(parsed);
        }
        parsed.push(parse(index, record)?);
    }

    warn!(records = parsed.len(), "No end sentinel, reading up to end of input");
    Ok(parsed)
}

/// Parse un champ numérique (latitude ou longitude)
pub(crate) fn parse_coordinate(
    record: usize,
    field: &'static str,
    raw: &str,
) -> Result<f64, ZoneError> {
    let value = raw.trim();
    match fast_float::parse::<f64, _>(value) {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ZoneError::invalid_coordinate(record, field, value)),
    }
}
