//! Export des zones en GeoJSON avec geozero (streaming)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;

use zones::Zone;

/// Exporte des zones dans un fichier GeoJSON
pub fn export_to_geojson(zones: &[Zone], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_feature_collection(&mut writer, zones)?;
    writer.flush()?;
    Ok(())
}

/// Écrit une FeatureCollection WGS84, une feature par zone
pub fn write_feature_collection<W: Write>(writer: &mut W, zones: &[Zone]) -> Result<()> {
    write!(
        writer,
        r#"{{"type":"FeatureCollection","crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::4326"}}}},"features":["#
    )?;

    for (i, zone) in zones.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_feature(writer, i, zone)?;
    }

    write!(writer, "]}}")?;
    Ok(())
}

/// Écrit une zone en GeoJSON (Polygon, ou MultiPoint si dégénérée)
fn write_feature<W: Write>(writer: &mut W, index: usize, zone: &Zone) -> Result<()> {
    write!(writer, r#"{{"type":"Feature","id":{},"#, index)?;

    write!(writer, r#""geometry":"#)?;
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    zone.to_geometry().process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    write!(
        writer,
        r#","properties":{{"zone":{},"vertices":{},"markers":{},"degenerate":{}}}}}"#,
        index,
        zone.len(),
        zone.markers,
        zone.is_degenerate()
    )?;

    Ok(())
}
