//! Définition et implémentation des commandes CLI
//!
//! - `zones`: snapshot de marqueurs → zones de danger (texte ou GeoJSON)
//! - `markers`: snapshot de marqueurs → liste brute filtrée

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use zones::parser::split_records;
use zones::wire::{format_markers, format_zones};
use zones::{parse_markers, parse_positions, Marker, Region, Zone, ZoneBuilder};

use crate::config::Config;
use crate::export::write_feature_collection;
use crate::report::ZoneReport;

#[derive(Subcommand)]
pub enum Commands {
    /// Compute danger zones from a marker snapshot
    Zones(ZonesArgs),

    /// List raw markers from a marker snapshot
    Markers(MarkersArgs),
}

#[derive(Args, Debug)]
pub struct ZonesArgs {
    /// Marker snapshot file (one `lat&long&type&date&time` record per line, ending with `end`), or `-` for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Proximity threshold in degrees (défaut : config / env SAFE_SIGNAL_THRESHOLD / 0.004)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Only use markers of this region, as LAT,LONG (truncated to integers)
    #[arg(long)]
    pub region: Option<Region>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Wire)]
    pub format: OutputFormat,

    /// Output file (défaut : stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compute cluster boundaries in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write a JSON run report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MarkersArgs {
    /// Marker snapshot file, or `-` for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only list markers of this region, as LAT,LONG
    #[arg(long)]
    pub region: Option<Region>,

    /// Only list markers of this type
    #[arg(long)]
    pub kind: Option<String>,

    /// Fail on marker types missing from the configuration
    #[arg(long)]
    pub validate: bool,

    /// Output file (défaut : stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Format de sortie des zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `lat@long,...` records followed by `end`
    Wire,
    /// GeoJSON FeatureCollection (EPSG:4326)
    Geojson,
}

/// Exécute la commande zones
pub fn cmd_zones(config: &Config, args: &ZonesArgs) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.threshold);

    info!(
        input = %args.input.display(),
        threshold,
        region = ?args.region,
        format = ?args.format,
        "Computing zones"
    );

    let snapshot = read_snapshot(&args.input)?;
    let (zones, report) = compute_zones(&snapshot, threshold, args.region, args.parallel)?;

    let rendered = render_zones(&zones, args.format, config.coordinate_precision)?;
    write_output(args.output.as_deref(), &rendered)?;

    info!("{}", report.summary());
    if let Some(path) = &args.report {
        report.save_to_file(path)?;
        report.display();
    }

    Ok(())
}

/// Exécute la commande markers
pub fn cmd_markers(config: &Config, args: &MarkersArgs) -> Result<()> {
    info!(
        input = %args.input.display(),
        region = ?args.region,
        kind = ?args.kind,
        "Listing markers"
    );

    let snapshot = read_snapshot(&args.input)?;
    let markers = select_markers(
        config,
        &snapshot,
        args.region,
        args.kind.as_deref(),
        args.validate,
    )?;

    let records = format_markers(&markers, config.coordinate_precision);
    write_output(args.output.as_deref(), &join_records(&records))?;

    info!(markers = markers.len(), "Listed markers");
    Ok(())
}

/// Lit un snapshot depuis un fichier, ou stdin pour `-`
pub fn read_snapshot(input: &Path) -> Result<Vec<u8>> {
    if input == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("Failed to read marker snapshot from stdin")?;
        return Ok(data);
    }

    std::fs::read(input).context(format!("Failed to read marker snapshot: {}", input.display()))
}

/// Décode un snapshot et construit ses zones
///
/// Un enregistrement invalide fait échouer tout le calcul.
pub fn compute_zones(
    snapshot: &[u8],
    threshold: f64,
    region: Option<Region>,
    parallel: bool,
) -> Result<(Vec<Zone>, ZoneReport)> {
    let started = Instant::now();
    let mut report = ZoneReport::new(threshold);
    report.region = region.map(|r| r.key());

    let records = split_records(snapshot).context("Invalid marker snapshot")?;
    let mut points = parse_positions(&records).context("Invalid marker snapshot")?;

    if let Some(region) = region {
        let before = points.len();
        points.retain(|p| region.contains(*p));
        report.markers_filtered = before - points.len();
        debug!(
            region = %region.key(),
            kept = points.len(),
            dropped = report.markers_filtered,
            "Filtered markers by region"
        );
    }
    report.markers = points.len();

    let zones = ZoneBuilder::new(threshold)
        .parallel(parallel)
        .build(&points)
        .context("Zone computation failed")?;

    report.record_zones(&zones);
    report.set_duration(started.elapsed());

    Ok((zones, report))
}

/// Décode un snapshot et filtre les marqueurs par région et par type
pub fn select_markers(
    config: &Config,
    snapshot: &[u8],
    region: Option<Region>,
    kind: Option<&str>,
    validate: bool,
) -> Result<Vec<Marker>> {
    let records = split_records(snapshot).context("Invalid marker snapshot")?;
    let markers = parse_markers(&records).context("Invalid marker snapshot")?;

    let unknown: Vec<&Marker> = markers
        .iter()
        .filter(|m| !config.is_known_kind(&m.kind))
        .collect();
    if !unknown.is_empty() {
        if validate {
            anyhow::bail!(
                "Unknown marker type {:?} ({} markers). Known types: {}",
                unknown[0].kind,
                unknown.len(),
                config.marker_kinds.join(", ")
            );
        }
        warn!(count = unknown.len(), "Markers with unknown type");
    }

    Ok(markers
        .into_iter()
        .filter(|m| region.map_or(true, |r| m.region() == r))
        .filter(|m| kind.map_or(true, |k| m.kind == k))
        .collect())
}

/// Sérialise les zones dans le format demandé
pub fn render_zones(
    zones: &[Zone],
    format: OutputFormat,
    precision: Option<usize>,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Wire => Ok(join_records(&format_zones(zones, precision))),
        OutputFormat::Geojson => {
            let mut buffer = Vec::new();
            write_feature_collection(&mut buffer, zones)?;
            buffer.push(b'\n');
            Ok(buffer)
        }
    }
}

fn join_records(records: &[String]) -> Vec<u8> {
    let mut out = records.join("\n").into_bytes();
    out.push(b'\n');
    out
}

fn write_output(output: Option<&Path>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, data)
            .context(format!("Failed to write output: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &[u8] = b"46.7874&23.6018&robbery&2020-08-17&10:32:55\n\
46.7875&23.6019&theft&2020-08-17&11:02:10\n\
46.7933&23.6017&assault&2020-08-18&22:00:00\n\
47.1000&23.5000&fire&2020-08-19&01:15:00\n\
end\n";

    #[test]
    fn test_compute_zones() {
        let (zones, report) = compute_zones(SNAPSHOT, 0.004, None, false).unwrap();
        assert_eq!(zones.len(), 3);
        assert_eq!(report.markers, 4);
        assert_eq!(report.zones, 3);
        assert_eq!(report.largest_cluster, 2);
    }

    #[test]
    fn test_compute_zones_region_filter() {
        let (zones, report) =
            compute_zones(SNAPSHOT, 0.004, Some(Region::new(46, 23)), false).unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(report.markers, 3);
        assert_eq!(report.markers_filtered, 1);
        assert_eq!(report.region.as_deref(), Some("4623"));
    }

    #[test]
    fn test_compute_zones_rejects_bad_snapshot() {
        let snapshot = b"46.7874&23.6018&robbery&2020-08-17&10:32:55\nnorth&23&theft&d&t\nend\n";
        let err = compute_zones(snapshot, 0.004, None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("latitude"));
    }

    #[test]
    fn test_compute_zones_rejects_bad_threshold() {
        assert!(compute_zones(SNAPSHOT, -1.0, None, false).is_err());
    }

    #[test]
    fn test_select_markers() {
        let config = Config::default();
        let markers = select_markers(&config, SNAPSHOT, None, Some("theft"), false).unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].submit_time, "11:02:10");

        let markers =
            select_markers(&config, SNAPSHOT, Some(Region::new(47, 23)), None, false).unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, "fire");
    }

    #[test]
    fn test_select_markers_validation() {
        let config = Config::default();
        let err = select_markers(&config, SNAPSHOT, None, None, true).unwrap_err();
        assert!(err.to_string().contains("fire"));
    }

    #[test]
    fn test_render_wire_ends_with_sentinel() {
        let (zones, _) = compute_zones(SNAPSHOT, 0.004, None, false).unwrap();
        let rendered = String::from_utf8(render_zones(&zones, OutputFormat::Wire, None).unwrap())
            .unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "46.7874@23.6018,46.7875@23.6019");
        assert_eq!(lines[3], "end");
    }

    #[test]
    fn test_render_geojson() {
        let (zones, _) = compute_zones(SNAPSHOT, 0.004, None, false).unwrap();
        let rendered = render_zones(&zones, OutputFormat::Geojson, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&rendered).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 3);
    }
}
