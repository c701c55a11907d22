//! Tests d'intégration: scénarios de référence et propriétés des zones

use std::collections::HashMap;

use geo::{Area, ConvexHull, Geometry, MultiPoint};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use zones::cluster::cluster_indices;
use zones::hull::{boundary, turn};
use zones::{build_zones, cluster, Point, Zone, ZoneBuilder, ZoneError, DEFAULT_THRESHOLD};

/// Représentation comparable d'un ensemble de zones (ordre des zones et des sommets ignoré)
fn zone_set(zones: &[Vec<Point>]) -> Vec<Vec<(u64, u64)>> {
    let mut set: Vec<Vec<(u64, u64)>> = zones
        .iter()
        .map(|zone| {
            let mut vertices: Vec<(u64, u64)> = zone
                .iter()
                .map(|p| (p.lat.to_bits(), p.long.to_bits()))
                .collect();
            vertices.sort_unstable();
            vertices
        })
        .collect();
    set.sort();
    set
}

fn boundaries(zones: &[Zone]) -> Vec<Vec<Point>> {
    zones.iter().map(|z| z.boundary.clone()).collect()
}

/// Nuage de points groupés autour de quelques centres
fn random_points(rng: &mut XorShiftRng, count: usize) -> Vec<Point> {
    let centers: Vec<Point> = (0..4)
        .map(|_| Point::new(rng.gen_range(45.0..46.0), rng.gen_range(23.0..24.0)))
        .collect();

    (0..count)
        .map(|_| {
            let c = centers[rng.gen_range(0..centers.len())];
            Point::new(
                c.lat + rng.gen_range(-0.006..0.006),
                c.long + rng.gen_range(-0.006..0.006),
            )
        })
        .collect()
}

#[test]
fn test_scenario_a_single_point() {
    let zones = ZoneBuilder::default().build(&[Point::new(0.0, 0.0)]).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].boundary, vec![Point::new(0.0, 0.0)]);
}

#[test]
fn test_scenario_b_pair_passes_through() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.001)];
    let zones = ZoneBuilder::default().build(&points).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].boundary, points.to_vec());
}

#[test]
fn test_scenario_c_square_hull() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.001),
        Point::new(0.001, 0.0),
        Point::new(0.001, 0.001),
    ];
    let zones = ZoneBuilder::default().build(&points).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(
        zones[0].boundary,
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.001),
            Point::new(0.001, 0.001),
            Point::new(0.001, 0.0),
        ]
    );

    // Sens anti-horaire sur la carte (x = longitude, y = latitude)
    let Geometry::Polygon(polygon) = zones[0].to_geometry() else {
        panic!("Expected a polygon");
    };
    assert!(polygon.signed_area() > 0.0);
}

#[test]
fn test_scenario_d_separate_groups() {
    let west = vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.001),
        Point::new(0.001, 0.0),
    ];
    let east: Vec<Point> = west.iter().map(|p| Point::new(p.lat, p.long + 1.0)).collect();

    let mut points = west.clone();
    points.extend(east.iter().copied());

    let zones = ZoneBuilder::default().build(&points).unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zone_set(&boundaries(&zones)), zone_set(&[west, east]));
}

#[test]
fn test_scenario_e_collinear_points() {
    let points: Vec<Point> = (0..5).map(|k| Point::new(0.0, k as f64 * 0.001)).collect();

    let clusters = cluster(&points, DEFAULT_THRESHOLD).unwrap();
    assert_eq!(clusters.len(), 1);

    let zones = ZoneBuilder::default().build(&points).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].boundary, vec![points[0], points[4]]);
    assert!(zones[0].is_degenerate());
}

#[test]
fn test_all_identical_points() {
    let points = vec![Point::new(46.77, 23.59); 6];
    let zones = ZoneBuilder::default().build(&points).unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].markers, 6);
    assert_eq!(zones[0].boundary, vec![Point::new(46.77, 23.59)]);
}

#[test]
fn test_partition_property() {
    let mut rng = XorShiftRng::seed_from_u64(7);
    for _ in 0..20 {
        let count = rng.gen_range(0..120);
        let points = random_points(&mut rng, count);
        let clusters = cluster_indices(&points, DEFAULT_THRESHOLD).unwrap();

        let mut seen = vec![0usize; points.len()];
        for (label, members) in &clusters {
            assert!(!members.is_empty());
            assert_eq!(members[0], *label);
            for &i in members {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
        assert!(clusters.len() <= points.len());
    }
}

#[test]
fn test_threshold_monotonicity() {
    let mut rng = XorShiftRng::seed_from_u64(11);
    let points = random_points(&mut rng, 150);
    let thresholds = [0.0, 0.001, 0.002, 0.004, 0.008, 0.02];

    for pair in thresholds.windows(2) {
        let fine = cluster_indices(&points, pair[0]).unwrap();
        let coarse = cluster_indices(&points, pair[1]).unwrap();

        let mut coarse_label: HashMap<usize, usize> = HashMap::new();
        for (label, members) in &coarse {
            for &i in members {
                coarse_label.insert(i, *label);
            }
        }

        for members in fine.values() {
            let label = coarse_label[&members[0]];
            assert!(members.iter().all(|i| coarse_label[i] == label));
        }
        assert!(coarse.len() <= fine.len());
    }
}

#[test]
fn test_order_independence() {
    let mut rng = XorShiftRng::seed_from_u64(23);
    let points = random_points(&mut rng, 100);

    let reference: Vec<Vec<Point>> = cluster(&points, DEFAULT_THRESHOLD)
        .unwrap()
        .into_values()
        .collect();

    for _ in 0..10 {
        let mut shuffled = points.clone();
        shuffled.shuffle(&mut rng);
        let permuted: Vec<Vec<Point>> = cluster(&shuffled, DEFAULT_THRESHOLD)
            .unwrap()
            .into_values()
            .collect();
        assert_eq!(zone_set(&permuted), zone_set(&reference));

        let zones = ZoneBuilder::default().build(&shuffled).unwrap();
        let expected = ZoneBuilder::default().build(&points).unwrap();
        assert_eq!(zone_set(&boundaries(&zones)), zone_set(&boundaries(&expected)));
    }
}

#[test]
fn test_hull_contains_cluster() {
    let mut rng = XorShiftRng::seed_from_u64(31);
    let points = random_points(&mut rng, 200);

    for members in cluster(&points, DEFAULT_THRESHOLD).unwrap().into_values() {
        if members.len() < 4 {
            continue;
        }
        let hull = boundary(members.clone());
        if hull.len() < 3 {
            continue;
        }

        for p in &members {
            for i in 0..hull.len() {
                let a = hull[i];
                let b = hull[(i + 1) % hull.len()];
                assert!(
                    turn(a, b, *p) <= 1e-12,
                    "{:?} lies outside hull edge {:?} -> {:?}",
                    p,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_hull_matches_geo_convex_hull_area() {
    let mut rng = XorShiftRng::seed_from_u64(47);

    for _ in 0..25 {
        let count = rng.gen_range(4..60);
        let points: Vec<Point> = (0..count)
            .map(|_| Point::new(rng.gen_range(0.0..0.0025), rng.gen_range(0.0..0.0025)))
            .collect();

        let zones = ZoneBuilder::default().build(&points).unwrap();
        assert_eq!(zones.len(), 1);

        let Geometry::Polygon(ours) = zones[0].to_geometry() else {
            panic!("Expected a polygon");
        };
        let reference = MultiPoint::from(
            points
                .iter()
                .map(|p| geo::Point::from(p.to_coord()))
                .collect::<Vec<_>>(),
        )
        .convex_hull();

        let diff = (ours.unsigned_area() - reference.unsigned_area()).abs();
        assert!(diff < 1e-15, "area mismatch: {}", diff);
    }
}

#[test]
fn test_small_clusters_are_verbatim() {
    let mut rng = XorShiftRng::seed_from_u64(59);
    let points = random_points(&mut rng, 80);

    for members in cluster(&points, 0.002).unwrap().into_values() {
        if members.len() < 4 {
            assert_eq!(boundary(members.clone()), members);
        }
    }
}

#[test]
fn test_malformed_snapshot_fails_atomically() {
    let records = [
        "46.7874&23.6018&robbery&2020-08-17&10:32:55",
        "46.7875&&theft&2020-08-18&09:12:00",
        "end",
    ];
    let result = build_zones(records, DEFAULT_THRESHOLD);
    assert!(matches!(
        result,
        Err(ZoneError::InvalidCoordinate {
            record: 1,
            field: "longitude",
            ..
        })
    ));
}
