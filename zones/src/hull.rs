//! Contour des zones: enveloppe convexe par chaîne monotone
//!
//! Les calculs d'orientation se font dans le repère (x = latitude, y = longitude).
//! Dans ce repère l'enveloppe est parcourue dans le sens horaire, ce qui donne le
//! sens anti-horaire sur une carte (x = longitude, y = latitude), en partant du
//! plus petit point lexicographique.

use crate::types::Point;

/// En dessous de ce nombre de points, un cluster est renvoyé tel quel
pub const MIN_HULL_POINTS: usize = 4;

/// Produit vectoriel de (A, B, C) dans le repère (latitude, longitude)
///
/// Positif: C est à gauche de A→B. Nul: points alignés.
pub fn turn(a: Point, b: Point, c: Point) -> f64 {
    (a.lat * b.long + b.lat * c.long + c.lat * a.long)
        - (a.lat * c.long + c.lat * b.long + b.lat * a.long)
}

/// Contour d'un cluster: les points inchangés sous [`MIN_HULL_POINTS`], l'enveloppe convexe sinon
pub fn boundary(points: Vec<Point>) -> Vec<Point> {
    if points.len() < MIN_HULL_POINTS {
        return points;
    }
    convex_hull(points)
}

/// Enveloppe convexe (Andrew, chaîne monotone)
///
/// Les doublons et les points alignés sur un bord sont éliminés. Si moins de
/// 3 points distincts subsistent, ils sont renvoyés triés; des points tous
/// alignés se réduisent à leurs deux extrémités.
pub fn convex_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(Point::lexicographic_cmp);
    points.dedup();

    if points.len() < 3 {
        return points;
    }

    let mut chain: Vec<Point> = Vec::with_capacity(points.len() + 1);

    // Chaîne inférieure, de gauche à droite
    for &candidate in &points {
        while chain.len() >= 2
            && turn(chain[chain.len() - 2], chain[chain.len() - 1], candidate) >= 0.0
        {
            chain.pop();
        }
        chain.push(candidate);
    }

    // Chaîne supérieure, de droite à gauche, sans dépiler la chaîne inférieure
    let floor = chain.len() + 1;
    for &candidate in points.iter().rev().skip(1) {
        while chain.len() >= floor
            && turn(chain[chain.len() - 2], chain[chain.len() - 1], candidate) >= 0.0
        {
            chain.pop();
        }
        chain.push(candidate);
    }

    // Le dernier point referme sur le premier
    chain.pop();
    chain
}
