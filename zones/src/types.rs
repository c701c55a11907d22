//! Types de données pour le crate zones

use std::cmp::Ordering;
use std::str::FromStr;

use geo::{Coord, Geometry, LineString, MultiPoint, Point as GeoPoint, Polygon};

/// Position d'un marqueur (latitude, longitude) en degrés
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub long: f64,
}

impl Point {
    pub const fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Carré de la distance euclidienne, dans l'unité des coordonnées
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dlat = self.lat - other.lat;
        let dlong = self.long - other.long;
        dlat * dlat + dlong * dlong
    }

    /// Ordre lexicographique total (latitude puis longitude)
    pub fn lexicographic_cmp(&self, other: &Point) -> Ordering {
        self.lat
            .total_cmp(&other.lat)
            .then_with(|| self.long.total_cmp(&other.long))
    }

    /// Coordonnée `geo` dans l'ordre GeoJSON (x = longitude, y = latitude)
    pub fn to_coord(self) -> Coord {
        Coord {
            x: self.long,
            y: self.lat,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, long): (f64, f64)) -> Self {
        Self { lat, long }
    }
}

/// Un incident signalé
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position de l'incident
    pub position: Point,

    /// Catégorie (ex: "robbery")
    pub kind: String,

    /// Date de soumission telle que fournie par la source (YYYY-MM-DD)
    pub submit_date: String,

    /// Heure de soumission telle que fournie par la source (HH:MM:SS)
    pub submit_time: String,
}

impl Marker {
    /// Région du marqueur
    pub fn region(&self) -> Region {
        Region::of(self.position)
    }
}

/// Zone de danger dérivée d'un cluster de marqueurs
///
/// Pour un cluster de moins de 4 points, `boundary` reprend les points tels quels.
/// Sinon c'est l'enveloppe convexe, fermée implicitement.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub boundary: Vec<Point>,

    /// Nombre de marqueurs du cluster d'origine
    pub markers: usize,
}

impl Zone {
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Vrai si la zone ne forme pas une surface (moins de 3 sommets distincts)
    pub fn is_degenerate(&self) -> bool {
        let mut distinct: Vec<Point> = self.boundary.clone();
        distinct.sort_by(Point::lexicographic_cmp);
        distinct.dedup();
        distinct.len() < 3
    }

    /// Géométrie `geo` de la zone: Polygon si possible, MultiPoint sinon
    pub fn to_geometry(&self) -> Geometry {
        if self.is_degenerate() {
            return Geometry::MultiPoint(MultiPoint::new(
                self.boundary
                    .iter()
                    .map(|p| GeoPoint::from(p.to_coord()))
                    .collect(),
            ));
        }

        // LineString::new ne ferme pas l'anneau, Polygon::new s'en charge
        let exterior: Vec<Coord> = self.boundary.iter().map(|p| p.to_coord()).collect();
        Geometry::Polygon(Polygon::new(LineString::new(exterior), vec![]))
    }
}

/// Région de requête: parties entières (tronquées vers zéro) d'une position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub lat: i64,
    pub long: i64,
}

impl Region {
    pub const fn new(lat: i64, long: i64) -> Self {
        Self { lat, long }
    }

    /// Région contenant `point`
    pub fn of(point: Point) -> Self {
        Self {
            lat: point.lat.trunc() as i64,
            long: point.long.trunc() as i64,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        Self::of(point) == *self
    }

    /// Clé textuelle de la région, voir [`region_key`]
    pub fn key(&self) -> String {
        format!("{}{}", self.lat, self.long)
    }
}

impl FromStr for Region {
    type Err = String;

    /// `"46,23"` ou `"46.79,23.60"` (tronqué)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, long) = s
            .split_once(',')
            .ok_or_else(|| format!("Invalid region {:?}. Use: LAT,LONG", s))?;
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("Invalid region coordinate {:?}", raw.trim()))
        };
        Ok(Self::of(Point::new(parse(lat)?, parse(long)?)))
    }
}

/// Clé de région: parties entières de la latitude et de la longitude, concaténées
///
/// `46.7874, 23.6018` donne `"4623"`.
pub fn region_key(lat: f64, long: f64) -> String {
    Region::of(Point::new(lat, long)).key()
}
