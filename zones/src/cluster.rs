//! Regroupement des marqueurs par proximité
//!
//! Deux points sont voisins si le carré de leur distance euclidienne est inférieur
//! ou égal au carré du seuil. Les clusters sont les composantes connexes de cette
//! relation, calculées par union-find sur les indices des points.

use std::collections::BTreeMap;

use tracing::debug;

use crate::types::Point;
use crate::ZoneError;

/// Seuil de proximité par défaut, en degrés
pub const DEFAULT_THRESHOLD: f64 = 0.004;

/// Clusters indexés par leur label (plus petit indice de point du cluster)
pub type Clusters = BTreeMap<usize, Vec<Point>>;

/// Forêt union-find sur des indices de points, propre à un seul appel
#[derive(Debug, Clone)]
pub struct LabelForest {
    parent: Vec<usize>,
}

impl LabelForest {
    /// Chaque indice est initialement son propre représentant
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Représentant de `index`, en compressant le chemin parcouru
    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Fusionne les ensembles de `a` et `b`; le plus grand représentant pointe vers le plus petit
    ///
    /// Renvoie `false` si les deux indices étaient déjà dans le même ensemble.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        let (smaller, larger) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[larger] = smaller;
        true
    }
}

fn check_threshold(threshold: f64) -> Result<(), ZoneError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(ZoneError::InvalidThreshold(threshold))
    }
}

/// Partitionne les indices de `points` en clusters de proximité
///
/// Balayage O(n²) de toutes les paires.
pub fn cluster_indices(
    points: &[Point],
    threshold: f64,
) -> Result<BTreeMap<usize, Vec<usize>>, ZoneError> {
    check_threshold(threshold)?;

    let threshold_sq = threshold * threshold;
    let mut forest = LabelForest::new(points.len());
    let mut merges = 0usize;

    for i in 0..points.len() {
        for j in 0..i {
            if points[i].distance_squared(&points[j]) <= threshold_sq && forest.union(i, j) {
                merges += 1;
            }
        }
    }

    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..points.len() {
        let label = forest.find(i);
        clusters.entry(label).or_default().push(i);
    }

    debug!(
        points = points.len(),
        merges,
        clusters = clusters.len(),
        threshold,
        "Clustered markers"
    );

    Ok(clusters)
}

/// Partitionne `points` en clusters de proximité
///
/// Dans chaque cluster, les points gardent leur ordre d'entrée.
pub fn cluster(points: &[Point], threshold: f64) -> Result<Clusters, ZoneError> {
    Ok(cluster_indices(points, threshold)?
        .into_iter()
        .map(|(label, members)| (label, members.into_iter().map(|i| points[i]).collect()))
        .collect())
}
