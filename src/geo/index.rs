//! Planar nearest-neighbour index (2-d tree)
//!
//! Built once per run from the reference locations and never mutated, so a
//! single index can be shared by reference across worker threads.

use super::ReferenceLocation;
use crate::error::{LocphraseError, Result};

#[derive(Debug, Clone)]
struct KdNode {
    point: [f64; 2],
    /// Position of the location in the input slice
    location: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Immutable lookup of the closest reference location
#[derive(Debug, Clone)]
pub struct LocationIndex {
    locations: Vec<ReferenceLocation>,
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

impl LocationIndex {
    /// Build a balanced tree over `locations`
    ///
    /// Fails on an empty slice or a non-finite coordinate.
    pub fn build(locations: Vec<ReferenceLocation>) -> Result<Self> {
        if locations.is_empty() {
            return Err(LocphraseError::NoReferenceLocations);
        }
        if let Some((index, loc)) = locations
            .iter()
            .enumerate()
            .find(|(_, l)| !(l.lat.is_finite() && l.lon.is_finite()))
        {
            return Err(LocphraseError::InvalidCoordinate {
                index,
                lat: loc.lat,
                lon: loc.lon,
            });
        }

        let mut order: Vec<usize> = (0..locations.len()).collect();
        let mut nodes = Vec::with_capacity(locations.len());
        let root = build_subtree(&locations, &mut order, 0, &mut nodes);

        Ok(Self {
            locations,
            nodes,
            root,
        })
    }

    /// Index of the closest location to `(lat, lon)`
    ///
    /// Equidistant locations resolve to the one listed first. Returns `None`
    /// for a non-finite query.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<usize> {
        if !(lat.is_finite() && lon.is_finite()) {
            return None;
        }
        let mut best: Option<(f64, usize)> = None;
        if let Some(root) = self.root {
            self.search(root, [lat, lon], &mut best);
        }
        best.map(|(_, location)| location)
    }

    /// The reference locations in input order
    pub fn locations(&self) -> &[ReferenceLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn search(&self, node_id: usize, query: [f64; 2], best: &mut Option<(f64, usize)>) {
        let node = &self.nodes[node_id];
        let d = distance_sq(node.point, query);
        let better = match *best {
            None => true,
            Some((best_d, best_loc)) => d < best_d || (d == best_d && node.location < best_loc),
        };
        if better {
            *best = Some((d, node.location));
        }

        let diff = query[node.axis] - node.point[node.axis];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.search(near, query, best);
        }
        if let Some(far) = far {
            // `<=` keeps equidistant candidates on the far side reachable
            if best.map_or(true, |(best_d, _)| diff * diff <= best_d) {
                self.search(far, query, best);
            }
        }
    }
}

fn point(loc: &ReferenceLocation) -> [f64; 2] {
    [loc.lat, loc.lon]
}

fn distance_sq(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

fn build_subtree(
    locations: &[ReferenceLocation],
    order: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> Option<usize> {
    if order.is_empty() {
        return None;
    }

    let axis = depth % 2;
    order.sort_by(|&a, &b| {
        point(&locations[a])[axis]
            .total_cmp(&point(&locations[b])[axis])
            .then(a.cmp(&b))
    });
    let median = order.len() / 2;
    let location = order[median];

    let id = nodes.len();
    nodes.push(KdNode {
        point: point(&locations[location]),
        location,
        axis,
        left: None,
        right: None,
    });

    let (lower, rest) = order.split_at_mut(median);
    let upper = &mut rest[1..];
    let left = build_subtree(locations, lower, depth + 1, nodes);
    let right = build_subtree(locations, upper, depth + 1, nodes);
    nodes[id].left = left;
    nodes[id].right = right;

    Some(id)
}
