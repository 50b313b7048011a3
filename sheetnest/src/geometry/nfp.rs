//! No-fit polygon computation on convex hulls.
//!
//! The NFP of a stationary shape S and an orbiting shape O is the locus of
//! positions of O's reference point at which O touches S; its interior is the
//! set of positions where the two shapes overlap. For convex shapes the NFP
//! is the Minkowski sum S ⊕ (−O), computed in O(n + m) by merging the edge
//! vectors of both polygons in angular order.

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::primitives::Point;

/// No-fit polygon of two convex shapes, counterclockwise.
#[derive(Clone, Debug)]
pub struct Nfp {
    pub vertices: Vec<Point>,
}

impl Nfp {
    /// Computes the NFP of two convex polygons.
    ///
    /// `orbiting` must be given relative to its reference point (the point
    /// that a placement translation positions), i.e. with the reference at
    /// the origin. Returns `None` for degenerate inputs.
    pub fn of_convex(stationary: &[Point], orbiting: &[Point]) -> Option<Nfp> {
        let reflected = orbiting.iter().map(|&Point(x, y)| Point(-x, -y)).collect_vec();
        minkowski_sum_convex(stationary, &reflected).map(|vertices| Nfp { vertices })
    }

    /// True if `p` lies strictly inside the NFP, i.e. placing the orbiting
    /// shape's reference point there would overlap the stationary shape.
    pub fn contains_interior(&self, p: Point, eps: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
            if cross <= eps {
                return false;
            }
        }
        true
    }
}

/// Minkowski sum of two convex polygons by merging their edge vectors in
/// angular order. Both inputs must be counterclockwise convex polygons.
fn minkowski_sum_convex(a: &[Point], b: &[Point]) -> Option<Vec<Point>> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let start_a = bottom_left_index(a);
    let start_b = bottom_left_index(b);

    let edge = |poly: &[Point], offset: usize, k: usize| -> (f64, f64) {
        let i = (offset + k) % poly.len();
        let j = (offset + k + 1) % poly.len();
        (poly[j].0 - poly[i].0, poly[j].1 - poly[i].1)
    };

    let mut vertices = Vec::with_capacity(a.len() + b.len());
    let mut current = Point(a[start_a].0 + b[start_b].0, a[start_a].1 + b[start_b].1);
    vertices.push(current);

    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() || j < b.len() {
        let step = if j >= b.len() {
            let e = edge(a, start_a, i);
            i += 1;
            e
        } else if i >= a.len() {
            let e = edge(b, start_b, j);
            j += 1;
            e
        } else {
            let e_a = edge(a, start_a, i);
            let e_b = edge(b, start_b, j);
            let cross = e_a.0 * e_b.1 - e_a.1 * e_b.0;
            if cross > 0.0 {
                i += 1;
                e_a
            } else if cross < 0.0 {
                j += 1;
                e_b
            } else {
                //parallel edges advance together
                i += 1;
                j += 1;
                (e_a.0 + e_b.0, e_a.1 + e_b.1)
            }
        };
        current = Point(current.0 + step.0, current.1 + step.1);
        vertices.push(current);
    }

    //the walk closes back onto the starting vertex
    vertices.pop();
    Some(vertices)
}

/// Index of the bottom-most (then left-most) vertex: the canonical starting
/// point for the angular edge merge.
fn bottom_left_index(poly: &[Point]) -> usize {
    poly.iter()
        .position_min_by_key(|p| (OrderedFloat(p.1), OrderedFloat(p.0)))
        .expect("polygon is empty")
}
