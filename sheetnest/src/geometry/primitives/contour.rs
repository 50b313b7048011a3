use anyhow::{Result, bail, ensure};
use itertools::Itertools;

use crate::geometry::primitives::{Point, Rect};

/// Closed boundary of a part: a simple polygon without holes.
///
/// Vertices are stored counterclockwise; area and bounding box are computed
/// once at construction and kept alongside the vertices.
#[derive(Clone, Debug)]
pub struct Contour {
    pub vertices: Vec<Point>,
    pub bbox: Rect,
    pub area: f64,
}

impl Contour {
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        ensure!(
            vertices.len() >= 3,
            "contour must have at least 3 vertices, got {}",
            vertices.len()
        );
        ensure!(
            vertices.iter().unique().count() == vertices.len(),
            "contour contains duplicate vertices"
        );

        let area = match Self::signed_area(&vertices) {
            a if a == 0.0 => bail!("contour has no area"),
            a if a < 0.0 => {
                //normalize to counterclockwise winding
                vertices.reverse();
                -a
            }
            a => a,
        };
        let bbox = Self::bounding_box(&vertices)?;

        Ok(Contour {
            vertices,
            bbox,
            area,
        })
    }

    /// Shoelace formula: counterclockwise winding yields a positive area.
    pub fn signed_area(vertices: &[Point]) -> f64 {
        let mut sigma = 0.0;
        for i in 0..vertices.len() {
            let j = (i + 1) % vertices.len();
            let Point(x_i, y_i) = vertices[i];
            let Point(x_j, y_j) = vertices[j];
            sigma += x_i * y_j - x_j * y_i;
        }
        0.5 * sigma
    }

    pub fn bounding_box(vertices: &[Point]) -> Result<Rect> {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);
        for p in vertices {
            x_min = x_min.min(p.0);
            y_min = y_min.min(p.1);
            x_max = x_max.max(p.0);
            y_max = y_max.max(p.1);
        }
        Rect::try_new(x_min, y_min, x_max, y_max)
    }

    pub fn centroid(&self) -> Point {
        let mut c_x = 0.0;
        let mut c_y = 0.0;
        for i in 0..self.vertices.len() {
            let j = (i + 1) % self.vertices.len();
            let Point(x_i, y_i) = self.vertices[i];
            let Point(x_j, y_j) = self.vertices[j];
            let w = x_i * y_j - x_j * y_i;
            c_x += (x_i + x_j) * w;
            c_y += (y_i + y_j) * w;
        }
        Point(c_x / (6.0 * self.area), c_y / (6.0 * self.area))
    }

    /// Point containment via the crossing-number test.
    ///
    /// The strict/non-strict comparison asymmetry keeps rays through vertices
    /// from being counted twice.
    pub fn contains(&self, p: Point) -> bool {
        if !self.bbox.contains(p) {
            return false;
        }
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let Point(x_i, y_i) = self.vertices[i];
            let Point(x_j, y_j) = self.vertices[j];
            if (y_i > p.1) != (y_j > p.1) {
                let x_cross = x_i + (p.1 - y_i) * (x_j - x_i) / (y_j - y_i);
                if p.0 < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Rigid rotation of the contour around `pivot` by `degrees`.
    pub fn rotated_about(&self, pivot: Point, degrees: f64) -> Contour {
        let angle = degrees.to_radians();
        let vertices = self
            .vertices
            .iter()
            .map(|p| p.rotated_about(pivot, angle))
            .collect_vec();
        let bbox = Self::bounding_box(&vertices).expect("rotation collapsed bounding box");
        Contour {
            vertices,
            bbox,
            area: self.area,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Contour {
        let vertices = self
            .vertices
            .iter()
            .map(|p| p.translated(dx, dy))
            .collect_vec();
        let bbox = Rect {
            x_min: self.bbox.x_min + dx,
            y_min: self.bbox.y_min + dy,
            x_max: self.bbox.x_max + dx,
            y_max: self.bbox.y_max + dy,
        };
        Contour {
            vertices,
            bbox,
            area: self.area,
        }
    }

    /// True if no two non-adjacent edges cross. Adjacent edges share a vertex
    /// and are skipped.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a1 = self.vertices[i];
            let a2 = self.vertices[(i + 1) % n];
            for j in i + 1..n {
                if (j + 1) % n == i || (i + 1) % n == j {
                    continue;
                }
                let b1 = self.vertices[j];
                let b2 = self.vertices[(j + 1) % n];
                if segments_intersect(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }

}

fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}
