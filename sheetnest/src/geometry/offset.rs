use anyhow::{Context, Result, anyhow};
use geo_buffer::buffer_polygon;
use geo_types::{LineString, MultiPolygon, Polygon as GeoPolygon};
use itertools::Itertools;
use ordered_float::NotNan;

use crate::geometry::primitives::{Contour, Point};

/// Inflates a contour outward by `distance` on every side.
///
/// Placements reserve a cutting margin by inflating each part by half the
/// configured spacing before rasterization; two inflated outlines that merely
/// touch correspond to bare outlines a full spacing apart.
///
/// Relies on the [`geo-buffer`](https://crates.io/crates/geo-buffer) crate.
/// A non-positive distance returns the contour unchanged.
pub fn inflate(contour: &Contour, distance: f64) -> Result<Contour> {
    if distance <= 0.0 {
        return Ok(contour.clone());
    }

    let exterior = LineString::from(
        contour
            .vertices
            .iter()
            .map(|&Point(x, y)| (x, y))
            .collect_vec(),
    );
    let geo_poly = GeoPolygon::new(exterior, vec![]);

    let buffered: MultiPolygon = buffer_polygon(&geo_poly, distance);

    //an outward buffer of a simple polygon yields a single exterior ring,
    //but pick the largest one to be safe
    let largest = buffered
        .0
        .iter()
        .max_by_key(|poly| {
            let pts = ring_points(poly.exterior());
            NotNan::new(Contour::signed_area(&pts).abs()).expect("buffered area is NaN")
        })
        .ok_or_else(|| anyhow!("polygon buffering produced no output"))?;

    Contour::new(ring_points(largest.exterior())).context("inflated contour is degenerate")
}

fn ring_points(ring: &LineString) -> Vec<Point> {
    let mut points = ring.0.iter().map(|c| Point(c.x, c.y)).collect_vec();
    //geo closes rings by repeating the first coordinate
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
