use ordered_float::NotNan;

use crate::geometry::primitives::Contour;

/// One packable unit: an irregular shape identified by id, with a demanded
/// number of copies for production runs.
#[derive(Clone, Debug)]
pub struct Part {
    pub id: String,
    /// Boundary of the part, in its own (untranslated) coordinates.
    pub contour: Contour,
    /// Unrotated bounding-box extents.
    pub width: f64,
    pub height: f64,
    /// True polygon area, fixed at ingestion.
    pub area: f64,
    /// Copies requested in production mode.
    pub quantity: usize,
}

impl Part {
    pub fn new(id: impl Into<String>, contour: Contour, quantity: usize) -> Self {
        let width = contour.bbox.width();
        let height = contour.bbox.height();
        let area = contour.area;
        Part {
            id: id.into(),
            contour,
            width,
            height,
            area,
            quantity,
        }
    }

    pub fn clone_with_id(&self, id: impl Into<String>) -> Part {
        Part {
            id: id.into(),
            ..self.clone()
        }
    }
}

/// Sorts parts by descending area. Larger parts placed first generally pack
/// tighter; the packers themselves stay order-sensitive and leave ordering to
/// the caller.
pub fn sort_largest_first(parts: &mut [Part]) {
    parts.sort_by_key(|p| std::cmp::Reverse(NotNan::new(p.area).expect("part area is NaN")));
}
