//! Geometric primitives and the polygon operations the nesting engine needs.

pub mod convex_hull;
pub mod nfp;
pub mod offset;
pub mod primitives;

#[doc(inline)]
pub use primitives::{Contour, Point, Rect};
