//! SVG previews of packed sheets.

use std::collections::HashMap;

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Rectangle};

use crate::entities::{Part, Placement, Sheet};
use crate::geometry::offset::inflate;
use crate::sched::base_id;

/// Renders one sheet's placements. Part lookup uses base ids, so production
/// instances ("id#copy") resolve to their original part.
pub fn sheet_to_svg(
    sheet: &Sheet,
    placements: &[Placement],
    parts: &[Part],
    spacing: f64,
) -> Document {
    let parts_by_id: HashMap<&str, &Part> =
        parts.iter().map(|p| (p.id.as_str(), p)).collect();

    let stroke_width = (sheet.width.min(sheet.height) * 0.003).max(0.01);

    //sheet coordinates are y-up; svg is y-down
    let mut canvas = Group::new().set(
        "transform",
        format!("translate(0,{}) scale(1,-1)", sheet.height),
    );

    canvas = canvas.add(
        Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", sheet.width)
            .set("height", sheet.height)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", stroke_width),
    );

    for placement in placements {
        let Some(part) = parts_by_id.get(base_id(&placement.id)) else {
            continue;
        };
        //the placement pivot is the inflated contour's centroid; rebuild it
        //so the bare outline lands exactly where the raster did
        let Ok(inflated) = inflate(&part.contour, spacing / 2.0) else {
            continue;
        };
        let placed = part
            .contour
            .rotated_about(inflated.centroid(), placement.rotation)
            .translated(placement.x, placement.y);

        let mut data = Data::new();
        let mut vertices = placed.vertices.iter();
        if let Some(first) = vertices.next() {
            data = data.move_to((first.0, first.1));
            for v in vertices {
                data = data.line_to((v.0, v.1));
            }
            data = data.close();
        }

        canvas = canvas.add(
            Path::new()
                .set("d", data)
                .set("fill", "lightgray")
                .set("stroke", "black")
                .set("stroke-width", stroke_width),
        );
    }

    Document::new()
        .set("viewBox", (0.0, 0.0, sheet.width, sheet.height))
        .add(canvas)
}
