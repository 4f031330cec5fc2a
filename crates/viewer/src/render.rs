//! Read-only renderers over a tree walk.

use crate::config::RenderConfig;
use quadtree::Quadtree;
use std::fmt::Write;

const BACKGROUND: &str = "rgb(216,216,216)";
const BOUNDARY_STROKE: &str = "rgb(0,60,255)";
const POINT_STROKE: &str = "rgb(255,120,0)";

/// One line per node, indented by depth.
pub fn render_text(tree: &Quadtree) -> String {
    let mut out = String::new();
    for visit in tree.nodes() {
        let indent = "  ".repeat(visit.depth);
        let kind = if visit.is_leaf { "leaf" } else { "node" };
        // Writing into a String can't fail.
        let _ = match visit.point {
            Some(p) => writeln!(out, "{indent}{kind} [{}] point ({}, {})", visit.region, p.x, p.y),
            None => writeln!(out, "{indent}{kind} [{}]", visit.region),
        };
    }
    out
}

/// An SVG document: node boundaries in blue, stored points circled in orange.
pub fn render_svg(tree: &Quadtree, config: &RenderConfig) -> String {
    let region = tree.region();
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        region.min_x,
        region.min_y,
        region.width(),
        region.height(),
        region.width(),
        region.height(),
    );
    let _ = writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{BACKGROUND}"/>"#,
        region.min_x,
        region.min_y,
        region.width(),
        region.height(),
    );

    // Boundaries first so points stay on top.
    for (r, _) in tree.traverse() {
        let _ = writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{BOUNDARY_STROKE}" stroke-width="1"/>"#,
            r.min_x,
            r.min_y,
            r.width(),
            r.height(),
        );
    }
    for p in tree.points() {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{POINT_STROKE}" stroke-width="2"/>"#,
            p.x, p.y, config.point_radius,
        );
    }

    out.push_str("</svg>\n");
    out
}
