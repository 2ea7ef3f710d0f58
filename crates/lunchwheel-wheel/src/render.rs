//! Drawing commands for the wheel.
//!
//! [`render`] is a pure read of the candidate set and a rotation; it returns
//! positioned sectors and labels that a front end paints however it likes.
//! [`WheelDrawing::to_svg`] is one such painter.

use std::f64::consts::PI;
use std::fmt::Write as _;

use crate::geometry::{sectors, POINTER_ANGLE};
use crate::sampler::CandidateSet;

/// Alternating sector fills: soft emerald and off-white.
pub const PALETTE: [&str; 2] = ["#d1fae5", "#f8fafc"];

const RIM_COLOR: &str = "#475569";
const LABEL_COLOR: &str = "#1e293b";
const POINTER_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Width and height of the square canvas.
    pub size: f64,
    /// Gap between the rim and the canvas edge.
    pub padding: f64,
    /// Labels are cut to this many characters.
    pub label_chars: usize,
    /// Distance from the rim to the (right-aligned) end of each label.
    pub label_inset: f64,
    pub hub_radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 500.0,
            padding: 10.0,
            label_chars: 8,
            label_inset: 10.0,
            hub_radius: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self {
            x: center.x + radius * angle.cos(),
            y: center.y + radius * angle.sin(),
        }
    }
}

/// One sector as it appears on screen, already rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorDrawing {
    pub index: usize,
    /// Screen-frame start angle (unrotated start + rotation).
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: &'static str,
    pub label: String,
    /// Angle of the label baseline; the text runs outward along it.
    pub label_angle: f64,
    /// Where the label's trailing edge sits.
    pub label_anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WheelDrawing {
    pub size: f64,
    pub center: Point,
    pub radius: f64,
    pub hub_radius: f64,
    pub rotation: f64,
    /// Tip of the fixed pointer on the rim.
    pub pointer: Point,
    pub sectors: Vec<SectorDrawing>,
}

/// Lays out every candidate's sector and label for the given rotation.
#[must_use]
pub fn render(candidates: &CandidateSet, rotation: f64, options: &RenderOptions) -> WheelDrawing {
    let center = Point {
        x: options.size / 2.0,
        y: options.size / 2.0,
    };
    let radius = (options.size / 2.0 - options.padding).max(0.0);

    let sectors = sectors(candidates.len())
        .into_iter()
        .zip(candidates.iter())
        .map(|(sector, place)| {
            let label_angle = sector.bisector() + rotation;
            SectorDrawing {
                index: sector.index,
                start_angle: sector.start + rotation,
                end_angle: sector.end + rotation,
                fill: PALETTE[sector.index % PALETTE.len()],
                label: place.label(options.label_chars),
                label_angle,
                label_anchor: Point::polar(center, radius - options.label_inset, label_angle),
            }
        })
        .collect();

    WheelDrawing {
        size: options.size,
        center,
        radius,
        hub_radius: options.hub_radius,
        rotation,
        pointer: Point::polar(center, radius, POINTER_ANGLE),
        sectors,
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl WheelDrawing {
    /// Export to an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let Point { x: cx, y: cy } = self.center;
        let mut svg = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.2} {size:.2}">
"#,
            size = self.size
        );

        if self.sectors.len() == 1 {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{}" stroke="rgba(0,0,0,0.1)" stroke-width="0.5"/>"#,
                self.radius, self.sectors[0].fill
            );
        } else {
            for sector in &self.sectors {
                let from = Point::polar(self.center, self.radius, sector.start_angle);
                let to = Point::polar(self.center, self.radius, sector.end_angle);
                let large_arc = u8::from(sector.end_angle - sector.start_angle > PI);
                let _ = writeln!(
                    svg,
                    r#"  <path d="M {cx:.2} {cy:.2} L {:.2} {:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {:.2} {:.2} Z" fill="{}" stroke="rgba(0,0,0,0.1)" stroke-width="0.5"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    sector.fill,
                    r = self.radius,
                );
            }
        }

        for sector in &self.sectors {
            let a = sector.label_anchor;
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" transform="rotate({:.2} {:.2} {:.2})" text-anchor="end" dominant-baseline="middle" font-family="'Noto Sans KR', sans-serif" font-weight="bold" font-size="14" fill="{LABEL_COLOR}">{}</text>"#,
                a.x,
                a.y,
                sector.label_angle.to_degrees(),
                a.x,
                a.y,
                escape_xml(&sector.label)
            );
        }

        let _ = writeln!(
            svg,
            r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="none" stroke="{RIM_COLOR}" stroke-width="2"/>"#,
            self.radius
        );
        let _ = writeln!(
            svg,
            r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{RIM_COLOR}"/>"#,
            self.hub_radius
        );

        // Pointer: a downward triangle straddling the rim at the top.
        let tip = self.pointer;
        let half = 9.0;
        let _ = writeln!(
            svg,
            r#"  <polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{POINTER_COLOR}"/>"#,
            tip.x - half,
            tip.y - half,
            tip.x + half,
            tip.y - half,
            tip.x,
            tip.y + half
        );

        svg.push_str("</svg>\n");
        svg
    }
}
