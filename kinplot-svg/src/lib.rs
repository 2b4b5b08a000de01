//! SVG export for kinplot diagrams
//!
//! `SvgSurface` projects every draw call with the configured camera and
//! emits SVG elements in draw order, so later marks are painted over
//! earlier ones.

use kinplot_core::color::{parse_color, Rgb};
use kinplot_core::geometry::{ARROW_STYLE, MUTATION_SCALE};
use kinplot_core::{Axes3, Camera, LineStyle, ScreenPoint, Shape, Style, Surface};
use nalgebra::{Point3, Vector2};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Default sizes and settings (in pixels)
mod defaults {
    pub const LINE_WIDTH: f64 = 1.5;
    pub const MARKER_SIZE: f64 = 6.0;
    pub const FONT_SIZE: f64 = 14.0;
    // Arrowhead proportions relative to the mutation scale
    pub const HEAD_LENGTH: f64 = 0.4;
    pub const HEAD_WIDTH: f64 = 0.2;
}

/// Default fill for polygons and markers without a colour
const DEFAULT_FILL: Rgb = Rgb::new(0x1f, 0x77, 0xb4);

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("draw error: {0}")]
    Draw(#[from] kinplot_core::Error),
}

/// Vector surface producing an SVG document
pub struct SvgSurface {
    width: f64,
    height: f64,
    camera: Camera,
    axes: Axes3,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_view(width, height, Camera::new(width, height), Axes3::default())
    }

    pub fn with_view(width: u32, height: u32, camera: Camera, axes: Axes3) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            camera,
            axes,
            elements: Vec::new(),
        }
    }

    /// Number of SVG elements emitted so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn project(&self, point: &Point3<f64>) -> Option<ScreenPoint> {
        self.camera.project(point, &self.axes, self.width, self.height)
    }

    /// Complete SVG document
    pub fn finish(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.2} {:.2}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SvgError> {
        let path = path.as_ref();
        std::fs::write(path, self.finish())?;
        info!(path = %path.display(), elements = self.elements.len(), "saved SVG");
        Ok(())
    }

    fn push_arrowhead(&mut self, from: Vector2<f64>, tip: Vector2<f64>, style: &Style, color: Rgb) -> Vector2<f64> {
        let scale = style.get_num(MUTATION_SCALE).unwrap_or(20.0);
        let along = tip - from;
        let len = along.norm();
        if len < 1e-9 {
            return tip;
        }
        let dir = along / len;
        let perp = Vector2::new(-dir.y, dir.x);
        let head_len = (defaults::HEAD_LENGTH * scale).min(len);
        let base = tip - dir * head_len;
        let half = defaults::HEAD_WIDTH * scale;
        let (l, r) = (base + perp * half, base - perp * half);
        self.elements.push(format!(
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{}"/>"#,
            tip.x,
            tip.y,
            l.x,
            l.y,
            r.x,
            r.y,
            color.to_hex()
        ));
        base
    }
}

fn color_or(style: &Style, default: Rgb) -> kinplot_core::Result<Rgb> {
    match style.get_str("color") {
        Some(c) => parse_color(c),
        None => Ok(default),
    }
}

fn dash_array(pattern: LineStyle, width: f64) -> Option<String> {
    let dashes: &[f64] = match pattern {
        LineStyle::Solid => return None,
        LineStyle::Dashed => &[3.7, 1.6],
        LineStyle::Dotted => &[1.0, 1.65],
        LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
    };
    let scaled: Vec<String> = dashes.iter().map(|d| format!("{:.2}", d * width)).collect();
    Some(scaled.join(","))
}

/// Escape text for use in SVG content and attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn opacity_attr(name: &str, style: &Style) -> String {
    match style.get_num("alpha") {
        Some(a) => format!(r#" {}="{:.3}""#, name, a.clamp(0.0, 1.0)),
        None => String::new(),
    }
}

impl Surface for SvgSurface {
    fn fill_polygon(&mut self, points: &[Point3<f64>], style: &Style) -> kinplot_core::Result<()> {
        let color = color_or(style, DEFAULT_FILL)?;
        let projected: Option<Vec<ScreenPoint>> = points.iter().map(|p| self.project(p)).collect();
        let Some(projected) = projected else {
            warn!(points = points.len(), "polygon outside the view, skipped");
            return Ok(());
        };
        let coords: Vec<String> = projected
            .iter()
            .map(|s| format!("{:.2},{:.2}", s.x, s.y))
            .collect();
        self.elements.push(format!(
            r#"<polygon points="{}" fill="{}"{} stroke="none"/>"#,
            coords.join(" "),
            color.to_hex(),
            opacity_attr("fill-opacity", style)
        ));
        Ok(())
    }

    fn polyline(&mut self, points: &[Point3<f64>], style: &Style) -> kinplot_core::Result<()> {
        let color = color_or(style, Rgb::BLACK)?;
        let width = style.get_num("linewidth").unwrap_or(defaults::LINE_WIDTH);
        let pattern = LineStyle::from_style(style)?;

        // An unprojectable vertex splits the line into separate runs
        let mut runs: Vec<Vec<Vector2<f64>>> = vec![Vec::new()];
        for p in points {
            match self.project(p) {
                Some(s) => {
                    if let Some(run) = runs.last_mut() {
                        run.push(Vector2::new(s.x, s.y));
                    }
                }
                None => {
                    warn!(point = ?p, "polyline vertex outside the view, line split");
                    runs.push(Vec::new());
                }
            }
        }

        // The head is computed in screen space and the line stops at its base
        if style.contains(ARROW_STYLE) {
            if let Some(run) = runs.last_mut().filter(|r| r.len() >= 2) {
                let n = run.len();
                let (from, tip) = (run[n - 2], run[n - 1]);
                run[n - 1] = self.push_arrowhead(from, tip, style, color);
            }
        }

        let dash = match dash_array(pattern, width) {
            Some(d) => format!(r#" stroke-dasharray="{}""#, d),
            None => String::new(),
        };
        let opacity = opacity_attr("stroke-opacity", style);
        for run in runs.iter().filter(|r| r.len() >= 2) {
            let coords: Vec<String> = run.iter().map(|v| format!("{:.2},{:.2}", v.x, v.y)).collect();
            self.elements.push(format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}"{}{}/>"#,
                coords.join(" "),
                color.to_hex(),
                width,
                dash,
                opacity
            ));
        }
        Ok(())
    }

    fn marker(&mut self, point: &Point3<f64>, style: &Style) -> kinplot_core::Result<()> {
        let color = color_or(style, DEFAULT_FILL)?;
        let size = style.get_num("markersize").unwrap_or(defaults::MARKER_SIZE);
        let Some(s) = self.project(point) else {
            warn!(point = ?point, "marker outside the view, skipped");
            return Ok(());
        };
        let element = match style.get_str("marker") {
            Some("s") => format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                s.x - size / 2.0,
                s.y - size / 2.0,
                size,
                size,
                color.to_hex()
            ),
            _ => format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                s.x,
                s.y,
                size / 2.0,
                color.to_hex()
            ),
        };
        self.elements.push(element);
        Ok(())
    }

    fn text(&mut self, point: &Point3<f64>, label: &str, style: &Style) -> kinplot_core::Result<()> {
        let color = color_or(style, Rgb::BLACK)?;
        let size = style.get_num("fontsize").unwrap_or(defaults::FONT_SIZE);
        let Some(s) = self.project(point) else {
            warn!(label, "text anchor outside the view, skipped");
            return Ok(());
        };
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="serif" font-size="{:.2}" fill="{}">{}</text>"#,
            s.x,
            s.y,
            size,
            color.to_hex(),
            escape(label)
        ));
        Ok(())
    }
}

/// Draw a scene onto a new surface and return the SVG document
pub fn render<S: Shape>(scene: &S, width: u32, height: u32, camera: Option<Camera>, axes: Axes3) -> Result<String, SvgError> {
    let camera = camera.unwrap_or_else(|| Camera::new(width, height));
    let mut surface = SvgSurface::with_view(width, height, camera, axes);
    scene.draw(&mut surface)?;
    Ok(surface.finish())
}
