/// Character-cell rasterizer implementing the render surface
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use kinplot_core::color::{parse_color, Rgb};
use kinplot_core::geometry::ARROW_STYLE;
use kinplot_core::{Axes3, Camera, LineStyle, Result, ScreenPoint, Style, Surface};
use nalgebra::Point3;
use std::io::Write;
use tracing::{debug, trace};

/// Fill glyphs from most transparent to opaque
const FILL_RAMP: &[char] = &['.', ':', '+', '*', '#', '%', '@'];

/// Width of a character cell relative to its height
pub const CELL_ASPECT: f64 = 0.5;

/// Colour translucent fills are composited over
pub const BACKGROUND: Rgb = Rgb::BLACK;

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    color: Option<Rgb>,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: None,
};

/// ASCII surface that rasterizes draw calls into a grid of terminal cells.
///
/// Filled polygons go to a depth-tested fill layer; lines, markers and text
/// go to an ink layer painted in draw order on top of the fills.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    camera: Camera,
    axes: Axes3,
    depth_buffer: Vec<f64>,
    fill_buffer: Vec<Cell>,
    ink_buffer: Vec<Option<Cell>>,
}

/// Default camera whose aspect accounts for the tall character cells
pub fn cell_camera(width: usize, height: usize) -> Camera {
    let mut camera = Camera::new(width as u32, height as u32);
    camera.aspect = width as f64 * CELL_ASPECT / height.max(1) as f64;
    camera
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_view(width, height, cell_camera(width, height), Axes3::default())
    }

    /// Surface with an explicit camera and axis limits. The camera aspect is
    /// used as given.
    pub fn with_view(width: usize, height: usize, camera: Camera, axes: Axes3) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            camera,
            axes,
            depth_buffer: vec![f64::INFINITY; size],
            fill_buffer: vec![EMPTY; size],
            ink_buffer: vec![None; size],
        }
    }

    /// Glyph at a cell as it would be printed
    pub fn glyph(&self, x: usize, y: usize) -> char {
        let idx = y * self.width + x;
        match self.ink_buffer[idx] {
            Some(cell) => cell.glyph,
            None => self.fill_buffer[idx].glyph,
        }
    }

    fn project(&self, point: &Point3<f64>) -> Option<ScreenPoint> {
        self.camera
            .project(point, &self.axes, self.width as f64, self.height as f64)
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (cx, cy) = (x as usize, y as usize);
        if cx >= self.width || cy >= self.height {
            return None;
        }
        Some(cy * self.width + cx)
    }

    fn ink(&mut self, x: f64, y: f64, glyph: char, color: Option<Rgb>) {
        if let Some(idx) = self.cell_index(x, y) {
            self.ink_buffer[idx] = Some(Cell { glyph, color });
        }
    }

    fn rasterize_triangle(&mut self, v: [ScreenPoint; 3], cell: Cell) {
        let (v0, v1, v2) = (v[0], v[1], v[2]);

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.fill_buffer[idx] = cell;
                        }
                    }
                }
            }
        }
    }

    fn draw_segment(
        &mut self,
        a: ScreenPoint,
        b: ScreenPoint,
        pattern: LineStyle,
        step: &mut usize,
        color: Option<Rgb>,
    ) {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let glyph = segment_glyph(dx, dy, pattern);
        let n = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=n {
            let t = i as f64 / n as f64;
            if pattern_on(pattern, *step) {
                self.ink(a.x + dx * t, a.y + dy * t, glyph, color);
            }
            *step += 1;
        }
    }

    /// Render the surface to a writer using terminal colours
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let cell = self.ink_buffer[idx].unwrap_or(self.fill_buffer[idx]);

                match cell.color {
                    Some(rgb) => {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: rgb.r,
                            g: rgb.g,
                            b: rgb.b,
                        }))?;
                    }
                    None => {
                        writer.queue(ResetColor)?;
                    }
                }
                writer.queue(Print(cell.glyph))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Buffer contents without colours, one line per row
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| self.glyph(x, y)).collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }

    /// Write the plain buffer to a text file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_plain_string())?;
        tracing::info!(path = %path.display(), "saved text diagram");
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn fill_polygon(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()> {
        let alpha = style.get_num("alpha").unwrap_or(1.0).clamp(0.0, 1.0);
        let ramp_index = ((alpha * (FILL_RAMP.len() - 1) as f64).round() as usize).min(FILL_RAMP.len() - 1);
        let cell = Cell {
            glyph: FILL_RAMP[ramp_index],
            color: style_color(style)?.map(|c| c.blend(BACKGROUND, alpha)),
        };

        let projected: Option<Vec<ScreenPoint>> = points.iter().map(|p| self.project(p)).collect();
        let Some(projected) = projected else {
            debug!(points = points.len(), "polygon partly outside view, skipped");
            return Ok(());
        };

        // Fan triangulation around the first vertex
        for i in 1..projected.len().saturating_sub(1) {
            self.rasterize_triangle([projected[0], projected[i], projected[i + 1]], cell);
        }
        Ok(())
    }

    fn polyline(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()> {
        let color = style_color(style)?;
        let pattern = LineStyle::from_style(style)?;
        let projected: Vec<Option<ScreenPoint>> = points.iter().map(|p| self.project(p)).collect();

        let mut step = 0;
        for pair in projected.windows(2) {
            if let (Some(a), Some(b)) = (pair[0], pair[1]) {
                self.draw_segment(a, b, pattern, &mut step, color);
            }
        }

        if style.contains(ARROW_STYLE) {
            if let [.., Some(a), Some(b)] = projected.as_slice() {
                self.ink(b.x, b.y, arrowhead_glyph(b.x - a.x, b.y - a.y), color);
            }
        }
        trace!(points = points.len(), "polyline rasterized");
        Ok(())
    }

    fn marker(&mut self, point: &Point3<f64>, style: &Style) -> Result<()> {
        let color = style_color(style)?;
        let glyph = match style.get_str("marker") {
            Some(".") => '.',
            Some("x") => 'x',
            Some("+") => '+',
            Some("*") => '*',
            Some("s") => '#',
            _ => 'o',
        };
        if let Some(s) = self.project(point) {
            self.ink(s.x, s.y, glyph, color);
        }
        Ok(())
    }

    fn text(&mut self, point: &Point3<f64>, label: &str, style: &Style) -> Result<()> {
        let color = style_color(style)?;
        if let Some(s) = self.project(point) {
            for (i, glyph) in label.chars().enumerate() {
                self.ink(s.x + i as f64, s.y, glyph, color);
            }
        }
        Ok(())
    }
}

fn style_color(style: &Style) -> Result<Option<Rgb>> {
    style.get_str("color").map(parse_color).transpose()
}

fn pattern_on(pattern: LineStyle, step: usize) -> bool {
    match pattern {
        LineStyle::Solid => true,
        LineStyle::Dashed => step % 5 < 3,
        LineStyle::Dotted => step % 2 == 0,
        LineStyle::DashDot => matches!(step % 6, 0..=2 | 4),
    }
}

/// Glyph that best follows a screen-space direction (y grows downwards)
fn segment_glyph(dx: f64, dy: f64, pattern: LineStyle) -> char {
    if pattern == LineStyle::Dotted {
        return '.';
    }
    // Cells are about twice as tall as wide
    let (ax, ay) = (dx.abs() * CELL_ASPECT, dy.abs());
    if ay < ax * 0.4 {
        '-'
    } else if ax < ay * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

fn arrowhead_glyph(dx: f64, dy: f64) -> char {
    if dx.abs() * CELL_ASPECT >= dy.abs() {
        if dx >= 0.0 {
            '>'
        } else {
            '<'
        }
    } else if dy > 0.0 {
        'v'
    } else {
        '^'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let w = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w.0 > 0.0 && w.1 > 0.0 && w.2 > 0.0);
        assert!((w.0 + w.1 + w.2 - 1.0).abs() < 1e-12);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }

    #[test]
    fn test_glyph_choice() {
        assert_eq!(segment_glyph(10.0, 0.0, LineStyle::Solid), '-');
        assert_eq!(segment_glyph(0.0, 5.0, LineStyle::Solid), '|');
        assert_eq!(segment_glyph(4.0, -2.0, LineStyle::Solid), '/');
        assert_eq!(segment_glyph(4.0, 2.0, LineStyle::Solid), '\\');
        assert_eq!(segment_glyph(4.0, 2.0, LineStyle::Dotted), '.');
        assert_eq!(arrowhead_glyph(-6.0, 1.0), '<');
        assert_eq!(arrowhead_glyph(0.0, -3.0), '^');
    }

    #[test]
    fn test_dash_patterns() {
        let on: Vec<bool> = (0..5).map(|i| pattern_on(LineStyle::Dashed, i)).collect();
        assert_eq!(on, vec![true, true, true, false, false]);
        assert!((0..10).all(|i| pattern_on(LineStyle::Solid, i)));
    }

    #[test]
    fn test_translucent_fill_is_blended() {
        let mut surface = AsciiSurface::new(40, 20);
        let square = [
            Point3::new(-0.4, -0.4, 0.0),
            Point3::new(0.4, -0.4, 0.0),
            Point3::new(0.4, 0.4, 0.0),
            Point3::new(-0.4, 0.4, 0.0),
        ];
        surface
            .fill_polygon(&square, &Style::new().with("color", "#ff0000").with("alpha", 0.5))
            .unwrap();
        let filled: Vec<&Cell> = surface.fill_buffer.iter().filter(|c| c.glyph != ' ').collect();
        assert!(!filled.is_empty());
        for cell in filled {
            assert_eq!(cell.color, Some(Rgb::new(128, 0, 0)));
        }
    }
}
