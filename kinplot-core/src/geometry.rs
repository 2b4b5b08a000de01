/// Array-backed primitives: planes, lines, arrows and points
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::error::{Error, Result};
use crate::style::{Style, StyleValue};
use crate::surface::Surface;
use crate::transform::{rotation, Scale, Shape};
use crate::vector::{is_finite, XAXIS, YAXIS, ZAXIS, ZERO};

/// Orientation of a canonical plane or angle, named after the coordinate
/// plane it lies in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneOrientation {
    Xy,
    Xz,
    Yz,
}

impl PlaneOrientation {
    /// Corners of the 2x2 square centred at the origin
    pub fn square(&self) -> [Point3<f64>; 4] {
        match self {
            PlaneOrientation::Xy => [
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
            ],
            PlaneOrientation::Xz => [
                Point3::new(-1.0, 0.0, -1.0),
                Point3::new(-1.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, -1.0),
            ],
            PlaneOrientation::Yz => [
                Point3::new(0.0, -1.0, -1.0),
                Point3::new(0.0, -1.0, 1.0),
                Point3::new(0.0, 1.0, 1.0),
                Point3::new(0.0, 1.0, -1.0),
            ],
        }
    }
}

impl FromStr for PlaneOrientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xy" => Ok(PlaneOrientation::Xy),
            "xz" => Ok(PlaneOrientation::Xz),
            "yz" => Ok(PlaneOrientation::Yz),
            _ => Err(Error::InvalidSelector {
                kind: "plane orientation",
                value: s.to_string(),
            }),
        }
    }
}

/// Axis-aligned unit direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    X,
    NegX,
    Y,
    NegY,
    Z,
    NegZ,
}

impl Direction {
    pub fn vector(&self) -> Vector3<f64> {
        match self {
            Direction::X => XAXIS,
            Direction::NegX => -XAXIS,
            Direction::Y => YAXIS,
            Direction::NegY => -YAXIS,
            Direction::Z => ZAXIS,
            Direction::NegZ => -ZAXIS,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Direction::X),
            "-x" => Ok(Direction::NegX),
            "y" => Ok(Direction::Y),
            "-y" => Ok(Direction::NegY),
            "z" => Ok(Direction::Z),
            "-z" => Ok(Direction::NegZ),
            _ => Err(Error::InvalidSelector {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Plane construction input: a canonical square or explicit vertices
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneShape {
    Named(PlaneOrientation),
    Points(Vec<Point3<f64>>),
}

impl From<PlaneOrientation> for PlaneShape {
    fn from(o: PlaneOrientation) -> Self {
        PlaneShape::Named(o)
    }
}

impl From<Vec<Point3<f64>>> for PlaneShape {
    fn from(points: Vec<Point3<f64>>) -> Self {
        PlaneShape::Points(points)
    }
}

/// Line or arrow construction input: a unit segment from the origin or
/// two explicit endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Named(Direction),
    Points([Point3<f64>; 2]),
}

impl Segment {
    fn endpoints(&self) -> [Point3<f64>; 2] {
        match self {
            Segment::Named(d) => [ZERO, Point3::from(d.vector())],
            Segment::Points(p) => *p,
        }
    }
}

impl From<Direction> for Segment {
    fn from(d: Direction) -> Self {
        Segment::Named(d)
    }
}

impl From<[Point3<f64>; 2]> for Segment {
    fn from(p: [Point3<f64>; 2]) -> Self {
        Segment::Points(p)
    }
}

/// Fixed-size list of points plus draw options.
///
/// Transforms act on every point; the number of points never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Point3<f64>>,
    style: Style,
}

impl PointSet {
    fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if let Some(p) = points.iter().find(|p| !is_finite(p)) {
            return Err(Error::InvalidGeometry(format!(
                "non-finite coordinate {:?}",
                p
            )));
        }
        Ok(Self {
            points,
            style: Style::new(),
        })
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    fn map(&self, f: impl Fn(&Point3<f64>) -> Point3<f64>) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
            style: self.style.clone(),
        }
    }

    pub(crate) fn rotated(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
        let rot = rotation(axis, degrees);
        self.map(|p| rot * p)
    }

    pub(crate) fn shifted(&self, offset: &Vector3<f64>) -> Self {
        self.map(|p| p + offset)
    }

    pub(crate) fn scaled(&self, factor: &Scale) -> Self {
        self.map(|p| factor.apply(p))
    }

    pub(crate) fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.set(key, value);
        self
    }

    pub(crate) fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Implements the option builders and the transform algebra for a newtype
/// over `PointSet`
macro_rules! point_set_shape {
    ($ty:ident) => {
        impl $ty {
            /// Set a single draw option
            pub fn with(self, key: &str, value: impl Into<StyleValue>) -> Self {
                Self(self.0.with(key, value))
            }

            /// Replace all draw options
            pub fn with_style(self, style: Style) -> Self {
                Self(self.0.with_style(style))
            }

            pub fn points(&self) -> &[Point3<f64>] {
                self.0.points()
            }

            pub fn style(&self) -> &Style {
                self.0.style()
            }
        }

        impl Shape for $ty {
            fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
                Self(self.0.rotated(axis, degrees))
            }

            fn shift(&self, offset: &Vector3<f64>) -> Self {
                Self(self.0.shifted(offset))
            }

            fn scale(&self, factor: impl Into<Scale>) -> Result<Self> {
                Ok(Self(self.0.scaled(&factor.into())))
            }

            fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
                trace!(kind = stringify!($ty), points = self.0.points.len(), "draw");
                self.render(surface)
            }
        }
    };
}

/// Flat polygon, normally the 4-corner outline of a rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Plane(PointSet);

impl Plane {
    pub fn new(orientation: PlaneOrientation) -> Self {
        Self(PointSet {
            points: orientation.square().to_vec(),
            style: Style::new(),
        })
    }

    /// Plane from a selector string: `"xy"`, `"xz"` or `"yz"`
    pub fn named(selector: &str) -> Result<Self> {
        Ok(Self::new(selector.parse()?))
    }

    pub fn from_shape(shape: impl Into<PlaneShape>) -> Result<Self> {
        match shape.into() {
            PlaneShape::Named(o) => Ok(Self::new(o)),
            PlaneShape::Points(points) => {
                if points.len() < 3 {
                    return Err(Error::InvalidGeometry(format!(
                        "plane needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                Ok(Self(PointSet::new(points)?))
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.fill_polygon(self.points(), self.style())
    }
}

point_set_shape!(Plane);

/// Straight segment between two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line(PointSet);

impl Line {
    /// Unit segment from the origin along `direction`
    pub fn new(direction: Direction) -> Self {
        Self(PointSet {
            points: Segment::Named(direction).endpoints().to_vec(),
            style: Style::new(),
        })
    }

    pub fn from_segment(segment: impl Into<Segment>) -> Result<Self> {
        match segment.into() {
            Segment::Named(d) => Ok(Self::new(d)),
            Segment::Points(p) => Ok(Self(PointSet::new(p.to_vec())?)),
        }
    }

    /// Unit segment from a selector string: `"x"`, `"-x"`, `"y"`, `"-y"`,
    /// `"z"` or `"-z"`
    pub fn named(selector: &str) -> Result<Self> {
        Ok(Self::new(selector.parse()?))
    }

    pub fn from_points(points: &[Point3<f64>]) -> Result<Self> {
        Ok(Self(two_points(points)?))
    }

    pub fn start(&self) -> Point3<f64> {
        self.0.points[0]
    }

    pub fn end(&self) -> Point3<f64> {
        self.0.points[1]
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.polyline(self.points(), self.style())
    }
}

point_set_shape!(Line);

fn two_points(points: &[Point3<f64>]) -> Result<PointSet> {
    if points.len() != 2 {
        return Err(Error::InvalidGeometry(format!(
            "segment needs exactly 2 points, got {}",
            points.len()
        )));
    }
    PointSet::new(points.to_vec())
}

/// Segment with an arrowhead at its second point.
///
/// The head is drawn by the surface in screen space after projection, so
/// it keeps its shape from any viewpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow(PointSet);

/// Style key asking the surface for an arrowhead
pub const ARROW_STYLE: &str = "arrowstyle";
/// Style key for the arrowhead size
pub const MUTATION_SCALE: &str = "mutation_scale";

impl Arrow {
    pub fn new(direction: Direction) -> Self {
        Self(PointSet {
            points: Segment::Named(direction).endpoints().to_vec(),
            style: Style::new(),
        })
    }

    pub fn from_segment(segment: impl Into<Segment>) -> Result<Self> {
        match segment.into() {
            Segment::Named(d) => Ok(Self::new(d)),
            Segment::Points(p) => Ok(Self(PointSet::new(p.to_vec())?)),
        }
    }

    pub fn named(selector: &str) -> Result<Self> {
        Ok(Self::new(selector.parse()?))
    }

    pub fn from_points(points: &[Point3<f64>]) -> Result<Self> {
        Ok(Self(two_points(points)?))
    }

    pub fn start(&self) -> Point3<f64> {
        self.0.points[0]
    }

    pub fn end(&self) -> Point3<f64> {
        self.0.points[1]
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        let mut style = self.style().clone();
        if !style.contains(ARROW_STYLE) {
            style.set(ARROW_STYLE, "-|>");
        }
        if !style.contains(MUTATION_SCALE) {
            style.set(MUTATION_SCALE, 20.0);
        }
        surface.polyline(self.points(), &style)
    }
}

point_set_shape!(Arrow);

/// Single marker in space
#[derive(Debug, Clone, PartialEq)]
pub struct Point(PointSet);

impl Point {
    /// Point at the origin
    pub fn new() -> Self {
        Self(PointSet {
            points: vec![ZERO],
            style: Style::new(),
        })
    }

    pub fn at(position: Point3<f64>) -> Result<Self> {
        Ok(Self(PointSet::new(vec![position])?))
    }

    pub fn position(&self) -> Point3<f64> {
        self.0.points[0]
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.marker(&self.position(), self.style())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

point_set_shape!(Point);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn close(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_named_selectors() {
        assert_eq!("xz".parse::<PlaneOrientation>().unwrap(), PlaneOrientation::Xz);
        assert_eq!("-y".parse::<Direction>().unwrap(), Direction::NegY);
        assert!(matches!(
            Plane::named("zx"),
            Err(Error::InvalidSelector { kind: "plane orientation", .. })
        ));
        assert!(matches!(
            Line::named("w"),
            Err(Error::InvalidSelector { kind: "direction", .. })
        ));
    }

    #[test]
    fn test_line_x_rotated_about_z() {
        let line = Line::named("x").unwrap().rotate(&ZAXIS, 90.0);
        assert!(close(&line.start(), &Point3::new(0.0, 0.0, 0.0)));
        assert!(close(&line.end(), &Point3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_point_shift_then_scale() {
        let p = Point::new().shift(&XAXIS).scale(2.0).unwrap();
        assert!(close(&p.position(), &Point3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_plane_anisotropic_scale() {
        let plane = Plane::new(PlaneOrientation::Xy)
            .scale(0.7 * XAXIS + YAXIS + 0.7 * ZAXIS)
            .unwrap();
        assert_eq!(plane.points().len(), 4);
        assert!(close(&plane.points()[0], &Point3::new(-0.7, -1.0, 0.0)));
        assert!(close(&plane.points()[2], &Point3::new(0.7, 1.0, 0.0)));
    }

    #[test]
    fn test_explicit_geometry_validation() {
        assert!(Plane::from_shape(vec![ZERO, Point3::new(1.0, 0.0, 0.0)]).is_err());
        assert!(Line::from_points(&[ZERO]).is_err());
        assert!(Arrow::from_points(&[ZERO, Point3::new(f64::INFINITY, 0.0, 0.0)]).is_err());
        let tri = Plane::from_shape(vec![
            ZERO,
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(tri.points().len(), 3);
    }

    #[test]
    fn test_selector_table() {
        let planes = [
            ("xy", [(-1.0, -1.0, 0.0), (-1.0, 1.0, 0.0), (1.0, 1.0, 0.0), (1.0, -1.0, 0.0)]),
            ("xz", [(-1.0, 0.0, -1.0), (-1.0, 0.0, 1.0), (1.0, 0.0, 1.0), (1.0, 0.0, -1.0)]),
            ("yz", [(0.0, -1.0, -1.0), (0.0, -1.0, 1.0), (0.0, 1.0, 1.0), (0.0, 1.0, -1.0)]),
        ];
        for (selector, corners) in planes {
            let plane = Plane::named(selector).unwrap();
            assert_eq!(plane.points().len(), 4, "{}", selector);
            for (p, (x, y, z)) in plane.points().iter().zip(corners) {
                assert!(close(p, &Point3::new(x, y, z)), "{}: {:?}", selector, p);
            }
        }

        let directions = [
            ("x", (1.0, 0.0, 0.0)),
            ("-x", (-1.0, 0.0, 0.0)),
            ("y", (0.0, 1.0, 0.0)),
            ("-y", (0.0, -1.0, 0.0)),
            ("z", (0.0, 0.0, 1.0)),
            ("-z", (0.0, 0.0, -1.0)),
        ];
        for (selector, (x, y, z)) in directions {
            let line = Line::named(selector).unwrap();
            assert!(close(&line.start(), &ZERO), "{}", selector);
            assert!(close(&line.end(), &Point3::new(x, y, z)), "{}", selector);
            let arrow = Arrow::named(selector).unwrap();
            assert_eq!(arrow.points(), line.points());
        }
    }

    #[test]
    fn test_explicit_coordinates_must_be_finite() {
        let bad = Point3::new(0.0, f64::NAN, 0.0);
        assert!(matches!(Point::at(bad), Err(Error::InvalidGeometry(_))));
        assert!(matches!(Line::from_segment([ZERO, bad]), Err(Error::InvalidGeometry(_))));
        assert!(matches!(
            Arrow::from_segment([Point3::new(f64::INFINITY, 0.0, 0.0), ZERO]),
            Err(Error::InvalidGeometry(_))
        ));

        let line = Line::from_segment([ZERO, Point3::new(0.0, 2.0, 0.0)]).unwrap();
        assert!(close(&line.end(), &Point3::new(0.0, 2.0, 0.0)));
        assert_eq!(Line::from_segment(Direction::Z).unwrap(), Line::new(Direction::Z));
        assert!(close(&Point::at(Point3::new(1.0, 2.0, 3.0)).unwrap().position(), &Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_transforms_keep_style() {
        let line = Line::new(Direction::X)
            .with("color", "k")
            .with("linestyle", "--");
        let moved = line.shift(&YAXIS).rotate(&XAXIS, 30.0);
        assert_eq!(moved.style(), line.style());
    }

    #[test]
    fn test_arrow_adds_head_options() {
        let mut surface = RecordingSurface::new();
        Arrow::new(Direction::NegX)
            .with("color", "k")
            .draw(&mut surface)
            .unwrap();
        match &surface.commands()[0] {
            DrawCommand::Polyline { points, style } => {
                assert!(close(&points[1], &Point3::new(-1.0, 0.0, 0.0)));
                assert_eq!(style.get_str(ARROW_STYLE), Some("-|>"));
                assert_eq!(style.get_num(MUTATION_SCALE), Some(20.0));
                assert_eq!(style.get_str("color"), Some("k"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_draw_dispatch() {
        let mut surface = RecordingSurface::new();
        Plane::new(PlaneOrientation::Yz).draw(&mut surface).unwrap();
        Point::new().with("marker", "o").draw(&mut surface).unwrap();
        Line::new(Direction::Z).draw(&mut surface).unwrap();
        let cmds = surface.commands();
        assert!(matches!(&cmds[0], DrawCommand::Polygon { points, .. } if points.len() == 4));
        assert!(matches!(&cmds[1], DrawCommand::Marker { .. }));
        assert!(matches!(&cmds[2], DrawCommand::Polyline { points, .. } if points.len() == 2));
    }
}
