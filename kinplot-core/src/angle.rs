/// Angle annotation drawn as one or more concentric arcs
use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::error::{Error, Result};
use crate::geometry::PlaneOrientation;
use crate::style::{Style, StyleValue};
use crate::surface::Surface;
use crate::transform::{rotation, Scale, Shape};
use crate::vector::{is_finite, XAXIS, YAXIS, ZAXIS, ZERO};

/// Samples per arc
pub const ARC_RESOLUTION: usize = 30;

const UNIT_TOLERANCE: f64 = 1e-9;

/// Angle of `sweep` degrees at `vertex`, counted from `start` towards
/// `normal × start`.
///
/// Unlike the point-backed primitives the arc itself is never stored: it is
/// sampled from vertex, directions and radii at draw time, so rotation acts
/// on the frame and scaling only on the radii.
#[derive(Debug, Clone, PartialEq)]
pub struct Angle {
    vertex: Point3<f64>,
    sweep: f64,
    radii: Vec<f64>,
    normal: Vector3<f64>,
    start: Vector3<f64>,
    style: Style,
}

impl Angle {
    /// Angle at the origin in a coordinate plane
    pub fn new(orientation: PlaneOrientation, sweep: f64, radii: impl Into<Radii>) -> Result<Self> {
        let (normal, start) = match orientation {
            PlaneOrientation::Xy => (ZAXIS, XAXIS),
            PlaneOrientation::Xz => (-YAXIS, XAXIS),
            PlaneOrientation::Yz => (XAXIS, YAXIS),
        };
        Self::with_frame(ZERO, sweep, radii, normal, start)
    }

    /// Angle from a selector string: `"xy"`, `"xz"` or `"yz"`
    pub fn named(selector: &str, sweep: f64, radii: impl Into<Radii>) -> Result<Self> {
        Self::new(selector.parse()?, sweep, radii)
    }

    /// Angle with an explicit vertex and frame.
    ///
    /// `normal` and `start` must be unit vectors and orthogonal to each
    /// other; otherwise the drawn arc would not be circular.
    pub fn with_frame(
        vertex: Point3<f64>,
        sweep: f64,
        radii: impl Into<Radii>,
        normal: Vector3<f64>,
        start: Vector3<f64>,
    ) -> Result<Self> {
        let angle = Self::new_unchecked(vertex, sweep, radii, normal, start);
        angle.validate()?;
        Ok(angle)
    }

    /// Angle with an explicit frame that is not checked for orthonormality
    pub fn new_unchecked(
        vertex: Point3<f64>,
        sweep: f64,
        radii: impl Into<Radii>,
        normal: Vector3<f64>,
        start: Vector3<f64>,
    ) -> Self {
        Self {
            vertex,
            sweep,
            radii: radii.into().0,
            normal,
            start,
            style: Style::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !is_finite(&self.vertex) || !self.sweep.is_finite() {
            return Err(Error::InvalidGeometry("non-finite angle vertex or sweep".into()));
        }
        if self.radii.is_empty() {
            return Err(Error::InvalidGeometry("angle needs at least one radius".into()));
        }
        if self.radii.iter().any(|r| !r.is_finite()) {
            return Err(Error::InvalidGeometry("non-finite angle radius".into()));
        }
        if (self.normal.norm() - 1.0).abs() > UNIT_TOLERANCE {
            return Err(Error::InvalidGeometry(format!(
                "angle normal {:?} is not a unit vector",
                self.normal
            )));
        }
        if (self.start.norm() - 1.0).abs() > UNIT_TOLERANCE {
            return Err(Error::InvalidGeometry(format!(
                "angle start {:?} is not a unit vector",
                self.start
            )));
        }
        if self.normal.dot(&self.start).abs() > UNIT_TOLERANCE {
            return Err(Error::InvalidGeometry(
                "angle start is not orthogonal to its normal".into(),
            ));
        }
        Ok(())
    }

    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.set(key, value);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn vertex(&self) -> Point3<f64> {
        self.vertex
    }

    /// Angle magnitude in degrees
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn start(&self) -> Vector3<f64> {
        self.start
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Sampled arc at `radius`, from the start direction through the sweep
    pub fn arc_points(&self, radius: f64) -> Vec<Point3<f64>> {
        let u = self.start;
        let v = self.normal.cross(&u);
        let end = self.sweep.to_radians();
        let steps = (ARC_RESOLUTION - 1) as f64;
        (0..ARC_RESOLUTION)
            .map(|i| {
                let t = end * i as f64 / steps;
                self.vertex + (u * t.cos() + v * t.sin()) * radius
            })
            .collect()
    }
}

impl Shape for Angle {
    fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
        let rot = rotation(axis, degrees);
        Self {
            vertex: rot * self.vertex,
            normal: rot * self.normal,
            start: rot * self.start,
            radii: self.radii.clone(),
            style: self.style.clone(),
            ..*self
        }
    }

    fn shift(&self, offset: &Vector3<f64>) -> Self {
        Self {
            vertex: self.vertex + offset,
            radii: self.radii.clone(),
            style: self.style.clone(),
            ..*self
        }
    }

    fn scale(&self, factor: impl Into<Scale>) -> Result<Self> {
        let k = factor.into().as_uniform().ok_or(Error::MissingCapability {
            primitive: "Angle",
            operation: "anisotropic scale",
        })?;
        Ok(Self {
            radii: self.radii.iter().map(|r| r * k).collect(),
            style: self.style.clone(),
            ..*self
        })
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        trace!(sweep = self.sweep, arcs = self.radii.len(), "draw angle");
        for &radius in &self.radii {
            surface.polyline(&self.arc_points(radius), &self.style)?;
        }
        Ok(())
    }
}

/// One or several arc radii
#[derive(Debug, Clone, PartialEq)]
pub struct Radii(pub Vec<f64>);

impl From<f64> for Radii {
    fn from(r: f64) -> Self {
        Radii(vec![r])
    }
}

impl From<Vec<f64>> for Radii {
    fn from(r: Vec<f64>) -> Self {
        Radii(r)
    }
}

impl From<&[f64]> for Radii {
    fn from(r: &[f64]) -> Self {
        Radii(r.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Radii {
    fn from(r: [f64; N]) -> Self {
        Radii(r.to_vec())
    }
}
