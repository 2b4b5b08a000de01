/// Camera, axis limits and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::vector::{YAXIS, ZAXIS};

/// Data limits of the three axes.
///
/// The limits box is mapped onto a unit cube centred at the origin before
/// viewing, so unequal limits stretch the scene like independent axis
/// scales do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes3 {
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub zlim: (f64, f64),
}

impl Axes3 {
    pub fn new(xlim: (f64, f64), ylim: (f64, f64), zlim: (f64, f64)) -> Self {
        Self { xlim, ylim, zlim }
    }

    /// Symmetric limits `[-half, half]` on every axis
    pub fn cube(half: f64) -> Self {
        Self::new((-half, half), (-half, half), (-half, half))
    }

    /// Map a data point into the unit cube `[-0.5, 0.5]^3`
    pub fn normalize(&self, point: &Point3<f64>) -> Point3<f64> {
        let n = |v: f64, (lo, hi): (f64, f64)| {
            let span = hi - lo;
            if span.abs() < f64::EPSILON {
                0.0
            } else {
                (v - lo) / span - 0.5
            }
        };
        Point3::new(
            n(point.x, self.xlim),
            n(point.y, self.ylim),
            n(point.z, self.zlim),
        )
    }
}

impl Default for Axes3 {
    fn default() -> Self {
        Self::cube(1.0)
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Projected position on the output, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Distance from the camera plane; smaller is nearer
    pub depth: f64,
}

/// Camera looking at the centre of the axes box from a spherical position
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Elevation above the xy plane, degrees
    pub elevation: f64,
    /// Azimuth about the z axis, degrees
    pub azimuth: f64,
    pub distance: f64,
    /// Vertical field of view for perspective projection, radians
    pub fov: f64,
    /// Half-height of the visible region for orthographic projection, in
    /// normalized box units
    pub extent: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
            distance: 2.5,
            fov: std::f64::consts::PI / 4.0, // 45 degrees
            extent: 0.8,
            aspect: width as f64 / height.max(1) as f64,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Orthographic,
        }
    }

    pub fn with_view(mut self, elevation: f64, azimuth: f64) -> Self {
        self.elevation = elevation;
        self.azimuth = azimuth;
        self
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn eye(&self) -> Point3<f64> {
        let (el, az) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Point3::new(
            self.distance * el.cos() * az.cos(),
            self.distance * el.cos() * az.sin(),
            self.distance * el.sin(),
        )
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        // Looking straight down or up: z cannot serve as the up direction
        let up: Vector3<f64> = if self.elevation.to_radians().cos().abs() < 1e-9 {
            YAXIS
        } else {
            ZAXIS
        };
        Matrix4::look_at_rh(&self.eye(), &Point3::origin(), &up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.extent;
                let width = height * self.aspect;
                Matrix4::new_orthographic(-width, width, -height, height, self.near, self.far)
            }
        }
    }

    /// Project a data point to output coordinates of a `width` x `height`
    /// canvas. Returns `None` for points outside the view volume.
    pub fn project(
        &self,
        point: &Point3<f64>,
        axes: &Axes3,
        width: f64,
        height: f64,
    ) -> Option<ScreenPoint> {
        let view = self.view_matrix();
        let in_view = view.transform_point(&axes.normalize(point));
        let ndc = self.projection_matrix().transform_point(&in_view);

        if !ndc.coords.iter().all(|c| c.is_finite()) {
            return None;
        }

        // Clip test
        if ndc.x < -1.0 || ndc.x > 1.0 || ndc.y < -1.0 || ndc.y > 1.0 || ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * width,
            y: (1.0 - ndc.y) * 0.5 * height,
            depth: -in_view.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
