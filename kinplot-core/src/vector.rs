/// Predefined points and unit vectors
use nalgebra::{Point3, Vector3};

/// Coordinate origin
pub const ZERO: Point3<f64> = Point3::new(0.0, 0.0, 0.0);

pub const XAXIS: Vector3<f64> = Vector3::new(1.0, 0.0, 0.0);
pub const YAXIS: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);
pub const ZAXIS: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Point at the tip of `v` when placed at the origin
pub fn at(v: Vector3<f64>) -> Point3<f64> {
    Point3::from(v)
}

pub(crate) fn is_finite(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}
