/// Rigid and scaling transforms shared by every drawable
use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::Result;
use crate::surface::Surface;

/// Rotation by `degrees` about `axis` through the origin (right-hand rule).
///
/// The axis is used as a rotation vector: its length multiplies the angle,
/// so callers normally pass a unit vector.
pub fn rotation(axis: &Vector3<f64>, degrees: f64) -> Rotation3<f64> {
    Rotation3::from_scaled_axis(axis * degrees.to_radians())
}

/// Scale factor, either the same for all axes or per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Uniform(f64),
    PerAxis(Vector3<f64>),
}

impl Scale {
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        match self {
            Scale::Uniform(k) => Point3::from(point.coords * *k),
            Scale::PerAxis(v) => Point3::from(point.coords.component_mul(v)),
        }
    }

    /// The single factor if this scale is isotropic
    pub fn as_uniform(&self) -> Option<f64> {
        match self {
            Scale::Uniform(k) => Some(*k),
            Scale::PerAxis(v) if v.x == v.y && v.y == v.z => Some(v.x),
            Scale::PerAxis(_) => None,
        }
    }
}

impl From<f64> for Scale {
    fn from(k: f64) -> Self {
        Scale::Uniform(k)
    }
}

impl From<Vector3<f64>> for Scale {
    fn from(v: Vector3<f64>) -> Self {
        Scale::PerAxis(v)
    }
}

/// Capabilities every scene element provides.
///
/// Transforms never modify the receiver; they return a new value of the
/// same type. Rotation and translation are defined for every element;
/// scaling may be refused by elements whose geometry cannot follow an
/// anisotropic factor.
pub trait Shape: Sized {
    fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self;

    fn shift(&self, offset: &Vector3<f64>) -> Self;

    fn scale(&self, factor: impl Into<Scale>) -> Result<Self>;

    fn draw(&self, surface: &mut dyn Surface) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{XAXIS, YAXIS, ZAXIS};

    #[test]
    fn test_quarter_turn_about_z() {
        let r = rotation(&ZAXIS, 90.0);
        let p = r * Point3::new(1.0, 0.0, 0.0);
        assert!((p - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let r = rotation(&XAXIS, 0.0);
        assert!((r.matrix() - nalgebra::Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_per_axis_scale() {
        let s = Scale::from(0.7 * XAXIS + YAXIS + 0.7 * ZAXIS);
        let p = s.apply(&Point3::new(1.0, 1.0, 0.0));
        assert!((p - Point3::new(0.7, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(s.as_uniform(), None);
        assert_eq!(Scale::from(Vector3::repeat(2.0)).as_uniform(), Some(2.0));
        assert_eq!(Scale::from(3.0).as_uniform(), Some(3.0));
    }
}
