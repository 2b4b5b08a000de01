//! kinplot core library - declarative scene graph for 3D kinematics diagrams
//!
//! Primitives (planes, lines, arrows, points, angle arcs and text labels)
//! are immutable values. Every transform returns a new value, and
//! `Compound` nodes distribute transforms and draw calls over their
//! children, so diagrams are built as trees and drawn once onto a
//! `Surface`.
//!
//! ```
//! use kinplot_core::prelude::*;
//!
//! let arm = compound![
//!     Arrow::named("x")?.with("color", "k"),
//!     Text::new("D0", at(1.1 * XAXIS))?,
//! ]
//! .rotate(&ZAXIS, 70.0);
//!
//! let mut surface = RecordingSurface::new();
//! arm.draw(&mut surface)?;
//! assert_eq!(surface.commands().len(), 2);
//! # Ok::<(), kinplot_core::Error>(())
//! ```

pub mod angle;
pub mod color;
pub mod compound;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod style;
pub mod surface;
pub mod text;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use angle::{Angle, Radii, ARC_RESOLUTION};
pub use compound::{Compound, Element};
pub use error::{Error, Result};
pub use geometry::{Arrow, Direction, Line, Plane, PlaneOrientation, PlaneShape, Point, Segment};
pub use projection::{Axes3, Camera, ProjectionMode, ScreenPoint};
pub use style::{LineStyle, Style, StyleValue};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use text::Text;
pub use transform::{rotation, Scale, Shape};

pub mod prelude {
    //! Everything needed to build and draw a diagram
    pub use crate::angle::Angle;
    pub use crate::compound;
    pub use crate::compound::{Compound, Element};
    pub use crate::geometry::{Arrow, Direction, Line, Plane, PlaneOrientation, Point};
    pub use crate::style::Style;
    pub use crate::surface::{RecordingSurface, Surface};
    pub use crate::text::Text;
    pub use crate::transform::{Scale, Shape};
    pub use crate::vector::{at, XAXIS, YAXIS, ZAXIS, ZERO};
}
