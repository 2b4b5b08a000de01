/// Render surface interface that primitives draw onto
use nalgebra::Point3;

use crate::error::Result;
use crate::style::Style;

/// A 3D drawing context.
///
/// Primitives call these four operations with their stored options; how
/// the options are interpreted is up to the surface.
pub trait Surface {
    /// Filled polygon, triangulated by the surface
    fn fill_polygon(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()>;

    /// Connected line through the points in order
    fn polyline(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()>;

    fn marker(&mut self, point: &Point3<f64>, style: &Style) -> Result<()>;

    fn text(&mut self, point: &Point3<f64>, label: &str, style: &Style) -> Result<()>;
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon {
        points: Vec<Point3<f64>>,
        style: Style,
    },
    Polyline {
        points: Vec<Point3<f64>>,
        style: Style,
    },
    Marker {
        point: Point3<f64>,
        style: Style,
    },
    Text {
        point: Point3<f64>,
        label: String,
        style: Style,
    },
}

/// Surface that keeps the display list instead of rendering it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for RecordingSurface {
    fn fill_polygon(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()> {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            style: style.clone(),
        });
        Ok(())
    }

    fn polyline(&mut self, points: &[Point3<f64>], style: &Style) -> Result<()> {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
        Ok(())
    }

    fn marker(&mut self, point: &Point3<f64>, style: &Style) -> Result<()> {
        self.commands.push(DrawCommand::Marker {
            point: *point,
            style: style.clone(),
        });
        Ok(())
    }

    fn text(&mut self, point: &Point3<f64>, label: &str, style: &Style) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            point: *point,
            label: label.to_string(),
            style: style.clone(),
        });
        Ok(())
    }
}
