/// Text label anchored at a point in space
use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::error::{Error, Result};
use crate::style::{Style, StyleValue};
use crate::surface::Surface;
use crate::transform::{rotation, Scale, Shape};
use crate::vector::is_finite;

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    label: String,
    anchor: Point3<f64>,
    style: Style,
}

impl Text {
    pub fn new(label: impl Into<String>, anchor: Point3<f64>) -> Result<Self> {
        if !is_finite(&anchor) {
            return Err(Error::InvalidGeometry(format!(
                "non-finite text anchor {:?}",
                anchor
            )));
        }
        Ok(Self {
            label: label.into(),
            anchor,
            style: Style::new(),
        })
    }

    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.style.set(key, value);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn anchor(&self) -> Point3<f64> {
        self.anchor
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    fn moved(&self, anchor: Point3<f64>) -> Self {
        Self {
            label: self.label.clone(),
            anchor,
            style: self.style.clone(),
        }
    }
}

impl Shape for Text {
    fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
        self.moved(rotation(axis, degrees) * self.anchor)
    }

    fn shift(&self, offset: &Vector3<f64>) -> Self {
        self.moved(self.anchor + offset)
    }

    fn scale(&self, factor: impl Into<Scale>) -> Result<Self> {
        Ok(self.moved(factor.into().apply(&self.anchor)))
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        trace!(label = %self.label, "draw text");
        surface.text(&self.anchor, &self.label, &self.style)
    }
}
