/// Composite node that transforms and draws its children together
use nalgebra::Vector3;
use tracing::debug;

use crate::angle::Angle;
use crate::error::Result;
use crate::geometry::{Arrow, Line, Plane, Point};
use crate::surface::Surface;
use crate::text::Text;
use crate::transform::{Scale, Shape};

/// Any node of a scene tree
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Plane(Plane),
    Line(Line),
    Arrow(Arrow),
    Point(Point),
    Angle(Angle),
    Text(Text),
    Compound(Compound),
}

impl Element {
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::Plane(_) => "Plane",
            Element::Line(_) => "Line",
            Element::Arrow(_) => "Arrow",
            Element::Point(_) => "Point",
            Element::Angle(_) => "Angle",
            Element::Text(_) => "Text",
            Element::Compound(_) => "Compound",
        }
    }
}

/// Dispatch a `Shape` method to the wrapped node, rewrapping the result
macro_rules! each_variant {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            Element::Plane($node) => Element::Plane($body),
            Element::Line($node) => Element::Line($body),
            Element::Arrow($node) => Element::Arrow($body),
            Element::Point($node) => Element::Point($body),
            Element::Angle($node) => Element::Angle($body),
            Element::Text($node) => Element::Text($body),
            Element::Compound($node) => Element::Compound($body),
        }
    };
}

impl Shape for Element {
    fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
        each_variant!(self, e => e.rotate(axis, degrees))
    }

    fn shift(&self, offset: &Vector3<f64>) -> Self {
        each_variant!(self, e => e.shift(offset))
    }

    fn scale(&self, factor: impl Into<Scale>) -> Result<Self> {
        let factor = factor.into();
        Ok(each_variant!(self, e => e.scale(factor)?))
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        match self {
            Element::Plane(e) => e.draw(surface),
            Element::Line(e) => e.draw(surface),
            Element::Arrow(e) => e.draw(surface),
            Element::Point(e) => e.draw(surface),
            Element::Angle(e) => e.draw(surface),
            Element::Text(e) => e.draw(surface),
            Element::Compound(e) => e.draw(surface),
        }
    }
}

macro_rules! element_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Element {
                fn from(e: $ty) -> Self {
                    Element::$ty(e)
                }
            }
        )*
    };
}

element_from!(Plane, Line, Arrow, Point, Angle, Text, Compound);

/// Ordered group of elements.
///
/// Every transform is applied to each child in order and yields a new
/// compound; the receiver is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    elements: Vec<Element>,
}

impl Compound {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl FromIterator<Element> for Compound {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Shape for Compound {
    fn rotate(&self, axis: &Vector3<f64>, degrees: f64) -> Self {
        self.elements.iter().map(|e| e.rotate(axis, degrees)).collect()
    }

    fn shift(&self, offset: &Vector3<f64>) -> Self {
        self.elements.iter().map(|e| e.shift(offset)).collect()
    }

    fn scale(&self, factor: impl Into<Scale>) -> Result<Self> {
        let factor = factor.into();
        let elements = self
            .elements
            .iter()
            .map(|e| e.scale(factor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(elements))
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        debug!(children = self.elements.len(), "draw compound");
        for element in &self.elements {
            element.draw(surface)?;
        }
        Ok(())
    }
}

/// Build a [`Compound`] from any mix of primitives and compounds
#[macro_export]
macro_rules! compound {
    ($($element:expr),* $(,)?) => {
        $crate::compound::Compound::new(vec![$($crate::compound::Element::from($element)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::{Direction, PlaneOrientation};
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::vector::{XAXIS, YAXIS, ZAXIS};
    use nalgebra::Point3;

    #[test]
    fn test_shift_point_and_line() {
        let c = compound![Point::new(), Line::new(Direction::X)].shift(&ZAXIS);
        match &c.elements()[0] {
            Element::Point(p) => assert_eq!(p.position(), Point3::new(0.0, 0.0, 1.0)),
            other => panic!("unexpected {}", other.type_name()),
        }
        match &c.elements()[1] {
            Element::Line(l) => {
                assert_eq!(l.start(), Point3::new(0.0, 0.0, 1.0));
                assert_eq!(l.end(), Point3::new(1.0, 0.0, 1.0));
            }
            other => panic!("unexpected {}", other.type_name()),
        }
    }

    #[test]
    fn test_scale_error_propagates_from_nested_child() {
        let inner = compound![
            Point::new(),
            Angle::new(PlaneOrientation::Xy, 45.0, 0.3).unwrap()
        ];
        let outer = compound![Plane::new(PlaneOrientation::Xy), inner];
        let err = outer.scale(0.7 * XAXIS + YAXIS).unwrap_err();
        assert!(matches!(err, Error::MissingCapability { primitive: "Angle", .. }));
        assert!(outer.scale(2.0).is_ok());
    }

    #[test]
    fn test_draw_in_order() {
        let mut surface = RecordingSurface::new();
        compound![
            Plane::new(PlaneOrientation::Xy),
            compound![Text::new("B+", Point3::origin()).unwrap(), Point::new()],
            Arrow::new(Direction::Y),
        ]
        .draw(&mut surface)
        .unwrap();
        let kinds: Vec<&str> = surface
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Polygon { .. } => "polygon",
                DrawCommand::Polyline { .. } => "polyline",
                DrawCommand::Marker { .. } => "marker",
                DrawCommand::Text { .. } => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["polygon", "text", "marker", "polyline"]);
    }

    #[test]
    fn test_empty_compound() {
        let c = Compound::default();
        assert!(c.is_empty());
        assert!(c.rotate(&ZAXIS, 10.0).is_empty());
    }
}
