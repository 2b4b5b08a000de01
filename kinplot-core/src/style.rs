/// Pass-through draw styling options
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{all_consuming, value},
    IResult,
};

use crate::error::{Error, Result};

/// A single option value
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Num(n)
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

/// Ordered key/value options forwarded untouched to the render surface.
///
/// Keys keep their insertion order; setting an existing key replaces the
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, StyleValue)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<StyleValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(StyleValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Numeric value; numeric strings are accepted too
    pub fn get_num(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(StyleValue::Num(n)) => Some(*n),
            Some(StyleValue::Str(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stroke pattern of lines and arcs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    pub fn parse(input: &str) -> Result<Self> {
        match all_consuming(line_style)(input.trim()) {
            Ok((_, style)) => Ok(style),
            Err(_) => Err(Error::InvalidStyle(format!("linestyle {:?}", input))),
        }
    }

    /// Line style of a style bag, solid when unset
    pub fn from_style(style: &Style) -> Result<Self> {
        match style.get_str("linestyle").or_else(|| style.get_str("ls")) {
            Some(s) => Self::parse(s),
            None => Ok(LineStyle::Solid),
        }
    }
}

fn line_style(input: &str) -> IResult<&str, LineStyle> {
    // Longer tokens first so that "--" is not read as "-"
    alt((
        value(LineStyle::Dashed, alt((tag("--"), tag("dashed")))),
        value(LineStyle::DashDot, alt((tag("-."), tag("dashdot")))),
        value(LineStyle::Dotted, alt((tag(":"), tag("dotted")))),
        value(LineStyle::Solid, alt((tag("-"), tag("solid")))),
    ))(input)
}
