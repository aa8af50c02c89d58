//! Conversion of primitive shape tags into paths.

use crate::geometry::{Point, Rect};
use crate::path::VectorPath;
use crate::path_data::parse_path_data;
use crate::{OutlineError, DEFAULT_STROKE_WIDTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The supported element tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rect,
    Ellipse,
    Line,
    Polygon,
    Path,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Circle,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::Polygon,
        ShapeKind::Path,
    ];

    /// Tag name as written in markup.
    pub fn tag_name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Path => "path",
        }
    }

    /// Case-sensitive lookup of a tag name.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == name)
    }

    /// Whether the shape encloses an area.
    pub fn has_interior(&self) -> bool {
        !matches!(self, ShapeKind::Line)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

impl FromStr for ShapeKind {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag_name(s).ok_or_else(|| OutlineError::UnsupportedElement(s.to_string()))
    }
}

/// Attribute values of one tag, keyed by name.
///
/// The first occurrence of a repeated name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value unless the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    /// Raw value. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Value parsed as a finite number.
    pub fn number(&self, name: &str) -> Option<f32> {
        parse_number(self.get(name)?)
    }

    /// Like [`Attributes::number`], reporting which attribute was bad.
    pub fn require(&self, name: &str) -> Result<f32, OutlineError> {
        self.number(name)
            .ok_or_else(|| OutlineError::InvalidAttribute(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// A path with its stroke width, produced from one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryElement {
    pub kind: ShapeKind,
    pub path: VectorPath,
    pub stroke_width: f32,
}

/// Build the geometry for one tag.
///
/// Returns `None` when a required attribute is missing or not a number.
pub fn adapt(kind: ShapeKind, attrs: &Attributes) -> Option<GeometryElement> {
    match shape_path(kind, attrs) {
        Ok(path) => Some(GeometryElement {
            kind,
            path,
            stroke_width: attrs.number("stroke-width").unwrap_or(DEFAULT_STROKE_WIDTH),
        }),
        Err(err) => {
            debug!(tag = %kind, error = %err, "dropping element");
            None
        }
    }
}

/// Just the path for one tag, with the reason it could not be built.
pub fn shape_path(kind: ShapeKind, attrs: &Attributes) -> Result<VectorPath, OutlineError> {
    let path = match kind {
        ShapeKind::Circle => {
            let (cx, cy, r) = (attrs.require("cx")?, attrs.require("cy")?, attrs.require("r")?);
            VectorPath::ellipse_in(Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r))
        }
        ShapeKind::Ellipse => {
            let (cx, cy) = (attrs.require("cx")?, attrs.require("cy")?);
            let (rx, ry) = (attrs.require("rx")?, attrs.require("ry")?);
            VectorPath::ellipse_in(Rect::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry))
        }
        ShapeKind::Rect => {
            let (x, y) = (attrs.require("x")?, attrs.require("y")?);
            let (w, h) = (attrs.require("width")?, attrs.require("height")?);
            VectorPath::rect(Rect::new(x, y, w, h))
        }
        ShapeKind::Line => {
            let from = Point::new(attrs.require("x1")?, attrs.require("y1")?);
            let to = Point::new(attrs.require("x2")?, attrs.require("y2")?);
            let mut builder = crate::path::PathBuilder::new();
            builder.move_to(from);
            builder.line_to(to);
            builder.build()
        }
        ShapeKind::Polygon => {
            let raw = attrs
                .get("points")
                .ok_or_else(|| OutlineError::InvalidAttribute("points".into()))?;
            let points = parse_points(raw);
            if points.is_empty() {
                return Err(OutlineError::InvalidAttribute("points".into()));
            }
            VectorPath::polygon(&points)
        }
        ShapeKind::Path => {
            let d = attrs
                .get("d")
                .ok_or_else(|| OutlineError::InvalidAttribute("d".into()))?;
            parse_path_data(d)
        }
    };
    Ok(path)
}

/// Parse a `points` list of whitespace-separated `x,y` pairs.
///
/// Groups that are not exactly two numbers are skipped individually.
pub fn parse_points(s: &str) -> Vec<Point> {
    s.split([' ', '\t', '\n', '\r'])
        .filter(|group| !group.is_empty())
        .filter_map(|group| {
            let mut parts = group.split(',');
            let x = parts.next().and_then(parse_number)?;
            let y = parts.next().and_then(parse_number)?;
            if parts.next().is_some() {
                return None;
            }
            Some(Point::new(x, y))
        })
        .collect()
}

fn parse_number(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
