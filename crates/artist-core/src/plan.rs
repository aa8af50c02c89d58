//! Template plans: structured element lists turned into outline markup

use crate::config::PlanConfig;
use crate::error::{ArtistError, ArtistResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// Shapes a plan may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanElementKind {
    #[default]
    Circle,
    Rect,
    Line,
    Polygon,
    Ellipse,
}

/// One planned element. Fields not used by `kind` are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanElement {
    #[serde(rename = "type")]
    pub kind: PlanElementKind,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vec<f64>>>,
}

/// Limits enforced by [`TemplatePlan::validate_and_clamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanLimits {
    pub max_elements: usize,
    pub min_stroke_width: f64,
    pub max_stroke_width: f64,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self::from(&PlanConfig::default())
    }
}

impl From<&PlanConfig> for PlanLimits {
    fn from(config: &PlanConfig) -> Self {
        Self {
            max_elements: config.max_elements,
            min_stroke_width: config.min_stroke_width,
            max_stroke_width: config.max_stroke_width,
        }
    }
}

/// A named list of elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplatePlan {
    pub name: String,
    pub elements: Vec<PlanElement>,
}

fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    hi.min(lo.max(value))
}

fn clamp_opt(value: &mut Option<f64>, lo: f64, hi: f64) {
    if let Some(v) = value {
        *v = clamp(*v, lo, hi);
    }
}

fn rounded(value: Option<f64>, default: f64) -> i64 {
    value.unwrap_or(default).round() as i64
}

impl PlanElement {
    fn clamp_to(&mut self, width: f64, height: f64, limits: &PlanLimits) {
        self.stroke_width = clamp(
            self.stroke_width,
            limits.min_stroke_width,
            limits.max_stroke_width,
        );
        clamp_opt(&mut self.cx, 0.0, width);
        clamp_opt(&mut self.cy, 0.0, height);
        clamp_opt(&mut self.r, 0.0, width.min(height));
        clamp_opt(&mut self.x, 0.0, width);
        clamp_opt(&mut self.y, 0.0, height);
        clamp_opt(&mut self.width, 0.0, width);
        clamp_opt(&mut self.height, 0.0, height);
        clamp_opt(&mut self.x1, 0.0, width);
        clamp_opt(&mut self.y1, 0.0, height);
        clamp_opt(&mut self.x2, 0.0, width);
        clamp_opt(&mut self.y2, 0.0, height);
        for point in self.points.iter_mut().flatten() {
            if point.len() >= 2 {
                point[0] = clamp(point[0], 0.0, width);
                point[1] = clamp(point[1], 0.0, height);
            }
        }
    }

    /// The element as a single markup tag.
    pub fn to_markup(&self) -> String {
        let sw = self.stroke_width.round() as i64;
        match self.kind {
            PlanElementKind::Circle => format!(
                r#"<circle cx="{}" cy="{}" r="{}" stroke-width="{sw}"/>"#,
                rounded(self.cx, 200.0),
                rounded(self.cy, 200.0),
                rounded(self.r, 40.0),
            ),
            PlanElementKind::Rect => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" stroke-width="{sw}"/>"#,
                rounded(self.x, 100.0),
                rounded(self.y, 100.0),
                rounded(self.width, 200.0),
                rounded(self.height, 160.0),
            ),
            PlanElementKind::Line => format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{sw}"/>"#,
                rounded(self.x1, 100.0),
                rounded(self.y1, 100.0),
                rounded(self.x2, 300.0),
                rounded(self.y2, 300.0),
            ),
            PlanElementKind::Polygon => {
                let mut points = String::new();
                for point in self.points.iter().flatten().filter(|p| p.len() >= 2) {
                    if !points.is_empty() {
                        points.push(' ');
                    }
                    let _ = write!(points, "{},{}", point[0], point[1]);
                }
                format!(r#"<polygon points="{points}" stroke-width="{sw}"/>"#)
            }
            PlanElementKind::Ellipse => format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" stroke-width="{sw}"/>"#,
                rounded(self.cx, 200.0),
                rounded(self.cy, 200.0),
                rounded(self.width, 60.0),
                rounded(self.height, 40.0),
            ),
        }
    }
}

impl TemplatePlan {
    pub fn from_json(json: &str) -> ArtistResult<Self> {
        serde_json::from_str(json).map_err(|e| ArtistError::plan(format!("bad plan: {e}")))
    }

    /// Bring the plan inside a `width`×`height` canvas and the given limits.
    pub fn validate_and_clamp(&mut self, width: f64, height: f64, limits: &PlanLimits) {
        if self.elements.len() > limits.max_elements {
            debug!(
                name = %self.name,
                dropped = self.elements.len() - limits.max_elements,
                "truncating plan"
            );
            self.elements.truncate(limits.max_elements);
        }
        for element in &mut self.elements {
            element.clamp_to(width, height, limits);
        }
    }

    /// Outline markup, one tag per line.
    pub fn to_markup(&self) -> String {
        self.elements
            .iter()
            .map(PlanElement::to_markup)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
