//! Combined fill region of a template, used to keep freehand strokes
//! inside the outline.

use crate::geometry::Point;
use crate::path::{FillRule, VectorPath};
use crate::render::Viewport;
use crate::scanner::tags;
use crate::shapes::shape_path;
use tracing::debug;

/// Append every area-enclosing element of the markup into one path.
///
/// Paths are concatenated, not merged; the fill rule applied later decides
/// the combined interior. `line` elements have no area and are left out.
pub fn combined_fill_region(document: &str) -> VectorPath {
    let paths: Vec<VectorPath> = tags(document)
        .filter(|tag| tag.kind.has_interior())
        .filter_map(|tag| match shape_path(tag.kind, &tag.attributes()) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!(tag = %tag.kind, error = %err, "element left out of fill region");
                None
            }
        })
        .collect();

    VectorPath::concat(&paths)
}

/// Containment test for display-space points against a template.
#[derive(Debug, Clone)]
pub struct TemplateMask {
    region: Option<VectorPath>,
    viewport: Viewport,
    fill_rule: FillRule,
}

impl TemplateMask {
    /// Mask from the template markup shown in `viewport`.
    pub fn new(document: &str, viewport: Viewport) -> Self {
        Self::from_region(combined_fill_region(document), viewport)
    }

    pub fn from_region(region: VectorPath, viewport: Viewport) -> Self {
        Self {
            region: Some(region),
            viewport,
            fill_rule: FillRule::NonZero,
        }
    }

    /// A mask that lets every point through.
    pub fn unrestricted(viewport: Viewport) -> Self {
        Self {
            region: None,
            viewport,
            fill_rule: FillRule::NonZero,
        }
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    /// True when a region is set but encloses nothing.
    pub fn is_empty(&self) -> bool {
        self.region.as_ref().is_some_and(VectorPath::is_empty)
    }

    pub fn region(&self) -> Option<&VectorPath> {
        self.region.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether a stroke may pass through `display_point`.
    pub fn allows(&self, display_point: Point) -> bool {
        match &self.region {
            Some(region) => region.contains(self.viewport.to_template(display_point), self.fill_rule),
            None => true,
        }
    }
}
