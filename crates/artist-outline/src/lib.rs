//! # LittleArtist Outline
//!
//! Template outline engine for the LittleArtist drawing app.
//!
//! ## Features
//!
//! - **Markup scanning**: find `circle`, `rect`, `ellipse`, `line`,
//!   `polygon` and `path` tags in template markup
//! - **Path data**: the `M`, `L`, `C`, `Q`, `Z` command subset
//! - **Geometry**: every tag compiles to one [`VectorPath`] plus stroke width
//! - **Fill region**: all enclosed areas combined for hit testing
//! - **Rendering**: outlines fitted into a display area and flattened
//!
//! ## Architecture
//!
//! ```text
//! markup
//!    └── scanner (tags + attribute maps)
//!           └── shapes (per-tag adapter)
//!                  └── path_data (tokenizer + interpreter, for <path>)
//!                         └── GeometryElement list
//!                                ├── render (stroked outlines)
//!                                └── fill (combined region, mask)
//! ```
//!
//! Everything here is pure: the same markup always compiles to the same
//! geometry, and malformed input degrades to partial output rather than
//! an error.

use thiserror::Error;

pub mod cache;
pub mod fill;
pub mod geometry;
pub mod path;
pub mod path_data;
pub mod render;
pub mod scanner;
pub mod shapes;
pub mod tokenizer;

pub use cache::GeometryCache;
pub use fill::{combined_fill_region, TemplateMask};
pub use geometry::{Point, Rect, Transform};
pub use path::{FillRule, PathBuilder, PathOp, Polyline, VectorPath};
pub use path_data::{parse_path, parse_path_data, TokenCursor};
pub use render::{render_outlines, LineCap, LineJoin, StrokedOutline, Viewport};
pub use scanner::{scan, tags, Tag};
pub use shapes::{adapt, Attributes, GeometryElement, ShapeKind};
pub use tokenizer::{tokenize, Token};

/// Edge length of the square canvas templates are authored in.
pub const LOGICAL_CANVAS_SIZE: f32 = 400.0;

/// Stroke width used when a tag has no usable `stroke-width`.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;

// ==================== Errors ====================

/// Errors reported by the strict helpers of this crate.
///
/// Scanning and path interpretation never fail; these only surface from
/// lookups that ask for a reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutlineError {
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Unsupported element: {0}")]
    UnsupportedElement(String),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
