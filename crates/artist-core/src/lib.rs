//! LittleArtist Core Library
//!
//! Templates and their catalog, template plans, configuration and the
//! shared error type. Geometry comes from `artist-outline`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod plan;
pub mod template;

pub use catalog::{TemplateCatalog, TemplateQuery};
pub use config::ArtistConfig;
pub use error::{ArtistError, ArtistResult};
pub use plan::{PlanElement, PlanElementKind, PlanLimits, TemplatePlan};
pub use template::{DrawingTemplate, TemplateCategory};
