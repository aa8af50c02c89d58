//! Application configuration

use crate::error::{ArtistError, ArtistResult};
use artist_outline::GeometryCache;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistConfig {
    /// Edge length of the logical template canvas
    pub canvas_size: f32,

    /// Keep freehand strokes inside the template outline
    pub masking_enabled: bool,

    /// Number of compiled templates kept in memory
    pub geometry_cache_capacity: usize,

    /// User data directory
    pub data_dir: PathBuf,

    /// Templates JSON file to import on first launch, relative to `data_dir`
    pub catalog_path: Option<PathBuf>,

    /// Age settings
    pub age_range: AgeRangeConfig,

    /// Template plan limits
    pub plan: PlanConfig,

    /// Log filter, e.g. "artist_outline=debug"
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeRangeConfig {
    /// Youngest supported age
    pub min: u8,

    /// Oldest supported age
    pub max: u8,

    /// Age used when a template does not give one
    pub default_age: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Elements kept from a plan
    pub max_elements: usize,

    /// Thinnest allowed stroke
    pub min_stroke_width: f64,

    /// Thickest allowed stroke
    pub max_stroke_width: f64,
}

impl Default for ArtistConfig {
    fn default() -> Self {
        Self {
            canvas_size: artist_outline::LOGICAL_CANVAS_SIZE,
            masking_enabled: true,
            geometry_cache_capacity: 64,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("littleartist"),
            catalog_path: None,
            age_range: AgeRangeConfig::default(),
            plan: PlanConfig::default(),
            log_filter: None,
        }
    }
}

impl Default for AgeRangeConfig {
    fn default() -> Self {
        Self {
            min: 3,
            max: 12,
            default_age: 6,
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_elements: 30,
            min_stroke_width: 1.0,
            max_stroke_width: 12.0,
        }
    }
}

impl AgeRangeConfig {
    /// The range must be non-empty and hold the default age.
    pub fn validate(&self) -> ArtistResult<()> {
        if self.min > self.max || !(self.min..=self.max).contains(&self.default_age) {
            return Err(ArtistError::config(format!(
                "default age {} outside {}..={}",
                self.default_age, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl ArtistConfig {
    /// Read a JSON configuration file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> ArtistResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ArtistError::config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ArtistError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> ArtistResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolved templates file; relative paths live under `data_dir`.
    pub fn catalog_file(&self) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(|p| self.data_dir.join(p))
    }

    /// Geometry cache sized by `geometry_cache_capacity`.
    pub fn geometry_cache(&self) -> GeometryCache {
        GeometryCache::with_capacity(self.geometry_cache_capacity)
    }

    /// Reject settings the rest of the app cannot work with.
    pub fn validate(&self) -> ArtistResult<()> {
        if !(self.canvas_size.is_finite() && self.canvas_size > 0.0) {
            return Err(ArtistError::config("canvas_size must be positive"));
        }
        self.age_range.validate()?;
        if self.plan.min_stroke_width > self.plan.max_stroke_width {
            return Err(ArtistError::config("plan stroke width range is empty"));
        }
        Ok(())
    }
}

// Helper to get directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        if cfg!(target_os = "windows") {
            std::env::var_os("APPDATA").map(PathBuf::from)
        } else if cfg!(target_os = "macos") {
            home_dir().map(|h| h.join("Library").join("Application Support"))
        } else {
            std::env::var_os("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|| home_dir().map(|h| h.join(".local").join("share")))
        }
    }

    fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ArtistConfig::default();
        assert_eq!(config.canvas_size, 400.0);
        assert_eq!(config.plan.max_elements, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "masking_enabled": false, "age_range": {{ "default_age": 8 }} }}"#).unwrap();

        let config = ArtistConfig::load(file.path()).unwrap();
        assert!(!config.masking_enabled);
        assert_eq!(config.age_range.default_age, 8);
        assert_eq!(config.age_range.max, 12);
    }

    #[test]
    fn test_load_rejects_bad_ages() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "age_range": {{ "min": 9, "max": 4 }} }}"#).unwrap();
        assert!(matches!(ArtistConfig::load(file.path()), Err(ArtistError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ArtistConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ArtistError::Config(_)));
        assert!(ArtistConfig::load_or_default(None).is_ok());
    }

    #[test]
    fn test_catalog_file_under_data_dir() {
        let mut config = ArtistConfig {
            data_dir: PathBuf::from("/srv/artist"),
            ..ArtistConfig::default()
        };
        assert_eq!(config.catalog_file(), None);

        config.catalog_path = Some(PathBuf::from("templates.json"));
        assert_eq!(config.catalog_file(), Some(PathBuf::from("/srv/artist/templates.json")));

        config.catalog_path = Some(PathBuf::from("/etc/templates.json"));
        assert_eq!(config.catalog_file(), Some(PathBuf::from("/etc/templates.json")));
    }

    #[test]
    fn test_geometry_cache_uses_capacity() {
        let doc = r#"<circle cx="10" cy="10" r="5"/>"#;

        let mut small = ArtistConfig {
            geometry_cache_capacity: 1,
            ..ArtistConfig::default()
        }
        .geometry_cache();
        let first = small.elements(doc);
        small.elements("<rect/>");
        assert!(!std::sync::Arc::ptr_eq(&first, &small.elements(doc)));

        let mut roomy = ArtistConfig::default().geometry_cache();
        let first = roomy.elements(doc);
        roomy.elements("<rect/>");
        assert!(std::sync::Arc::ptr_eq(&first, &roomy.elements(doc)));
    }
}
