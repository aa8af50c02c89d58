//! Template catalog: loading, first-launch import and filtering

use crate::config::AgeRangeConfig;
use crate::error::{ArtistError, ArtistResult};
use crate::template::{DrawingTemplate, TemplateCategory};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Filter applied by [`TemplateCatalog::filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    pub category: TemplateCategory,
    /// Child's age; `None` skips the age check.
    pub age: Option<u8>,
    /// Free text matched against name and category.
    pub search: String,
}

impl TemplateQuery {
    pub fn for_age(age: u8) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: TemplateCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    fn matches(&self, template: &DrawingTemplate, needle: &str) -> bool {
        if let Some(age) = self.age {
            if !template.suits_age(age) {
                return false;
            }
        }
        if self.category != TemplateCategory::All
            && !template.category.eq_ignore_ascii_case(self.category.as_str())
        {
            return false;
        }
        needle.is_empty()
            || template.name.to_lowercase().contains(needle)
            || template.category.to_lowercase().contains(needle)
    }
}

/// Bundled template record; ages may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateRecord {
    id: String,
    name: String,
    svg_path: String,
    age_min: Option<i64>,
    age_max: Option<i64>,
    category: String,
}

impl TemplateRecord {
    fn into_template(self, ages: &AgeRangeConfig) -> DrawingTemplate {
        let clamp = |age: i64| age.clamp(ages.min as i64, ages.max as i64) as u8;
        let age_min = clamp(self.age_min.unwrap_or(ages.default_age as i64));
        let age_max = clamp(self.age_max.unwrap_or(age_min as i64));

        let category = match self.category.parse::<TemplateCategory>() {
            Ok(_) => self.category,
            Err(_) => {
                warn!(id = %self.id, category = %self.category, "unknown category, using shapes");
                TemplateCategory::Shapes.as_str().to_string()
            }
        };

        DrawingTemplate {
            id: self.id,
            name: self.name,
            svg_path: self.svg_path,
            age_min,
            age_max,
            category,
        }
    }
}

/// In-memory store of drawing templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<DrawingTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON array of complete templates.
    pub fn from_json_str(json: &str) -> ArtistResult<Self> {
        let templates: Vec<DrawingTemplate> = serde_json::from_str(json)?;
        Ok(Self { templates })
    }

    /// Read a templates JSON file.
    pub fn load(path: impl AsRef<Path>) -> ArtistResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&text)?;
        debug!(path = %path.display(), count = catalog.len(), "loaded template catalog");
        Ok(catalog)
    }

    /// Import bundled records unless the catalog already has templates.
    ///
    /// Returns the number of templates imported.
    pub fn import_json_if_empty(&mut self, json: &str, ages: &AgeRangeConfig) -> ArtistResult<usize> {
        if !self.is_empty() {
            debug!(count = self.len(), "catalog already populated, skipping import");
            return Ok(0);
        }
        ages.validate()?;
        let records: Vec<TemplateRecord> = serde_json::from_str(json)?;
        let count = records.len();
        self.templates
            .extend(records.into_iter().map(|r| r.into_template(ages)));
        info!(count, "imported templates");
        Ok(count)
    }

    /// Add a template, replacing one with the same id.
    pub fn add(&mut self, template: DrawingTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> ArtistResult<&DrawingTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ArtistError::not_found(format!("template {id}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawingTemplate> {
        self.templates.iter()
    }

    /// Templates matching `query`, sorted by name.
    pub fn filtered(&self, query: &TemplateQuery) -> Vec<&DrawingTemplate> {
        let needle = query.search.trim().to_lowercase();
        let mut matches: Vec<&DrawingTemplate> = self
            .templates
            .iter()
            .filter(|t| query.matches(t, &needle))
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, name: &str, category: &str, ages: (u8, u8)) -> DrawingTemplate {
        DrawingTemplate {
            id: id.into(),
            name: name.into(),
            svg_path: r#"<circle cx="200" cy="200" r="80"/>"#.into(),
            age_min: ages.0,
            age_max: ages.1,
            category: category.into(),
        }
    }

    fn sample() -> TemplateCatalog {
        let mut catalog = TemplateCatalog::new();
        catalog.add(template("cat", "Cat", "animals", (3, 6)));
        catalog.add(template("rocket", "Rocket", "vehicles", (6, 12)));
        catalog.add(template("butterfly", "Butterfly", "Animals", (5, 9)));
        catalog.add(template("shape_star", "Star", "shapes", (3, 12)));
        catalog
    }

    fn names(list: Vec<&DrawingTemplate>) -> Vec<&str> {
        list.into_iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_filter_by_age_sorted() {
        let catalog = sample();
        assert_eq!(
            names(catalog.filtered(&TemplateQuery::for_age(6))),
            vec!["Butterfly", "Cat", "Rocket", "Star"]
        );
        assert_eq!(
            names(catalog.filtered(&TemplateQuery::for_age(12))),
            vec!["Rocket", "Star"]
        );
    }

    #[test]
    fn test_filter_category_case_insensitive() {
        let catalog = sample();
        let query = TemplateQuery::for_age(5).with_category(TemplateCategory::Animals);
        assert_eq!(names(catalog.filtered(&query)), vec!["Butterfly", "Cat"]);
    }

    #[test]
    fn test_filter_search() {
        let catalog = sample();
        let query = TemplateQuery::default().with_search("  ROCK ");
        assert_eq!(names(catalog.filtered(&query)), vec!["Rocket"]);
        // category text matches too
        let query = TemplateQuery::default().with_search("anim");
        assert_eq!(names(catalog.filtered(&query)), vec!["Butterfly", "Cat"]);
    }

    #[test]
    fn test_get_and_replace() {
        let mut catalog = sample();
        catalog.add(template("cat", "Kitten", "animals", (3, 6)));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("cat").unwrap().name, "Kitten");
        assert!(matches!(catalog.get("dog"), Err(ArtistError::NotFound(_))));
    }

    #[test]
    fn test_import_defaults_and_clamps() {
        let json = r#"[
            {"id":"a","name":"A","svgPath":"","category":"dragons"},
            {"id":"b","name":"B","svgPath":"","ageMin":1,"ageMax":40,"category":"nature"},
            {"id":"c","name":"C","svgPath":"","ageMin":9,"category":"fantasy"}
        ]"#;
        let mut catalog = TemplateCatalog::new();
        let imported = catalog
            .import_json_if_empty(json, &AgeRangeConfig::default())
            .unwrap();
        assert_eq!(imported, 3);

        let a = catalog.get("a").unwrap();
        assert_eq!((a.age_min, a.age_max), (6, 6));
        assert_eq!(a.category, "shapes");

        let b = catalog.get("b").unwrap();
        assert_eq!((b.age_min, b.age_max), (3, 12));

        let c = catalog.get("c").unwrap();
        assert_eq!((c.age_min, c.age_max), (9, 9));
    }

    #[test]
    fn test_import_skipped_when_populated() {
        let mut catalog = sample();
        let json = r#"[{"id":"x","name":"X","svgPath":"","category":"shapes"}]"#;
        let imported = catalog
            .import_json_if_empty(json, &AgeRangeConfig::default())
            .unwrap();
        assert_eq!(imported, 0);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_import_rejects_inverted_age_range() {
        let ages = AgeRangeConfig {
            min: 9,
            max: 4,
            default_age: 6,
        };
        let json = r#"[{"id":"x","name":"X","svgPath":"","ageMin":5,"category":"shapes"}]"#;
        let mut catalog = TemplateCatalog::new();
        let result = catalog.import_json_if_empty(json, &ages);
        assert!(matches!(result, Err(ArtistError::Config(_))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_strict_decode_requires_ages() {
        let json = r#"[{"id":"x","name":"X","svgPath":"","category":"shapes"}]"#;
        assert!(matches!(
            TemplateCatalog::from_json_str(json),
            Err(ArtistError::Json(_))
        ));
    }
}
