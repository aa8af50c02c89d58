//! Drawing templates and their categories

use crate::error::ArtistError;
use artist_outline::{combined_fill_region, scan, GeometryElement, VectorPath};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named outline a child can draw over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingTemplate {
    pub id: String,
    pub name: String,
    /// Outline markup in the logical 400×400 canvas.
    pub svg_path: String,
    pub age_min: u8,
    pub age_max: u8,
    pub category: String,
}

impl DrawingTemplate {
    /// Outline geometry, one element per supported tag.
    pub fn geometry(&self) -> Vec<GeometryElement> {
        scan(&self.svg_path)
    }

    /// Combined interior used to mask strokes.
    pub fn fill_region(&self) -> VectorPath {
        combined_fill_region(&self.svg_path)
    }

    /// Whether a child of `age` is in the template's range.
    pub fn suits_age(&self, age: u8) -> bool {
        (self.age_min..=self.age_max).contains(&age)
    }

    /// The category, if it is one of the known ones.
    pub fn category_kind(&self) -> Option<TemplateCategory> {
        self.category.to_lowercase().parse().ok()
    }

    /// Key of the translated display name.
    pub fn localized_name_key(&self) -> String {
        format!("template_name_{}", self.id.replace("shape_", ""))
    }
}

/// Template categories shown as filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    #[default]
    All,
    Shapes,
    Animals,
    Nature,
    Buildings,
    Vehicles,
    Fantasy,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 7] = [
        TemplateCategory::All,
        TemplateCategory::Shapes,
        TemplateCategory::Animals,
        TemplateCategory::Nature,
        TemplateCategory::Buildings,
        TemplateCategory::Vehicles,
        TemplateCategory::Fantasy,
    ];

    /// Raw value stored in template records.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::All => "all",
            TemplateCategory::Shapes => "shapes",
            TemplateCategory::Animals => "animals",
            TemplateCategory::Nature => "nature",
            TemplateCategory::Buildings => "buildings",
            TemplateCategory::Vehicles => "vehicles",
            TemplateCategory::Fantasy => "fantasy",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TemplateCategory::All => "All",
            TemplateCategory::Shapes => "Shapes",
            TemplateCategory::Animals => "Animals",
            TemplateCategory::Nature => "Nature",
            TemplateCategory::Buildings => "Buildings",
            TemplateCategory::Vehicles => "Vehicles",
            TemplateCategory::Fantasy => "Fantasy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TemplateCategory::All => "🎨",
            TemplateCategory::Shapes => "⭐",
            TemplateCategory::Animals => "🦋",
            TemplateCategory::Nature => "🌸",
            TemplateCategory::Buildings => "🏠",
            TemplateCategory::Vehicles => "🚀",
            TemplateCategory::Fantasy => "🦄",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = ArtistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ArtistError::parse(format!("unknown template category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> DrawingTemplate {
        DrawingTemplate {
            id: "shape_star".into(),
            name: "Star".into(),
            svg_path: r#"<polygon points="200,60 240,160 340,160 260,220 290,320 200,260 110,320 140,220 60,160 160,160" stroke-width="6"/>"#.into(),
            age_min: 3,
            age_max: 6,
            category: "Shapes".into(),
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(star()).unwrap();
        assert!(json.get("svgPath").is_some());
        assert_eq!(json["ageMin"], 3);
    }

    #[test]
    fn test_geometry_and_region() {
        let t = star();
        assert_eq!(t.geometry().len(), 1);
        assert_eq!(t.fill_region().len(), 11);
    }

    #[test]
    fn test_age_and_category() {
        let t = star();
        assert!(t.suits_age(3));
        assert!(t.suits_age(6));
        assert!(!t.suits_age(7));
        assert_eq!(t.category_kind(), Some(TemplateCategory::Shapes));
        assert_eq!(t.localized_name_key(), "template_name_star");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("vehicles".parse::<TemplateCategory>().unwrap(), TemplateCategory::Vehicles);
        assert!("Vehicles".parse::<TemplateCategory>().is_err());
        assert_eq!(TemplateCategory::Fantasy.title(), "Fantasy");
    }
}
