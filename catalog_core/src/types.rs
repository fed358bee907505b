//! Core domain types for exercise catalog selection.
//!
//! This module defines the catalog-side types:
//! - Categories (body parts plus the synthetic Warmup/Cardio groupings)
//! - Exercise records as delivered by a catalog loader
//! - Locales supported by the catalog

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Category
// ============================================================================

/// A body-part grouping, or one of the synthetic Warmup/Cardio groupings
///
/// Serialized as its display label ("Upper Back", "Warmup", ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Warmup,
    Cardio,
    Shoulders,
    UpperArms,
    Forearms,
    Chest,
    Abdomen,
    UpperBack,
    LowerBack,
    Glutes,
    UpperLegs,
    LowerLegs,
    Neck,
    Core,
    LowerBody,
    Other(String),
}

impl Category {
    /// Body parts a user can target, in questionnaire order
    pub const TARGETS: [Category; 11] = [
        Category::Shoulders,
        Category::UpperArms,
        Category::Forearms,
        Category::Chest,
        Category::Abdomen,
        Category::UpperBack,
        Category::LowerBack,
        Category::Glutes,
        Category::UpperLegs,
        Category::LowerLegs,
        Category::Neck,
    ];

    /// Display label, also used as the serialized form
    pub fn label(&self) -> &str {
        match self {
            Category::Warmup => "Warmup",
            Category::Cardio => "Cardio",
            Category::Shoulders => "Shoulders",
            Category::UpperArms => "Upper Arms",
            Category::Forearms => "Forearms",
            Category::Chest => "Chest",
            Category::Abdomen => "Abdomen",
            Category::UpperBack => "Upper Back",
            Category::LowerBack => "Lower Back",
            Category::Glutes => "Glutes",
            Category::UpperLegs => "Upper Legs",
            Category::LowerLegs => "Lower Legs",
            Category::Neck => "Neck",
            Category::Core => "Core",
            Category::LowerBody => "Lower Body",
            Category::Other(label) => label,
        }
    }

    /// Parse a label case-insensitively; unknown labels become `Other`
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "warmup" => Category::Warmup,
            "cardio" => Category::Cardio,
            "shoulders" => Category::Shoulders,
            "upperarms" => Category::UpperArms,
            "forearms" => Category::Forearms,
            "chest" => Category::Chest,
            "abdomen" => Category::Abdomen,
            "upperback" => Category::UpperBack,
            "lowerback" => Category::LowerBack,
            "glutes" => Category::Glutes,
            "upperlegs" => Category::UpperLegs,
            "lowerlegs" => Category::LowerLegs,
            "neck" => Category::Neck,
            "core" => Category::Core,
            "lowerbody" => Category::LowerBody,
            _ => Category::Other(label.trim().to_string()),
        }
    }

    /// File-name friendly form of the label ("Upper Back" -> "upper-back")
    pub fn slug(&self) -> String {
        self.label()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Whether the catalog is known to hold entries for this category
    ///
    /// Neck is a valid target in the questionnaire but has no exercises;
    /// unrecognized labels never map to catalog entries.
    pub fn has_catalog_entries(&self) -> bool {
        !matches!(self, Category::Neck | Category::Other(_))
    }

    /// Warmup and Cardio are assembled by the engine, not targeted by users
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Category::Warmup | Category::Cardio)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

// ============================================================================
// Locale
// ============================================================================

/// Catalog locale
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Nb,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Nb];

    /// Language code used in requests and catalog directory names
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Nb => "nb",
        }
    }

    /// Parse a language code; returns None for unsupported codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Some(Locale::En),
            "nb" | "no" | "nb-no" | "norwegian" => Some(Locale::Nb),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Exercise Records
// ============================================================================

/// Exercise difficulty as labelled by the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    #[serde(alias = "Beginner")]
    Beginner,
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
}

/// A single catalog entry
///
/// Records are owned by whoever loaded them; the selection engine only moves
/// them between stages and never edits a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default, rename = "equipment")]
    pub equipment_tags: Vec<String>,
    /// indoor/outdoor, only set on cardio records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_roundtrip() {
        for category in Category::TARGETS {
            assert_eq!(Category::from_label(category.label()), category);
        }
        assert_eq!(Category::from_label("Warmup"), Category::Warmup);
        assert_eq!(Category::from_label("lower body"), Category::LowerBody);
    }

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!(Category::from_label("upper_back"), Category::UpperBack);
        assert_eq!(Category::from_label("  UPPER-LEGS "), Category::UpperLegs);
        assert_eq!(
            Category::from_label("Hip Flexors"),
            Category::Other("Hip Flexors".into())
        );
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(Category::UpperBack.slug(), "upper-back");
        assert_eq!(Category::Warmup.slug(), "warmup");
    }

    #[test]
    fn test_neck_has_no_entries() {
        assert!(!Category::Neck.has_catalog_entries());
        assert!(Category::Chest.has_catalog_entries());
        assert!(!Category::Other("Biceps".into()).has_catalog_entries());
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::from_code("nb"), Some(Locale::Nb));
        assert_eq!(Locale::from_code("EN"), Some(Locale::En));
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = r#"{"id":"c1","name":"Push-up","category":"Chest"}"#;
        let record: ExerciseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, Category::Chest);
        assert!(record.equipment_tags.is_empty());
        assert_eq!(record.environment, None);
        assert_eq!(record.difficulty, Difficulty::Beginner);
    }
}
