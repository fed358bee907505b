//! Exercise catalog access.
//!
//! The engine reads exercises through the `CatalogLoader` trait. This module
//! also provides an in-memory `Catalog` and a small built-in bilingual
//! catalog used by the CLI when no catalog directory is configured.

use crate::equipment::EffectiveEquipment;
use crate::{Category, Difficulty, ExerciseRecord, Locale, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

/// One loader call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub categories: Vec<Category>,
    pub locale: Locale,
    /// Loaders may pre-filter with this; the engine filters again regardless
    pub equipment_hint: Option<EffectiveEquipment>,
}

/// Source of exercise records
///
/// Implementations must be read-only: the engine may issue several calls for
/// one request, concurrently, and expects fresh record lists from each.
pub trait CatalogLoader: Send + Sync {
    fn load(&self, request: &LoadRequest) -> Result<Vec<ExerciseRecord>>;
}

/// In-memory catalog, one record list per locale
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub records: BTreeMap<Locale, Vec<ExerciseRecord>>,
}

impl CatalogLoader for Catalog {
    fn load(&self, request: &LoadRequest) -> Result<Vec<ExerciseRecord>> {
        let records = self
            .records
            .get(&request.locale)
            .map(Vec::as_slice)
            .unwrap_or_default();

        // Category order of the request, catalog order within a category
        let mut loaded = Vec::new();
        for category in &request.categories {
            loaded.extend(
                records
                    .iter()
                    .filter(|record| &record.category == category)
                    .filter(|record| {
                        request
                            .equipment_hint
                            .as_ref()
                            .map_or(true, |equipment| equipment.permits(record))
                    })
                    .cloned(),
            );
        }

        tracing::debug!(
            "Loaded {} records for {:?} ({})",
            loaded.len(),
            request.categories,
            request.locale
        );
        Ok(loaded)
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to a locale
    pub fn insert(&mut self, locale: Locale, record: ExerciseRecord) {
        self.records.entry(locale).or_default().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (locale, records) in &self.records {
            let mut ids = HashSet::new();
            for record in records {
                if record.id.trim().is_empty() {
                    errors.push(format!("[{}] Exercise '{}' has empty ID", locale, record.name));
                } else if !ids.insert(record.id.as_str()) {
                    errors.push(format!("[{}] Duplicate exercise ID '{}'", locale, record.id));
                }
                if record.name.trim().is_empty() {
                    errors.push(format!("[{}] Exercise '{}' has empty name", locale, record.id));
                }
                if record.category == Category::Cardio && record.environment.is_none() {
                    errors.push(format!(
                        "[{}] Cardio exercise '{}' has no environment tag",
                        locale, record.id
                    ));
                }
                if record.category != Category::Cardio && record.environment.is_some() {
                    errors.push(format!(
                        "[{}] Non-cardio exercise '{}' has an environment tag",
                        locale, record.id
                    ));
                }
            }

            for required in [Category::Warmup, Category::Cardio] {
                if !records.iter().any(|r| r.category == required) {
                    errors.push(format!("[{}] Catalog has no {} exercises", locale, required));
                }
            }
        }

        errors
    }
}

// ============================================================================
// Built-in Catalog
// ============================================================================

/// Cached built-in catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached built-in catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn exercise(
    id: &str,
    name: &str,
    category: Category,
    tags: &[&str],
    environment: Option<&str>,
    difficulty: Difficulty,
) -> ExerciseRecord {
    ExerciseRecord {
        id: id.into(),
        name: name.into(),
        category,
        equipment_tags: tags.iter().map(|t| t.to_string()).collect(),
        environment: environment.map(Into::into),
        difficulty,
    }
}

/// Builds the built-in catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Catalog {
    use Category::*;
    use Difficulty::*;

    let english = vec![
        // Warmups
        exercise("warmup-1", "Jumping Jacks", Warmup, &["Bodyweight"], None, Beginner),
        exercise("warmup-2", "Arm Circles", Warmup, &["Bodyweight"], None, Beginner),
        exercise("warmup-3", "Band Pull-Apart", Warmup, &["Resistance Band"], None, Beginner),
        exercise("warmup-4", "Light Rowing Warmup", Warmup, &["Rowing Machine"], None, Beginner),
        // Cardio
        exercise("cardio-1", "Outdoor Running", Cardio, &[], Some("outdoor"), Beginner),
        exercise("cardio-2", "Treadmill Running", Cardio, &["Treadmill"], Some("indoor"), Beginner),
        exercise("cardio-3", "Running Intervals 4x4", Cardio, &[], Some("outdoor"), Advanced),
        exercise("cardio-4", "Treadmill Interval Running", Cardio, &["Treadmill"], Some("indoor"), Intermediate),
        exercise("cardio-5", "Stationary Bike", Cardio, &["Exercise Bike"], Some("indoor"), Beginner),
        exercise("cardio-6", "Road Cycling", Cardio, &["Bike"], Some("outdoor"), Intermediate),
        exercise("cardio-7", "Indoor Cycling Intervals", Cardio, &["Exercise Bike"], Some("indoor"), Advanced),
        exercise("cardio-8", "Rowing Machine Steady State", Cardio, &["Rowing Machine"], Some("indoor"), Beginner),
        exercise("cardio-9", "Elliptical Trainer", Cardio, &["Elliptical"], Some("indoor"), Beginner),
        // Chest
        exercise("chest-1", "Dumbbell Bench Press", Chest, &["Dumbbell", "Bench"], None, Intermediate),
        exercise("chest-2", "Barbell Bench Press", Chest, &["Barbell"], None, Intermediate),
        exercise("chest-3", "Push-up", Chest, &["Bodyweight"], None, Beginner),
        exercise("chest-4", "Cable Fly", Chest, &["Cable Machine"], None, Intermediate),
        exercise("chest-5", "TRX Chest Press", Chest, &["TRX"], None, Beginner),
        // Shoulders
        exercise("shoulders-1", "Dumbbell Shoulder Press", Shoulders, &["Dumbbell"], None, Beginner),
        exercise("shoulders-2", "Barbell Overhead Press", Shoulders, &["Barbell"], None, Intermediate),
        exercise("shoulders-3", "Kettlebell Halo", Shoulders, &["Kettlebell"], None, Beginner),
        exercise("shoulders-4", "Pike Push-up", Shoulders, &["Bodyweight"], None, Intermediate),
        // Upper Arms
        exercise("arms-1", "Dumbbell Biceps Curl", UpperArms, &["Dumbbell"], None, Beginner),
        exercise("arms-2", "Bench Dip", UpperArms, &["Bench"], None, Beginner),
        // Forearms
        exercise("forearms-1", "Farmer's Carry", Forearms, &["Dumbbell"], None, Beginner),
        // Abdomen
        exercise("abs-1", "Plank", Abdomen, &["Bodyweight"], None, Beginner),
        exercise("abs-2", "Cable Crunch", Abdomen, &["Cable Machine"], None, Intermediate),
        // Upper Back
        exercise("back-1", "Bent-over Dumbbell Row", UpperBack, &["Dumbbell", "Bench"], None, Beginner),
        exercise("back-2", "Lat Pulldown", UpperBack, &["Cable Machine"], None, Beginner),
        exercise("back-3", "Inverted Row", UpperBack, &["Barbell", "Squat Rack"], None, Intermediate),
        exercise("back-4", "TRX Row", UpperBack, &["TRX"], None, Beginner),
        // Lower Back
        exercise("lowerback-1", "Back Extension", LowerBack, &["Bodyweight"], None, Beginner),
        // Glutes
        exercise("glutes-1", "Glute Bridge", Glutes, &["Bodyweight"], None, Beginner),
        exercise("glutes-2", "Barbell Hip Thrust", Glutes, &["Barbell", "Bench"], None, Intermediate),
        // Upper Legs
        exercise("legs-1", "Barbell Back Squat", UpperLegs, &["Barbell", "Squat Rack"], None, Intermediate),
        exercise("legs-2", "Goblet Squat", UpperLegs, &["Dumbbell"], None, Beginner),
        exercise("legs-3", "Pistol Squat", UpperLegs, &["Bodyweight"], None, Advanced),
        exercise("legs-4", "Kettlebell Swing", UpperLegs, &["Kettlebell"], None, Intermediate),
        exercise("legs-5", "TRX Hamstring Curl", UpperLegs, &["Suspension Trainer"], None, Intermediate),
        // Lower Legs
        exercise("calves-1", "Standing Calf Raise", LowerLegs, &["Bodyweight"], None, Beginner),
    ];

    let norwegian = vec![
        exercise("warmup-1", "Sprellemann", Warmup, &["Bodyweight"], None, Beginner),
        exercise("warmup-3", "Strikk-trekk", Warmup, &["Resistance Band"], None, Beginner),
        exercise("cardio-1", "Løping utendørs", Cardio, &[], Some("utendørs"), Beginner),
        exercise("cardio-2", "Løping på tredemølle", Cardio, &["Treadmill"], Some("innendørs"), Beginner),
        exercise("cardio-3", "Løpeintervaller 4x4", Cardio, &[], Some("utendørs"), Advanced),
        exercise("cardio-5", "Stasjonær sykkel", Cardio, &["Exercise Bike"], Some("innendørs"), Beginner),
        exercise("cardio-6", "Sykling på vei", Cardio, &["Bike"], Some("utendørs"), Intermediate),
        exercise("cardio-8", "Roing på romaskin", Cardio, &["Rowing Machine"], Some("innendørs"), Beginner),
        exercise("chest-1", "Benkpress med manualer", Chest, &["Dumbbell", "Bench"], None, Intermediate),
        exercise("chest-2", "Benkpress med vektstang", Chest, &["Barbell"], None, Intermediate),
        exercise("chest-3", "Armhevinger", Chest, &["Bodyweight"], None, Beginner),
        exercise("shoulders-1", "Skulderpress med manualer", Shoulders, &["Dumbbell"], None, Beginner),
        exercise("back-1", "Foroverbøyd roing med manual", UpperBack, &["Dumbbell", "Bench"], None, Beginner),
        exercise("legs-2", "Goblet-knebøy", UpperLegs, &["Dumbbell"], None, Beginner),
        exercise("legs-4", "Kettlebell-sving", UpperLegs, &["Kettlebell"], None, Intermediate),
        exercise("glutes-1", "Seteløft", Glutes, &["Bodyweight"], None, Beginner),
    ];

    let mut catalog = Catalog::new();
    catalog.records.insert(Locale::En, english);
    catalog.records.insert(Locale::Nb, norwegian);
    catalog
}
