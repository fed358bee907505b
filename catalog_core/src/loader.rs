//! JSON catalog directory loader.
//!
//! Layout: `<root>/<locale>/<category-slug>.json`, each file holding
//! `{"exercises": [...]}`. A missing file is an empty category; a file that
//! cannot be read or parsed makes the whole load fail.

use crate::catalog::{Catalog, CatalogLoader, LoadRequest};
use crate::{Category, Difficulty, Error, ExerciseRecord, Locale, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Catalog file format
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    exercises: Vec<FileRecord>,
}

/// Exercise entry as stored on disk
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    #[serde(alias = "exerciseId")]
    id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    target_body_parts: Vec<String>,
    #[serde(default)]
    equipment: Vec<String>,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

impl FileRecord {
    /// Warmup and Cardio files keep their category; other files defer to the
    /// record's first target body part, then its own category field
    fn into_record(self, requested: &Category) -> ExerciseRecord {
        let category = if requested.is_synthetic() {
            requested.clone()
        } else {
            self.target_body_parts
                .first()
                .map(String::as_str)
                .or(self.category.as_deref())
                .map(Category::from_label)
                .unwrap_or_else(|| requested.clone())
        };

        ExerciseRecord {
            id: self.id,
            name: self.name,
            category,
            equipment_tags: self.equipment,
            environment: self.environment,
            difficulty: self.difficulty.unwrap_or_default(),
        }
    }
}

/// Loads exercises from a directory of JSON files
#[derive(Clone, Debug)]
pub struct JsonCatalogLoader {
    root: PathBuf,
}

impl JsonCatalogLoader {
    /// Create a loader; fails if `root` is not a directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::CatalogUnavailable(format!(
                "Catalog directory {:?} does not exist",
                root
            )));
        }
        Ok(Self { root })
    }

    /// Path of the file holding one category
    ///
    /// Slugs must be a single plain file name below the locale directory.
    pub fn category_path(&self, locale: Locale, category: &Category) -> Result<PathBuf> {
        let slug = category.slug();
        let plain = !slug.is_empty()
            && !slug.contains("..")
            && !slug.contains(|c: char| c == '/' || c == '\\' || c == ':');
        if !plain {
            return Err(Error::CatalogUnavailable(format!(
                "Category {:?} has no catalog file",
                category.label()
            )));
        }
        Ok(self.root.join(locale.code()).join(format!("{}.json", slug)))
    }

    fn load_category(&self, locale: Locale, category: &Category) -> Result<Vec<ExerciseRecord>> {
        let path = self.category_path(locale, category)?;
        if !path.exists() {
            tracing::debug!("No catalog file at {:?}", path);
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::CatalogUnavailable(format!("Failed to read {:?}: {}", path, e))
        })?;
        let file: CatalogFile = serde_json::from_str(&contents).map_err(|e| {
            Error::CatalogUnavailable(format!("Failed to parse {:?}: {}", path, e))
        })?;

        tracing::debug!("{:?} -> {} exercises", path, file.exercises.len());
        Ok(file
            .exercises
            .into_iter()
            .map(|record| record.into_record(category))
            .collect())
    }

    /// Read every known category of every locale into memory
    ///
    /// Used for validation; request handling reads files on demand.
    pub fn read_all(&self) -> Result<Catalog> {
        let categories: Vec<Category> = [Category::Warmup, Category::Cardio]
            .into_iter()
            .chain(Category::TARGETS)
            .chain([Category::Core, Category::LowerBody])
            .collect();

        let mut catalog = Catalog::new();
        for locale in Locale::ALL {
            for category in &categories {
                for record in self.load_category(locale, category)? {
                    catalog.insert(locale, record);
                }
            }
        }
        Ok(catalog)
    }
}

impl CatalogLoader for JsonCatalogLoader {
    fn load(&self, request: &LoadRequest) -> Result<Vec<ExerciseRecord>> {
        let mut records = Vec::new();
        for category in &request.categories {
            let loaded = self.load_category(request.locale, category)?;
            match &request.equipment_hint {
                Some(equipment) => {
                    records.extend(loaded.into_iter().filter(|r| equipment.permits(r)))
                }
                None => records.extend(loaded),
            }
        }
        Ok(records)
    }
}
