//! The assembled catalog document and its JSON form.

use crate::capability::has_special_tag;
use crate::{Category, Difficulty, ExerciseRecord, Result};
use serde::Serialize;

/// Exercises of one category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: Category,
    pub exercises: Vec<ExerciseRecord>,
}

/// Ordered, categorized exercise catalog for one profile
///
/// Warmup comes first, Cardio second, then body parts in the order they were
/// first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    pub groups: Vec<CategoryGroup>,
    pub total_count: usize,
}

impl CatalogDocument {
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.groups.iter().map(|group| &group.category)
    }

    pub fn group(&self, category: &Category) -> Option<&CategoryGroup> {
        self.groups.iter().find(|group| &group.category == category)
    }

    pub fn records(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.groups.iter().flat_map(|group| group.exercises.iter())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records().any(|record| record.id == id)
    }

    /// Render the document as pretty JSON
    ///
    /// Equipment is listed for every exercise when `verbose`, otherwise only
    /// for exercises tagged with suspension or kettlebell equipment.
    pub fn to_json(&self, verbose: bool) -> Result<String> {
        let view = DocumentView {
            categories: self
                .groups
                .iter()
                .map(|group| GroupView {
                    category: &group.category,
                    exercises: group
                        .exercises
                        .iter()
                        .map(|record| ExerciseView::new(record, &group.category, verbose))
                        .collect(),
                })
                .collect(),
            total_count: self.total_count,
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentView<'a> {
    categories: Vec<GroupView<'a>>,
    total_count: usize,
}

#[derive(Serialize)]
struct GroupView<'a> {
    category: &'a Category,
    exercises: Vec<ExerciseView<'a>>,
}

#[derive(Serialize)]
struct ExerciseView<'a> {
    id: &'a str,
    name: &'a str,
    difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    equipment: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a Category>,
}

impl<'a> ExerciseView<'a> {
    fn new(record: &'a ExerciseRecord, group: &'a Category, verbose: bool) -> Self {
        let show_equipment = verbose || has_special_tag(record);
        Self {
            id: &record.id,
            name: &record.name,
            difficulty: record.difficulty,
            equipment: show_equipment.then_some(record.equipment_tags.as_slice()),
            category: (*group == Category::Warmup).then_some(group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn record(id: &str, category: Category, tags: &[&str]) -> ExerciseRecord {
        ExerciseRecord {
            id: id.into(),
            name: format!("Exercise {}", id),
            category,
            equipment_tags: tags.iter().map(|t| t.to_string()).collect(),
            environment: None,
            difficulty: Difficulty::Intermediate,
        }
    }

    fn document() -> CatalogDocument {
        CatalogDocument {
            groups: vec![
                CategoryGroup {
                    category: Category::Warmup,
                    exercises: vec![record("w1", Category::Warmup, &["Bodyweight"])],
                },
                CategoryGroup {
                    category: Category::Chest,
                    exercises: vec![
                        record("c1", Category::Chest, &["Dumbbell"]),
                        record("c2", Category::Chest, &["Kettlebell"]),
                    ],
                },
            ],
            total_count: 3,
        }
    }

    #[test]
    fn test_terse_json_shows_special_equipment_only() {
        let json: Value = serde_json::from_str(&document().to_json(false).unwrap()).unwrap();

        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["categories"][0]["category"], "Warmup");
        let warmup = &json["categories"][0]["exercises"][0];
        assert_eq!(warmup["category"], "Warmup");
        assert!(warmup.get("equipment").is_none());

        let chest = &json["categories"][1]["exercises"];
        assert_eq!(chest[0]["difficulty"], "intermediate");
        assert!(chest[0].get("equipment").is_none());
        assert!(chest[0].get("category").is_none());
        assert_eq!(chest[1]["equipment"][0], "Kettlebell");
    }

    #[test]
    fn test_verbose_json_shows_all_equipment() {
        let json: Value = serde_json::from_str(&document().to_json(true).unwrap()).unwrap();
        assert_eq!(json["categories"][0]["exercises"][0]["equipment"][0], "Bodyweight");
        assert_eq!(json["categories"][1]["exercises"][0]["equipment"][0], "Dumbbell");
    }

    #[test]
    fn test_lookup_helpers() {
        let doc = document();
        assert!(doc.contains_id("c2"));
        assert!(!doc.contains_id("missing"));
        assert_eq!(doc.group(&Category::Chest).map(|g| g.exercises.len()), Some(2));
        assert_eq!(
            doc.categories().cloned().collect::<Vec<_>>(),
            vec![Category::Warmup, Category::Chest]
        );
    }
}
