//! Exclusion, deduplication and grouping into the output document.

use crate::document::{CatalogDocument, CategoryGroup};
use crate::planner::LoadPlan;
use crate::{Category, ExerciseRecord};
use std::collections::{BTreeSet, HashSet};

/// Record sets gathered for one request, in merge order
#[derive(Clone, Debug, Default)]
pub struct RecordSets {
    pub base: Vec<ExerciseRecord>,
    /// Already narrowed by the cardio filter
    pub cardio: Vec<ExerciseRecord>,
    pub suspension: Vec<ExerciseRecord>,
    pub kettlebell: Vec<ExerciseRecord>,
}

impl RecordSets {
    /// All records in the fixed order base, cardio, suspension, kettlebell
    ///
    /// Cardio-categorized records are only taken from the filtered cardio
    /// set, and warmups are dropped when the plan has no warmup block.
    fn merged(self, plan: &LoadPlan) -> impl Iterator<Item = ExerciseRecord> + '_ {
        let RecordSets {
            base,
            cardio,
            suspension,
            kettlebell,
        } = self;

        let non_cardio = move |record: &ExerciseRecord| {
            record.category != Category::Cardio
                && (plan.needs_warmup || record.category != Category::Warmup)
        };

        base.into_iter()
            .filter(non_cardio)
            .chain(
                cardio
                    .into_iter()
                    .filter(move |record| plan.needs_cardio && record.category == Category::Cardio),
            )
            .chain(suspension.into_iter().filter(non_cardio))
            .chain(kettlebell.into_iter().filter(non_cardio))
    }
}

/// Build the output document
///
/// Excluded ids never appear, each id appears at most once (first occurrence
/// in merge order wins), and `total_count` is the sum of all group sizes.
pub fn assemble(
    sets: RecordSets,
    plan: &LoadPlan,
    excluded_ids: &BTreeSet<String>,
) -> CatalogDocument {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    if plan.needs_warmup {
        groups.push(CategoryGroup {
            category: Category::Warmup,
            exercises: Vec::new(),
        });
    }
    if plan.needs_cardio {
        groups.push(CategoryGroup {
            category: Category::Cardio,
            exercises: Vec::new(),
        });
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut excluded = 0usize;
    let mut duplicates = 0usize;

    for record in sets.merged(plan) {
        if excluded_ids.contains(&record.id) {
            excluded += 1;
            continue;
        }
        if !seen.insert(record.id.clone()) {
            duplicates += 1;
            continue;
        }

        match groups.iter_mut().find(|g| g.category == record.category) {
            Some(group) => group.exercises.push(record),
            None => groups.push(CategoryGroup {
                category: record.category.clone(),
                exercises: vec![record],
            }),
        }
    }

    let total_count = groups.iter().map(|g| g.exercises.len()).sum();

    tracing::debug!(
        "Assembled {} exercises in {} categories ({} excluded, {} duplicates dropped)",
        total_count,
        groups.len(),
        excluded,
        duplicates
    );

    CatalogDocument {
        groups,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_load;
    use crate::TrainingModality;
    use pretty_assertions::assert_eq;

    fn record(id: &str, category: Category) -> ExerciseRecord {
        ExerciseRecord {
            id: id.into(),
            name: id.into(),
            category,
            equipment_tags: vec![],
            environment: None,
            difficulty: Default::default(),
        }
    }

    fn ids(doc: &CatalogDocument, category: &Category) -> Vec<String> {
        doc.group(category)
            .map(|g| g.exercises.iter().map(|r| r.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_order_warmup_cardio_then_first_seen() {
        let plan = plan_load(TrainingModality::Both, &[Category::Shoulders, Category::Chest]);
        let sets = RecordSets {
            base: vec![
                record("s1", Category::Shoulders),
                record("w1", Category::Warmup),
                record("c1", Category::Chest),
                record("s2", Category::Shoulders),
            ],
            cardio: vec![record("k1", Category::Cardio)],
            ..Default::default()
        };

        let doc = assemble(sets, &plan, &BTreeSet::new());
        assert_eq!(
            doc.categories().cloned().collect::<Vec<_>>(),
            vec![
                Category::Warmup,
                Category::Cardio,
                Category::Shoulders,
                Category::Chest
            ]
        );
        assert_eq!(ids(&doc, &Category::Shoulders), vec!["s1", "s2"]);
        assert_eq!(doc.total_count, 5);
    }

    #[test]
    fn test_cardio_key_present_when_empty() {
        let plan = plan_load(TrainingModality::Cardio, &[Category::Chest]);
        let doc = assemble(RecordSets::default(), &plan, &BTreeSet::new());
        assert_eq!(doc.categories().cloned().collect::<Vec<_>>(), vec![Category::Cardio]);
        assert_eq!(doc.total_count, 0);
    }

    #[test]
    fn test_no_cardio_key_for_strength() {
        let plan = plan_load(TrainingModality::Strength, &[Category::Chest]);
        let sets = RecordSets {
            base: vec![record("c1", Category::Chest), record("k1", Category::Cardio)],
            cardio: vec![record("k2", Category::Cardio)],
            ..Default::default()
        };
        let doc = assemble(sets, &plan, &BTreeSet::new());
        assert!(doc.group(&Category::Cardio).is_none());
        assert_eq!(doc.total_count, 1);
    }

    #[test]
    fn test_warmup_records_dropped_for_cardio_only() {
        let plan = plan_load(TrainingModality::Cardio, &[]);
        let sets = RecordSets {
            base: vec![record("w1", Category::Warmup), record("g1", Category::Glutes)],
            ..Default::default()
        };
        let doc = assemble(sets, &plan, &BTreeSet::new());
        assert!(doc.group(&Category::Warmup).is_none());
        assert!(doc.contains_id("g1"));
    }

    #[test]
    fn test_exclusion_applies_to_every_source() {
        let plan = plan_load(TrainingModality::Both, &[Category::UpperLegs]);
        let sets = RecordSets {
            base: vec![record("q1", Category::UpperLegs), record("q2", Category::UpperLegs)],
            cardio: vec![record("k1", Category::Cardio)],
            suspension: vec![record("t1", Category::UpperLegs)],
            kettlebell: vec![record("b1", Category::Shoulders)],
        };
        let excluded: BTreeSet<String> =
            ["q1", "k1", "t1", "b1"].iter().map(|s| s.to_string()).collect();

        let doc = assemble(sets, &plan, &excluded);
        for id in &excluded {
            assert!(!doc.contains_id(id), "{} should be excluded", id);
        }
        assert_eq!(doc.total_count, 1);
    }

    #[test]
    fn test_duplicates_across_sources_kept_once() {
        let plan = plan_load(TrainingModality::Strength, &[Category::UpperLegs]);
        let sets = RecordSets {
            base: vec![record("q1", Category::UpperLegs)],
            suspension: vec![record("q1", Category::UpperLegs), record("t1", Category::Core)],
            kettlebell: vec![record("q1", Category::UpperLegs), record("t1", Category::Core)],
            ..Default::default()
        };
        let doc = assemble(sets, &plan, &BTreeSet::new());
        assert_eq!(ids(&doc, &Category::UpperLegs), vec!["q1"]);
        assert_eq!(ids(&doc, &Category::Core), vec!["t1"]);
        assert_eq!(doc.total_count, 2);
    }

    #[test]
    fn test_total_count_matches_groups() {
        let plan = plan_load(TrainingModality::Both, &[]);
        let sets = RecordSets {
            base: (0..7)
                .map(|i| record(&format!("r{}", i), Category::TARGETS[i % 3].clone()))
                .collect(),
            cardio: vec![record("k1", Category::Cardio), record("k2", Category::Cardio)],
            ..Default::default()
        };
        let doc = assemble(sets, &plan, &BTreeSet::new());
        let sum: usize = doc.groups.iter().map(|g| g.exercises.len()).sum();
        assert_eq!(doc.total_count, sum);
        assert_eq!(doc.total_count, 9);
    }
}
