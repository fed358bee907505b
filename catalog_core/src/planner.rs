//! Decides which catalog categories a request needs.

use crate::{Category, TrainingModality};

/// Categories to load for a request plus the synthetic groups it needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadPlan {
    /// Body parts to load, followed by Warmup when `needs_warmup`
    pub categories_to_load: Vec<Category>,
    pub needs_cardio: bool,
    pub needs_warmup: bool,
}

/// Plan category loading from training modality and target areas
///
/// An empty target list selects every body part that has catalog entries.
/// Pure cardio plans never get a warmup block; everything else does.
pub fn plan_load(modality: TrainingModality, target_categories: &[Category]) -> LoadPlan {
    let mut categories_to_load: Vec<Category> = if target_categories.is_empty() {
        Category::TARGETS
            .into_iter()
            .filter(Category::has_catalog_entries)
            .collect()
    } else {
        target_categories
            .iter()
            .filter(|category| category.has_catalog_entries())
            .cloned()
            .collect()
    };

    let needs_cardio = modality.includes_cardio();
    let needs_warmup = modality != TrainingModality::Cardio
        && (!categories_to_load.is_empty() || modality.includes_strength());

    if needs_warmup {
        categories_to_load.push(Category::Warmup);
    }

    tracing::debug!(
        "Planned {} categories (cardio: {}, warmup: {})",
        categories_to_load.len(),
        needs_cardio,
        needs_warmup
    );

    LoadPlan {
        categories_to_load,
        needs_cardio,
        needs_warmup,
    }
}
