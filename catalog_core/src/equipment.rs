//! Effective equipment resolution.
//!
//! The effective inventory is what the user declared, plus the standard
//! cardio machines of a full facility, plus the bodyweight sentinel. It is
//! recomputed for every request.

use crate::{EnvironmentSetting, ExerciseRecord};
use std::collections::BTreeSet;

/// Tag every inventory contains, so bodyweight exercises are always feasible
pub const BODYWEIGHT: &str = "bodyweight";

/// Machines assumed present in a standard facility
pub const STANDARD_FACILITY_EQUIPMENT: [&str; 5] = [
    "treadmill",
    "exercise-bike",
    "rowing-machine",
    "elliptical",
    "jump-rope",
];

/// Inventory spellings mapped to the canonical item, keys already normalized
static EQUIPMENT_ALIASES: [(&str, &str); 16] = [
    ("kettlebells", "kettlebell"),
    ("kettle-bell", "kettlebell"),
    ("kettle-bells", "kettlebell"),
    ("db", "dumbbell"),
    ("dumbbells", "dumbbell"),
    ("barbells", "barbell"),
    ("trx-suspension", "trx"),
    ("trx-suspension-trainer", "trx"),
    ("bike", "exercise-bike"),
    ("stationary-bike", "exercise-bike"),
    ("rower", "rowing-machine"),
    ("elliptical-trainer", "elliptical"),
    ("elliptical-machine", "elliptical"),
    ("body-weight", "bodyweight"),
    ("treadmills", "treadmill"),
    ("benches", "bench"),
];

/// Normalize an inventory item and resolve known aliases
///
/// Only inventory goes through the alias table; record tags are matched by
/// substring and already cover plurals ("Dumbbells" contains "dumbbell").
pub fn canonical_item(raw: &str) -> String {
    let token = normalize_token(raw);
    EQUIPMENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(token)
}

/// Normalize an equipment name or tag for comparison
///
/// Lowercases and joins words with `-`, so "Rowing Machine", "rowing_machine"
/// and "rowing-machine" compare equal.
pub fn normalize_token(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalized, ordered equipment inventory for one request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectiveEquipment {
    items: BTreeSet<String>,
}

impl EffectiveEquipment {
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(&canonical_item(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if some inventory item contains `fragment`
    pub fn any_contains(&self, fragment: &str) -> bool {
        self.items.iter().any(|item| item.contains(fragment))
    }

    /// Whether the record can be performed with this inventory
    ///
    /// Records without tags need nothing. Otherwise one tag has to contain
    /// one inventory item ("adjustable-bench" is satisfied by "bench").
    pub fn permits(&self, record: &ExerciseRecord) -> bool {
        if record.equipment_tags.is_empty() {
            return true;
        }

        record.equipment_tags.iter().any(|tag| {
            let tag = normalize_token(tag);
            self.items.iter().any(|item| tag.contains(item.as_str()))
        })
    }
}

impl FromIterator<String> for EffectiveEquipment {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|item| canonical_item(&item))
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }
}

/// Compute the effective equipment for a request
pub fn resolve_equipment(
    declared: &[String],
    environment: &EnvironmentSetting,
) -> EffectiveEquipment {
    let augmented: &[&str] = match environment {
        EnvironmentSetting::StandardFacility => &STANDARD_FACILITY_EQUIPMENT[..],
        _ => &[],
    };

    let equipment: EffectiveEquipment = declared
        .iter()
        .cloned()
        .chain(augmented.iter().map(|item| item.to_string()))
        .chain(std::iter::once(BODYWEIGHT.to_string()))
        .collect();

    tracing::debug!(
        "Resolved {} equipment items ({} declared, environment {:?})",
        equipment.len(),
        declared.len(),
        environment
    );

    equipment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn record(tags: &[&str]) -> ExerciseRecord {
        ExerciseRecord {
            id: "r".into(),
            name: "Record".into(),
            category: Category::Chest,
            equipment_tags: tags.iter().map(|t| t.to_string()).collect(),
            environment: None,
            difficulty: Default::default(),
        }
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("Rowing Machine"), "rowing-machine");
        assert_eq!(normalize_token(" jump_rope "), "jump-rope");
        assert_eq!(normalize_token("Exercise  bike"), "exercise-bike");
        assert_eq!(normalize_token("  "), "");
    }

    #[test]
    fn test_standard_facility_augments() {
        let equipment = resolve_equipment(&[], &EnvironmentSetting::StandardFacility);
        for item in STANDARD_FACILITY_EQUIPMENT {
            assert!(equipment.contains(item), "missing {}", item);
        }
        assert!(equipment.contains(BODYWEIGHT));
        assert_eq!(equipment.len(), 6);
    }

    #[test]
    fn test_standard_facility_keeps_declared_without_duplicates() {
        let declared = vec!["Treadmill".to_string(), "Barbell".to_string()];
        let equipment = resolve_equipment(&declared, &EnvironmentSetting::StandardFacility);
        assert!(equipment.contains("barbell"));
        assert_eq!(equipment.len(), 7);
    }

    #[test]
    fn test_custom_only_adds_bodyweight() {
        let declared = vec!["Dumbbell".to_string()];
        let equipment = resolve_equipment(&declared, &EnvironmentSetting::Custom);
        assert_eq!(equipment.iter().collect::<Vec<_>>(), vec!["bodyweight", "dumbbell"]);
    }

    #[test]
    fn test_canonical_item() {
        assert_eq!(canonical_item("Dumbbells"), "dumbbell");
        assert_eq!(canonical_item("DB"), "dumbbell");
        assert_eq!(canonical_item("Kettle Bells"), "kettlebell");
        assert_eq!(canonical_item("TRX Suspension"), "trx");
        assert_eq!(canonical_item("Stationary Bike"), "exercise-bike");
        assert_eq!(canonical_item("Rower"), "rowing-machine");
        assert_eq!(canonical_item("Elliptical Trainer"), "elliptical");
        assert_eq!(canonical_item("Body Weight"), "bodyweight");
        assert_eq!(canonical_item("Squat Rack"), "squat-rack");
    }

    #[test]
    fn test_plural_inventory_permits_singular_tags() {
        let declared = vec!["Dumbbells".to_string(), "Barbells".to_string()];
        let equipment = resolve_equipment(&declared, &EnvironmentSetting::Custom);
        assert!(equipment.contains("dumbbell"));
        assert!(equipment.permits(&record(&["Dumbbell"])));
        assert!(equipment.permits(&record(&["Barbell"])));
        assert!(!equipment.permits(&record(&["Kettlebell"])));
    }

    #[test]
    fn test_permits() {
        let equipment = resolve_equipment(
            &["Dumbbell".to_string(), "Bench".to_string()],
            &EnvironmentSetting::Custom,
        );
        assert!(equipment.permits(&record(&["Dumbbells"])));
        assert!(equipment.permits(&record(&["Barbell", "Flat Bench"])));
        assert!(equipment.permits(&record(&["Bodyweight"])));
        assert!(equipment.permits(&record(&[])));
        assert!(!equipment.permits(&record(&["Barbell"])));
        assert!(!equipment.permits(&record(&["Cable Machine"])));
    }
}
