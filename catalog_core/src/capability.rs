//! Special-capability cross-search.
//!
//! Suspension trainers and kettlebells work across many body parts, and the
//! structured equipment tags in the catalog miss a lot of those exercises.
//! When the user has one of them, extra host categories are loaded and
//! sniffed by tag and by a short allow-list of exercise names.

use crate::equipment::{normalize_token, EffectiveEquipment};
use crate::{Category, ExerciseRecord};

/// Equipment capability that spans categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Suspension,
    Kettlebell,
}

/// Matching data for one capability
#[derive(Debug)]
pub struct CapabilitySpec {
    pub capability: Capability,
    /// Inventory items equal to one of these enable the capability
    pub inventory_exact: &'static [&'static str],
    /// Inventory items containing one of these enable the capability
    pub inventory_fragments: &'static [&'static str],
    /// Categories known to host cross-compatible exercises
    pub host_categories: &'static [Category],
    /// Normalized tag fragments that mark a compatible record
    pub tag_fragments: &'static [&'static str],
    /// Lowercase exercise names accepted without a tag
    pub name_allow_list: &'static [&'static str],
}

pub static SUSPENSION: CapabilitySpec = CapabilitySpec {
    capability: Capability::Suspension,
    inventory_exact: &["trx"],
    inventory_fragments: &["trx", "suspension"],
    host_categories: &[
        Category::UpperLegs,
        Category::UpperBack,
        Category::Core,
        Category::LowerBody,
    ],
    tag_fragments: &["trx", "suspension"],
    name_allow_list: &["pistol squat", "inverted row"],
};

pub static KETTLEBELL: CapabilitySpec = CapabilitySpec {
    capability: Capability::Kettlebell,
    inventory_exact: &["kb"],
    inventory_fragments: &["kettle"],
    host_categories: &[
        Category::UpperLegs,
        Category::Shoulders,
        Category::Core,
        Category::LowerBody,
    ],
    tag_fragments: &["kettlebell", "kettle-bell"],
    name_allow_list: &["kettlebell swing", "turkish get-up", "goblet squat"],
};

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Suspension, Capability::Kettlebell];

    pub fn spec(&self) -> &'static CapabilitySpec {
        match self {
            Capability::Suspension => &SUSPENSION,
            Capability::Kettlebell => &KETTLEBELL,
        }
    }

    /// Whether the inventory provides this capability
    pub fn detect(&self, equipment: &EffectiveEquipment) -> bool {
        let spec = self.spec();
        equipment.iter().any(|item| {
            spec.inventory_exact.iter().any(|exact| *exact == item)
                || spec.inventory_fragments.iter().any(|f| item.contains(f))
        })
    }

    /// Whether a record can be done with this capability
    pub fn sniff(&self, record: &ExerciseRecord) -> bool {
        let spec = self.spec();

        let tagged = record.equipment_tags.iter().any(|tag| {
            let tag = normalize_token(tag);
            spec.tag_fragments.iter().any(|f| tag.contains(f))
        });
        if tagged {
            return true;
        }

        let name = record.name.to_lowercase();
        spec.name_allow_list.iter().any(|known| name.contains(known))
    }

    /// Keep only the records this capability can use, in catalog order
    pub fn cross_filter(&self, records: Vec<ExerciseRecord>) -> Vec<ExerciseRecord> {
        let before = records.len();
        let kept: Vec<ExerciseRecord> = records
            .into_iter()
            .filter(|record| self.sniff(record))
            .collect();
        tracing::debug!(
            "{:?} cross-search kept {} of {} records",
            self,
            kept.len(),
            before
        );
        kept
    }
}

/// Record tags that name a special capability
///
/// Terse output still shows equipment for these records so consumers can
/// tell multi-equipment exercises apart.
pub fn has_special_tag(record: &ExerciseRecord) -> bool {
    record.equipment_tags.iter().any(|tag| {
        let tag = normalize_token(tag);
        Capability::ALL
            .iter()
            .any(|c| c.spec().tag_fragments.iter().any(|f| tag.contains(f)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::resolve_equipment;
    use crate::EnvironmentSetting;

    fn record(name: &str, tags: &[&str]) -> ExerciseRecord {
        ExerciseRecord {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            category: Category::UpperLegs,
            equipment_tags: tags.iter().map(|t| t.to_string()).collect(),
            environment: None,
            difficulty: Default::default(),
        }
    }

    fn equipment(items: &[&str]) -> EffectiveEquipment {
        let declared: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        resolve_equipment(&declared, &EnvironmentSetting::Custom)
    }

    #[test]
    fn test_detect_suspension() {
        assert!(Capability::Suspension.detect(&equipment(&["TRX"])));
        assert!(Capability::Suspension.detect(&equipment(&["Suspension Trainer"])));
        assert!(Capability::Suspension.detect(&equipment(&["trx straps"])));
        assert!(!Capability::Suspension.detect(&equipment(&["Dumbbell"])));
    }

    #[test]
    fn test_detect_kettlebell() {
        assert!(Capability::Kettlebell.detect(&equipment(&["Kettlebell"])));
        assert!(Capability::Kettlebell.detect(&equipment(&["kettle bell"])));
        assert!(Capability::Kettlebell.detect(&equipment(&["KB"])));
        assert!(!Capability::Kettlebell.detect(&equipment(&["kbar"])));
    }

    #[test]
    fn test_sniff_by_tag() {
        assert!(Capability::Suspension.sniff(&record("Hamstring Curl", &["TRX"])));
        assert!(Capability::Kettlebell.sniff(&record("Swing", &["Kettle Bell"])));
        assert!(!Capability::Kettlebell.sniff(&record("Lunge", &["Dumbbell"])));
    }

    #[test]
    fn test_sniff_by_name_allow_list() {
        assert!(Capability::Suspension.sniff(&record("Pistol Squat", &["Bodyweight"])));
        assert!(Capability::Suspension.sniff(&record("Inverted Row (Bar)", &["Barbell"])));
        assert!(!Capability::Suspension.sniff(&record("Back Squat", &["Barbell"])));
    }

    #[test]
    fn test_kettlebell_sniff_by_name_allow_list() {
        assert!(Capability::Kettlebell.sniff(&record("Turkish Get-Up", &["Bodyweight"])));
        assert!(Capability::Kettlebell.sniff(&record("Goblet Squat", &["Dumbbell"])));
        assert!(Capability::Kettlebell.sniff(&record("Kettlebell Swing", &[])));
        assert!(!Capability::Kettlebell.sniff(&record("Pistol Squat", &["Bodyweight"])));
    }

    #[test]
    fn test_detect_aliased_inventory() {
        assert!(Capability::Kettlebell.detect(&equipment(&["Kettlebells"])));
        assert!(Capability::Suspension.detect(&equipment(&["TRX Suspension"])));
    }

    #[test]
    fn test_cross_filter_keeps_order() {
        let records = vec![
            record("Pistol Squat", &[]),
            record("Leg Press", &["Machine"]),
            record("TRX Lunge", &["trx"]),
        ];
        let kept = Capability::Suspension.cross_filter(records);
        let names: Vec<_> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pistol Squat", "TRX Lunge"]);
    }

    #[test]
    fn test_has_special_tag() {
        assert!(has_special_tag(&record("A", &["Kettlebell"])));
        assert!(has_special_tag(&record("B", &["Suspension straps"])));
        assert!(!has_special_tag(&record("C", &["Dumbbell"])));
    }
}
