//! Cardio record filtering.
//!
//! A cardio record survives when all four checks pass: interval gate, cardio
//! type, cardio environment and machine availability. The checks are a pure
//! AND, so their order only affects how early a record is rejected.

use crate::equipment::{normalize_token, EffectiveEquipment};
use crate::lexicon::{self, Lexicon};
use crate::{CardioEnvironment, CardioType, EnvironmentSetting, ExerciseRecord};

/// Inputs of the cardio filter that stay fixed for one request
#[derive(Clone, Debug)]
pub struct CardioFilter<'a> {
    pub cardio_type: Option<CardioType>,
    pub environment_preference: CardioEnvironment,
    pub equipment: &'a EffectiveEquipment,
    pub environment: &'a EnvironmentSetting,
    pub intervals_allowed: bool,
    /// Require the machine behind an indoor cardio record in Custom
    /// environments. Off by default: cardio is offered regardless of
    /// declared equipment.
    pub gate_equipment: bool,
}

/// Machine requirement implied by a cardio record's tags
struct MachineRule {
    tag_fragments: &'static [&'static str],
    inventory_fragments: &'static [&'static str],
}

static MACHINE_RULES: [MachineRule; 5] = [
    MachineRule {
        tag_fragments: &["treadmill"],
        inventory_fragments: &["treadmill"],
    },
    MachineRule {
        tag_fragments: &["bike", "cycling"],
        inventory_fragments: &["exercise-bike", "stationary-bike"],
    },
    MachineRule {
        tag_fragments: &["rowing", "rower"],
        inventory_fragments: &["rowing-machine"],
    },
    MachineRule {
        tag_fragments: &["elliptical"],
        inventory_fragments: &["elliptical"],
    },
    MachineRule {
        tag_fragments: &["jump-rope"],
        inventory_fragments: &["jump-rope"],
    },
];

impl CardioFilter<'_> {
    /// Filter a cardio record set, keeping catalog order
    pub fn apply(&self, records: Vec<ExerciseRecord>) -> Vec<ExerciseRecord> {
        let before = records.len();
        let kept: Vec<ExerciseRecord> = records
            .into_iter()
            .filter(|record| self.accepts(record))
            .collect();

        tracing::debug!(
            "Cardio filter kept {} of {} records (type: {:?}, environment: {:?}, intervals: {})",
            kept.len(),
            before,
            self.cardio_type,
            self.environment_preference,
            self.intervals_allowed
        );
        kept
    }

    pub fn accepts(&self, record: &ExerciseRecord) -> bool {
        self.passes_interval_gate(record)
            && self.matches_type(record)
            && self.matches_environment(record)
            && self.has_required_machine(record)
    }

    fn passes_interval_gate(&self, record: &ExerciseRecord) -> bool {
        self.intervals_allowed || !is_interval(record)
    }

    fn matches_type(&self, record: &ExerciseRecord) -> bool {
        match self.cardio_type {
            None => true,
            Some(cardio_type) => classify_name(&record.name) == Some(cardio_type),
        }
    }

    fn matches_environment(&self, record: &ExerciseRecord) -> bool {
        let tag = record.environment.as_deref().unwrap_or_default();
        match self.environment_preference {
            CardioEnvironment::Both | CardioEnvironment::Unset => true,
            CardioEnvironment::Inside => lexicon::matches_any(tag, lexicon::indoor),
            CardioEnvironment::Outside => lexicon::matches_any(tag, lexicon::outdoor),
        }
    }

    fn has_required_machine(&self, record: &ExerciseRecord) -> bool {
        if !self.gate_equipment || *self.environment != EnvironmentSetting::Custom {
            return true;
        }

        let indoor = record
            .environment
            .as_deref()
            .is_some_and(|tag| lexicon::matches_any(tag, lexicon::indoor));
        if !indoor {
            return true;
        }

        let tags: Vec<String> = record
            .equipment_tags
            .iter()
            .map(|tag| normalize_token(tag))
            .collect();

        MACHINE_RULES
            .iter()
            .filter(|rule| {
                tags.iter()
                    .any(|tag| rule.tag_fragments.iter().any(|f| tag.contains(f)))
            })
            .all(|rule| {
                rule.inventory_fragments
                    .iter()
                    .any(|f| self.equipment.any_contains(f))
            })
    }
}

/// True if the record name marks an interval session in any locale
pub fn is_interval(record: &ExerciseRecord) -> bool {
    lexicon::matches_any(&record.name, lexicon::interval)
}

/// Cardio type named by an exercise, if exactly one type is named
///
/// Names mentioning two disciplines ("Run + Row") are ambiguous and do not
/// count as either.
pub fn classify_name(name: &str) -> Option<CardioType> {
    let mut named = CardioType::ALL
        .into_iter()
        .filter(|cardio_type| lexicon::matches_any(name, synonyms(*cardio_type)));

    match (named.next(), named.next()) {
        (Some(cardio_type), None) => Some(cardio_type),
        _ => None,
    }
}

fn synonyms(cardio_type: CardioType) -> fn(&Lexicon) -> &'static [&'static str] {
    match cardio_type {
        CardioType::Running => lexicon::running,
        CardioType::Cycling => lexicon::cycling,
        CardioType::Rowing => lexicon::rowing,
    }
}
