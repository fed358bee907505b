//! User profile for a catalog request.
//!
//! Questionnaire answers arrive as loosely typed strings. They are parsed
//! once here into a strict `Profile`; the rest of the pipeline never looks at
//! raw strings again. Unknown or contradictory values are normalized with a
//! warning rather than rejected. Only input that cannot be read at all is an
//! error.

use crate::{Category, Error, Locale, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

// ============================================================================
// Profile Enums
// ============================================================================

/// Which kind of training the plan is for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainingModality {
    #[default]
    Strength,
    Cardio,
    Both,
}

impl TrainingModality {
    pub fn includes_cardio(&self) -> bool {
        matches!(self, TrainingModality::Cardio | TrainingModality::Both)
    }

    pub fn includes_strength(&self) -> bool {
        matches!(self, TrainingModality::Strength | TrainingModality::Both)
    }
}

/// Preferred cardio discipline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardioType {
    Running,
    Cycling,
    Rowing,
}

impl CardioType {
    pub const ALL: [CardioType; 3] = [CardioType::Running, CardioType::Cycling, CardioType::Rowing];
}

/// Where the user wants to do cardio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardioEnvironment {
    Inside,
    Outside,
    Both,
    #[default]
    Unset,
}

/// Named training environment preset
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvironmentSetting {
    /// User picked their own equipment; base exercises are equipment-gated
    Custom,
    /// Full gym; standard cardio machines are assumed available
    StandardFacility,
    Named(String),
}

impl Default for EnvironmentSetting {
    fn default() -> Self {
        EnvironmentSetting::Named("gym".into())
    }
}

/// How often the user exercised over the past year
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryBracket {
    NoneInPastYear,
    LessThanMonthly,
    OneToTwoPerMonth,
    OneToTwoPerWeek,
    TwoToThreePerWeek,
    ThreeToFourPerWeek,
    FourOrMorePerWeek,
    #[default]
    Unspecified,
    Other(String),
}

/// Age range as answered in the questionnaire ("60-70", "70 or above")
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgeBracket {
    pub label: String,
    pub lower_bound: Option<u8>,
}

impl AgeBracket {
    /// Start of the older cohort (60s and 70s+)
    pub const OLDER_COHORT_START: u8 = 60;

    pub fn from_label(label: &str) -> Self {
        let digits: String = label
            .trim()
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();

        Self {
            label: label.trim().to_string(),
            lower_bound: digits.parse().ok(),
        }
    }

    pub fn is_older_cohort(&self) -> bool {
        self.lower_bound
            .is_some_and(|lower| lower >= Self::OLDER_COHORT_START)
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Validated request profile
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    /// Ordered, no duplicates; empty means "all categories"
    pub target_categories: Vec<Category>,
    pub declared_equipment: Vec<String>,
    pub environment: EnvironmentSetting,
    pub modality: TrainingModality,
    pub cardio_type: Option<CardioType>,
    pub cardio_environment: CardioEnvironment,
    pub history: HistoryBracket,
    pub age: AgeBracket,
    pub excluded_ids: BTreeSet<String>,
    pub locale: Locale,
}

/// Questionnaire answers as submitted by the client
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnswers {
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub last_years_exercise_frequency: Option<String>,
    #[serde(default)]
    pub exercise_modalities: Option<String>,
    #[serde(default)]
    pub exercise_environments: Option<String>,
    #[serde(default)]
    pub target_areas: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub cardio_type: Option<String>,
    #[serde(default)]
    pub cardio_environment: Option<String>,
    #[serde(default, alias = "removedExerciseIds")]
    pub excluded_exercise_ids: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl ProfileAnswers {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidProfile(format!("Failed to parse profile: {}", e)))
    }

    /// Read questionnaire answers from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let answers = Self::from_json(&contents)?;
        tracing::info!("Loaded profile answers from {:?}", path);
        Ok(answers)
    }
}

impl Profile {
    /// Parse questionnaire answers from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_answers(ProfileAnswers::from_json(json)?))
    }

    /// Load questionnaire answers from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_answers(ProfileAnswers::load(path)?))
    }

    /// Normalize questionnaire answers into a strict profile
    pub fn from_answers(answers: ProfileAnswers) -> Self {
        let modality = answers
            .exercise_modalities
            .as_deref()
            .map(parse_modality)
            .unwrap_or_default();

        let mut cardio_type = answers.cardio_type.as_deref().and_then(parse_cardio_type);
        let mut cardio_environment = answers
            .cardio_environment
            .as_deref()
            .map(parse_cardio_environment)
            .unwrap_or_default();

        if !modality.includes_cardio()
            && (cardio_type.is_some() || cardio_environment != CardioEnvironment::Unset)
        {
            tracing::warn!(
                "Cardio preferences given for {:?} modality, ignoring them",
                modality
            );
            cardio_type = None;
            cardio_environment = CardioEnvironment::Unset;
        }

        let mut target_categories: Vec<Category> = Vec::new();
        for area in &answers.target_areas {
            let category = Category::from_label(area);
            if category.is_synthetic() || matches!(category, Category::Other(_)) {
                tracing::warn!("Target area {:?} is not a known body part, ignoring it", area);
                continue;
            }
            if !target_categories.contains(&category) {
                target_categories.push(category);
            }
        }

        let locale = match answers.language.as_deref() {
            None => Locale::default(),
            Some(code) => Locale::from_code(code).unwrap_or_else(|| {
                tracing::warn!("Unsupported language {:?}, falling back to en", code);
                Locale::En
            }),
        };

        Profile {
            target_categories,
            declared_equipment: answers
                .equipment
                .into_iter()
                .filter(|item| !item.trim().is_empty())
                .collect(),
            environment: answers
                .exercise_environments
                .as_deref()
                .map(parse_environment)
                .unwrap_or_default(),
            modality,
            cardio_type,
            cardio_environment,
            history: answers
                .last_years_exercise_frequency
                .as_deref()
                .map(parse_history)
                .unwrap_or_default(),
            age: answers
                .age
                .as_deref()
                .map(AgeBracket::from_label)
                .unwrap_or_default(),
            excluded_ids: answers.excluded_exercise_ids.into_iter().collect(),
            locale,
        }
    }
}

// ============================================================================
// Field Parsers
// ============================================================================

/// Parse training modality; unknown values fall back to Strength
pub fn parse_modality(s: &str) -> TrainingModality {
    let s = s.trim().to_lowercase();
    if s.contains("both") || (s.contains("cardio") && s.contains("strength")) {
        TrainingModality::Both
    } else if s.contains("cardio") {
        TrainingModality::Cardio
    } else {
        if !s.is_empty() && !s.contains("strength") {
            tracing::warn!("Unknown training modality {:?}, assuming strength", s);
        }
        TrainingModality::Strength
    }
}

/// Parse cardio discipline; unknown values mean no preference
pub fn parse_cardio_type(s: &str) -> Option<CardioType> {
    match s.trim().to_lowercase().as_str() {
        "" => None,
        "running" | "run" => Some(CardioType::Running),
        "cycling" | "bike" => Some(CardioType::Cycling),
        "rowing" | "row" => Some(CardioType::Rowing),
        other => {
            tracing::warn!("Unknown cardio type {:?}, not filtering by type", other);
            None
        }
    }
}

/// Parse cardio environment preference
pub fn parse_cardio_environment(s: &str) -> CardioEnvironment {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        CardioEnvironment::Unset
    } else if s == "both" || s.contains("inside and outside") {
        CardioEnvironment::Both
    } else if s.contains("inside") {
        CardioEnvironment::Inside
    } else if s.contains("outside") {
        CardioEnvironment::Outside
    } else {
        tracing::warn!("Unknown cardio environment {:?}, not filtering by it", s);
        CardioEnvironment::Unset
    }
}

/// Parse environment preset name
pub fn parse_environment(s: &str) -> EnvironmentSetting {
    match s.trim().to_lowercase().as_str() {
        "custom" => EnvironmentSetting::Custom,
        "large gym" | "standard facility" | "standard_facility" | "standardfacility" => {
            EnvironmentSetting::StandardFacility
        }
        _ => EnvironmentSetting::Named(s.trim().to_string()),
    }
}

/// Parse past-year exercise frequency
pub fn parse_history(s: &str) -> HistoryBracket {
    let s = s.trim().to_lowercase();
    let monthly = s.contains("month") || s.contains("måned");
    let weekly = s.contains("week") || s.contains("uke");

    if s.is_empty() {
        HistoryBracket::Unspecified
    } else if s.contains("no exercise") {
        HistoryBracket::NoneInPastYear
    } else if s.contains("less than once") {
        HistoryBracket::LessThanMonthly
    } else if s.contains("1-2") && monthly {
        HistoryBracket::OneToTwoPerMonth
    } else if s.contains("1-2") && weekly {
        HistoryBracket::OneToTwoPerWeek
    } else if s.contains("2-3") && weekly {
        HistoryBracket::TwoToThreePerWeek
    } else if s.contains("3-4") && weekly {
        HistoryBracket::ThreeToFourPerWeek
    } else if (s.contains("4-5") || s.contains("5+") || s.contains("5 or more")) && weekly {
        HistoryBracket::FourOrMorePerWeek
    } else {
        HistoryBracket::Other(s)
    }
}
