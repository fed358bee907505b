#![forbid(unsafe_code)]

//! Core domain model and selection logic for exsel.
//!
//! This crate provides:
//! - Domain types (categories, exercise records, profiles)
//! - Catalog access (loader trait, built-in catalog, JSON directory loader)
//! - Equipment resolution, load planning and cardio filtering
//! - Capability cross-search and document assembly

pub mod types;
pub mod error;
pub mod lexicon;
pub mod profile;
pub mod equipment;
pub mod planner;
pub mod eligibility;
pub mod cardio;
pub mod capability;
pub mod catalog;
pub mod loader;
pub mod document;
pub mod assembly;
pub mod config;
pub mod logging;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use profile::{
    AgeBracket, CardioEnvironment, CardioType, EnvironmentSetting, HistoryBracket, Profile,
    ProfileAnswers, TrainingModality,
};
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, CatalogLoader, LoadRequest};
pub use loader::JsonCatalogLoader;
pub use config::{Config, EngineConfig};
pub use document::{CatalogDocument, CategoryGroup};
pub use equipment::{resolve_equipment, EffectiveEquipment};
pub use planner::{plan_load, LoadPlan};
pub use eligibility::is_interval_eligible;
pub use engine::assemble_catalog;
