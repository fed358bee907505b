//! Catalog assembly pipeline.
//!
//! For one profile:
//! - Resolve effective equipment and plan the categories to load
//! - Load base, cardio and capability record sets (in parallel by default)
//! - Narrow each set: equipment feasibility, cardio filter, capability sniffing
//! - Exclude, deduplicate and group into a `CatalogDocument`

use crate::assembly::{assemble, RecordSets};
use crate::capability::Capability;
use crate::cardio::CardioFilter;
use crate::catalog::{CatalogLoader, LoadRequest};
use crate::config::EngineConfig;
use crate::document::CatalogDocument;
use crate::eligibility::is_interval_eligible;
use crate::equipment::{resolve_equipment, EffectiveEquipment};
use crate::planner::{plan_load, LoadPlan};
use crate::profile::Profile;
use crate::{Category, EnvironmentSetting, Error, ExerciseRecord, Result};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Record set a loader call feeds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Base,
    Cardio,
    Capability(Capability),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Base => f.write_str("base"),
            Source::Cardio => f.write_str("cardio"),
            Source::Capability(Capability::Suspension) => f.write_str("suspension"),
            Source::Capability(Capability::Kettlebell) => f.write_str("kettlebell"),
        }
    }
}

/// Assemble the exercise catalog for a profile
///
/// Fails with `CatalogUnavailable` if any loader call fails; no partial
/// document is produced.
pub fn assemble_catalog<L>(
    loader: &L,
    profile: &Profile,
    config: &EngineConfig,
) -> Result<CatalogDocument>
where
    L: CatalogLoader + ?Sized,
{
    let equipment = resolve_equipment(&profile.declared_equipment, &profile.environment);
    let plan = plan_load(profile.modality, &profile.target_categories);
    let capabilities: Vec<Capability> = Capability::ALL
        .into_iter()
        .filter(|capability| capability.detect(&equipment))
        .collect();

    tracing::info!(
        "Assembling catalog: {} categories, cardio: {}, capabilities: {:?}, locale: {}",
        plan.categories_to_load.len(),
        plan.needs_cardio,
        capabilities,
        profile.locale
    );

    let requests = build_requests(profile, &plan, &equipment, &capabilities);
    let loaded = run_loads(loader, &requests, config.concurrent_loads)?;

    let intervals_allowed = is_interval_eligible(&profile.history, &profile.age);
    let cardio_filter = CardioFilter {
        cardio_type: profile.cardio_type,
        environment_preference: profile.cardio_environment,
        equipment: &equipment,
        environment: &profile.environment,
        intervals_allowed,
        gate_equipment: config.gate_cardio_equipment,
    };

    let mut sets = RecordSets::default();
    for (source, records) in loaded {
        match source {
            Source::Base => sets.base = feasible(records, &equipment, &profile.environment),
            Source::Cardio => {
                let records = records
                    .into_iter()
                    .filter(|record| record.category == Category::Cardio)
                    .collect();
                sets.cardio = cardio_filter.apply(records);
            }
            Source::Capability(capability) => {
                let records = capability.cross_filter(records);
                match capability {
                    Capability::Suspension => sets.suspension = records,
                    Capability::Kettlebell => sets.kettlebell = records,
                }
            }
        }
    }

    let document = assemble(sets, &plan, &profile.excluded_ids);
    tracing::info!(
        "Assembled {} exercises in {} categories",
        document.total_count,
        document.groups.len()
    );
    Ok(document)
}

/// Loader calls for one request, in merge order
fn build_requests(
    profile: &Profile,
    plan: &LoadPlan,
    equipment: &EffectiveEquipment,
    capabilities: &[Capability],
) -> Vec<(Source, LoadRequest)> {
    let mut requests = Vec::new();

    if !plan.categories_to_load.is_empty() {
        let equipment_hint =
            (profile.environment == EnvironmentSetting::Custom).then(|| equipment.clone());
        requests.push((
            Source::Base,
            LoadRequest {
                categories: plan.categories_to_load.clone(),
                locale: profile.locale,
                equipment_hint,
            },
        ));
    }

    if plan.needs_cardio {
        requests.push((
            Source::Cardio,
            LoadRequest {
                categories: vec![Category::Cardio],
                locale: profile.locale,
                equipment_hint: None,
            },
        ));
    }

    for capability in capabilities {
        requests.push((
            Source::Capability(*capability),
            LoadRequest {
                categories: capability.spec().host_categories.to_vec(),
                locale: profile.locale,
                equipment_hint: None,
            },
        ));
    }

    requests
}

/// Run every loader call, joining all of them before reporting a failure
fn run_loads<L>(
    loader: &L,
    requests: &[(Source, LoadRequest)],
    concurrent: bool,
) -> Result<Vec<(Source, Vec<ExerciseRecord>)>>
where
    L: CatalogLoader + ?Sized,
{
    let results: Vec<Result<Vec<ExerciseRecord>>> = if concurrent && requests.len() > 1 {
        std::thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .map(|(_, request)| scope.spawn(move || loader.load(request)))
                .collect();

            handles
                .into_iter()
                .zip(requests)
                .map(|(handle, (source, _))| {
                    handle.join().unwrap_or_else(|_| Err(panicked(source)))
                })
                .collect()
        })
    } else {
        requests
            .iter()
            .map(|(source, request)| {
                panic::catch_unwind(AssertUnwindSafe(|| loader.load(request)))
                    .unwrap_or_else(|_| Err(panicked(source)))
            })
            .collect()
    };

    let mut loaded = Vec::with_capacity(requests.len());
    for ((source, _), result) in requests.iter().zip(results) {
        let records = result.map_err(|e| match e {
            Error::CatalogUnavailable(_) => e,
            other => Error::CatalogUnavailable(format!("{} load failed: {}", source, other)),
        })?;
        tracing::debug!("{} load returned {} records", source, records.len());
        loaded.push((*source, records));
    }
    Ok(loaded)
}

fn panicked(source: &Source) -> Error {
    Error::CatalogUnavailable(format!("{} load panicked", source))
}

/// Equipment feasibility; only custom environments restrict records
fn feasible(
    records: Vec<ExerciseRecord>,
    equipment: &EffectiveEquipment,
    environment: &EnvironmentSetting,
) -> Vec<ExerciseRecord> {
    if *environment != EnvironmentSetting::Custom {
        return records;
    }
    let before = records.len();
    let kept: Vec<ExerciseRecord> = records
        .into_iter()
        .filter(|record| equipment.permits(record))
        .collect();
    tracing::debug!("Equipment filter kept {} of {} records", kept.len(), before);
    kept
}
