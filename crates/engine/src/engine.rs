use log::info;

use crate::allocator::{allocate, assign_starved};
use crate::candidates::{CandidateTable, DemandUniverse};
use crate::config::AssignConfig;
use crate::error::AssignError;
use crate::ledger::AssignmentLedger;
use crate::model::{AssignInput, AssignmentRun, RunMeta};
use crate::reconcile::reconcile;
use crate::resolver::resolve_unique;
use crate::summary::compute_summary;

/// Run the assignment pipeline: unique resolution, score allocation,
/// starvation fallback, reconciliation. Returns one row per distinct demand
/// plus a summary.
pub fn assign(input: &AssignInput, config: &AssignConfig) -> Result<AssignmentRun, AssignError> {
    config.validate()?;

    let universe = DemandUniverse::from_demands(&input.demands);
    let mut table = CandidateTable::build(&universe, &input.candidates)?;
    let mut ledger = AssignmentLedger::new(universe.len());

    let resolved = resolve_unique(&universe, &mut table, &mut ledger);
    let allocated = allocate(&universe, &table, &mut ledger, &config.weights);

    let fallbacks = if config.starvation_fallback {
        assign_starved(&universe, &table, &mut ledger, &config.weights, &resolved.starved)
    } else {
        0
    };

    let rows = reconcile(&universe, ledger);
    let summary = compute_summary(&rows);

    info!(
        "{} demand(s): {} unique fix, {} score unique, {} score reuse ({} fallback), {} unassigned",
        summary.total_demands,
        resolved.fixed,
        allocated.score_unique,
        allocated.score_reuse + fallbacks,
        fallbacks,
        summary.unassigned,
    );

    Ok(AssignmentRun {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            candidate_records: input.candidates.len(),
            resolver_passes: resolved.passes,
            unique_collisions: resolved.collisions,
        },
        summary,
        rows,
    })
}
