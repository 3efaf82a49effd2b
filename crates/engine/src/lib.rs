//! `staffmatch-engine`: starvation-safe demand to employee assignment.
//!
//! Pure engine crate: receives pre-built candidate records, returns one
//! assignment row per demand. No CLI or IO dependencies.

pub mod allocator;
pub mod candidates;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod reconcile;
pub mod resolver;
pub mod scoring;
pub mod summary;

pub use config::AssignConfig;
pub use engine::assign;
pub use error::AssignError;
pub use model::{
    AssignInput, AssignedEmployee, AssignmentResult, AssignmentRun, CandidateRecord, DemandId,
    EmployeeId, Method,
};
