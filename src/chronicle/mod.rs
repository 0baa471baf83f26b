//! The progression engine
//!
//! `Chronicle` is the single in-memory holder of an admiral's progress. Every
//! mutation goes through one of its operations, which keep level and rank in
//! line with experience and only ever grow phases, achievements and the fleet.

pub mod engine;
pub mod sync;

pub use engine::{Chronicle, FirstContact, ACADEMY_BONUS_EXPERIENCE, STARTER_SHIP_NAME};
pub use sync::{HelmReport, ShipyardReport, MASTERY_PER_LEVEL};
