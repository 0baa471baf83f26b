//! Experience, level, rank and phase gating
//!
//! Experience is the only stored quantity. Level comes from fixed ascending
//! thresholds, rank from level, and phase auto-unlocks from level.

pub mod level;
pub mod phase;
pub mod rank;

pub use level::{
    experience_to_next_level, level_for_experience, progress_percent, LEVEL_THRESHOLDS, MAX_LEVEL,
};
pub use phase::{ModulePhase, PhaseUnlockSet};
pub use rank::AdmiralRank;
