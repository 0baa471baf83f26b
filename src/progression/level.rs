//! Level thresholds

/// Experience required to reach each level (index = level)
pub const LEVEL_THRESHOLDS: [u64; 10] = [0, 100, 250, 500, 900, 1500, 2300, 3500, 5200, 8000];

/// Highest reachable level
pub const MAX_LEVEL: u32 = (LEVEL_THRESHOLDS.len() - 1) as u32;

/// Largest level whose threshold the experience has reached
pub fn level_for_experience(experience: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| experience >= threshold)
        .unwrap_or(0) as u32
}

/// Experience still needed for the next level, `None` at the top
pub fn experience_to_next_level(experience: u64) -> Option<u64> {
    let level = level_for_experience(experience);
    LEVEL_THRESHOLDS
        .get(level as usize + 1)
        .map(|next| next.saturating_sub(experience))
}

/// Fill of the level gauge, 0.0 to 100.0
pub fn progress_percent(experience: u64) -> f32 {
    let level = level_for_experience(experience) as usize;
    if level as u32 >= MAX_LEVEL {
        return 100.0;
    }
    let current = LEVEL_THRESHOLDS[level];
    let next = LEVEL_THRESHOLDS[level + 1];
    let gained = experience.saturating_sub(current) as f32;
    let span = (next - current) as f32;
    (gained / span * 100.0).clamp(0.0, 100.0)
}
