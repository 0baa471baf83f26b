//! Per-admiral achievement state

use crate::achievements::catalog::{AchievementCategory, ACHIEVEMENT_CATALOG};
use crate::core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One achievement as the admiral sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AchievementCategory,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<Timestamp>,
}

/// The catalog with unlock state attached
///
/// Entries only move from locked to unlocked, and the unlock time is written
/// once at that transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementBook {
    entries: Vec<Achievement>,
}

impl AchievementBook {
    /// Every catalog entry, all locked
    pub fn new() -> Self {
        let entries = ACHIEVEMENT_CATALOG
            .iter()
            .map(|def| Achievement {
                id: def.id.to_string(),
                title: def.title.to_string(),
                description: def.description.to_string(),
                category: def.category,
                unlocked: false,
                unlocked_at: None,
            })
            .collect();
        Self { entries }
    }

    /// Apply stored unlock state onto a fresh catalog
    ///
    /// Stored entries whose id is not in the catalog are ignored, so the
    /// book always lists exactly the catalog.
    pub fn from_stored(stored: &[Achievement]) -> Self {
        let mut book = Self::new();
        for saved in stored.iter().filter(|a| a.unlocked) {
            if let Some(entry) = book.entries.iter_mut().find(|e| e.id == saved.id) {
                entry.unlocked = true;
                entry.unlocked_at = saved.unlocked_at;
            }
        }
        book
    }

    /// Unlock by id; returns true only on the locked-to-unlocked transition
    pub fn unlock(&mut self, id: &str, now: Timestamp) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if !entry.unlocked => {
                entry.unlocked = true;
                entry.unlocked_at = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.unlocked).count()
    }
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::catalog::ACADEMY_GRADUATE;
    use chrono::{Duration, Utc};

    #[test]
    fn test_new_book_is_all_locked() {
        let book = AchievementBook::new();
        assert_eq!(book.entries().len(), ACHIEVEMENT_CATALOG.len());
        assert_eq!(book.unlocked_count(), 0);
    }

    #[test]
    fn test_unlock_is_one_way_and_timestamped_once() {
        let mut book = AchievementBook::new();
        let first = Utc::now();
        let later = first + Duration::seconds(30);

        assert!(book.unlock(ACADEMY_GRADUATE, first));
        assert!(!book.unlock(ACADEMY_GRADUATE, later));

        let entry = book.get(ACADEMY_GRADUATE).unwrap();
        assert!(entry.unlocked);
        assert_eq!(entry.unlocked_at, Some(first));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut book = AchievementBook::new();
        assert!(!book.unlock("no-such-badge", Utc::now()));
        assert_eq!(book.unlocked_count(), 0);
    }

    #[test]
    fn test_from_stored_ignores_unknown_and_keeps_time() {
        let when = Utc::now();
        let stored = vec![
            Achievement {
                id: "first-steps".into(),
                title: "renamed".into(),
                description: String::new(),
                category: AchievementCategory::Academy,
                unlocked: true,
                unlocked_at: Some(when),
            },
            Achievement {
                id: "retired-badge".into(),
                title: "Retired".into(),
                description: String::new(),
                category: AchievementCategory::Coding,
                unlocked: true,
                unlocked_at: None,
            },
        ];

        let book = AchievementBook::from_stored(&stored);
        assert_eq!(book.entries().len(), ACHIEVEMENT_CATALOG.len());
        let entry = book.get("first-steps").unwrap();
        assert_eq!(entry.title, "First Steps");
        assert_eq!(entry.unlocked_at, Some(when));
        assert!(book.get("retired-badge").is_none());
    }
}
