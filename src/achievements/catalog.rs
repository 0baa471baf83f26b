//! Static achievement definitions known at build time

use serde::{Deserialize, Serialize};

/// Achievement grouping, matching the curriculum phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Academy,
    Coding,
    Command,
    Transcendence,
}

/// Definition of an achievement
#[derive(Debug, Clone)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
}

/// Granted on academy completion
pub const ACADEMY_GRADUATE: &str = "academy-graduate";

/// Every achievement an admiral can earn
pub static ACHIEVEMENT_CATALOG: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "first-steps",
        title: "First Steps",
        description: "Complete your first lesson in the OS1000 Academy",
        category: AchievementCategory::Academy,
    },
    AchievementDefinition {
        id: ACADEMY_GRADUATE,
        title: "Academy Graduate",
        description: "Complete the OS1000 Academy and receive your first ship",
        category: AchievementCategory::Academy,
    },
    AchievementDefinition {
        id: "syntax-sailor",
        title: "Syntax Sailor",
        description: "Reach Level 1 and master basic programming concepts",
        category: AchievementCategory::Coding,
    },
    AchievementDefinition {
        id: "fleet-commander",
        title: "Fleet Commander",
        description: "Access the Shipyard and begin fleet operations",
        category: AchievementCategory::Command,
    },
    AchievementDefinition {
        id: "consciousness-weaver",
        title: "Consciousness Weaver",
        description: "Unlock the Loom and begin consciousness embroidery",
        category: AchievementCategory::Transcendence,
    },
];

/// Look up an achievement definition by id
pub fn get_achievement_definition(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENT_CATALOG.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let ids: HashSet<_> = ACHIEVEMENT_CATALOG.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENT_CATALOG.len());
    }

    #[test]
    fn test_lookup() {
        let def = get_achievement_definition(ACADEMY_GRADUATE).unwrap();
        assert_eq!(def.title, "Academy Graduate");
        assert_eq!(def.category, AchievementCategory::Academy);
        assert!(get_achievement_definition("speedrunner").is_none());
    }
}
