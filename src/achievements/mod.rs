//! Achievement catalog and per-admiral unlock record

pub mod book;
pub mod catalog;

pub use book::{Achievement, AchievementBook};
pub use catalog::{
    get_achievement_definition, AchievementCategory, AchievementDefinition, ACADEMY_GRADUATE,
    ACHIEVEMENT_CATALOG,
};
