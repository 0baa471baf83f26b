//! Admiral's Chronicle - Progression engine for a gamified OS curriculum

pub mod achievements;
pub mod admiral;
pub mod chronicle;
pub mod command;
pub mod core;
pub mod events;
pub mod fleet;
pub mod onboarding;
pub mod persistence;
pub mod progression;
pub mod waitlist;
