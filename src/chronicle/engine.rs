//! Chronicle state and its operations

use crate::achievements::{Achievement, AchievementBook, ACADEMY_GRADUATE};
use crate::admiral::{generate_call_sign, AdmiralProfile, COMMISSIONED_NAME};
use crate::core::types::{ShipId, Timestamp};
use crate::events::{ChronicleEvent, EventLog};
use crate::fleet::{Fleet, Ship, ShipClass, ShipTemplate};
use crate::onboarding::{Milestone, OnboardingStage, OnboardingState};
use crate::progression::{
    experience_to_next_level, level_for_experience, progress_percent, AdmiralRank, ModulePhase,
    PhaseUnlockSet,
};
use chrono::Utc;
use rand::Rng;

/// Experience granted once for finishing the academy
pub const ACADEMY_BONUS_EXPERIENCE: u64 = 200;

/// Name of the dinghy handed out at academy graduation
pub const STARTER_SHIP_NAME: &str = "Academy Graduate";

/// Outcome of the first-contact check run when the app opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstContact {
    /// Fresh profile: identity assigned and onboarding started
    NewCadet { call_sign: String },
    /// Named profile that already finished onboarding
    ReturningAdmiral,
    /// Anything in between; left untouched
    InProgress,
}

/// Progression state for one admiral
#[derive(Debug, Clone)]
pub struct Chronicle {
    pub(crate) admiral: AdmiralProfile,
    pub(crate) experience: u64,
    pub(crate) current_phase: ModulePhase,
    pub(crate) fleet: Fleet,
    pub(crate) academy_completed: bool,
    /// 0-100
    pub(crate) helm_mastery: u8,
    pub(crate) achievements: AchievementBook,
    pub(crate) phases: PhaseUnlockSet,
    pub(crate) onboarding: OnboardingState,
    pub(crate) events: EventLog,
    pub(crate) clock: fn() -> Timestamp,
}

impl Default for Chronicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Chronicle {
    pub fn new() -> Self {
        Self {
            admiral: AdmiralProfile::default(),
            experience: 0,
            current_phase: ModulePhase::Academy,
            fleet: Fleet::new(),
            academy_completed: false,
            helm_mastery: 0,
            achievements: AchievementBook::new(),
            phases: PhaseUnlockSet::new(),
            onboarding: OnboardingState::new(),
            events: EventLog::new(),
            clock: Utc::now,
        }
    }

    /// Use a different time source for acquisitions and unlocks
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    // === READ ACCESS ===

    pub fn admiral(&self) -> &AdmiralProfile {
        &self.admiral
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn level(&self) -> u32 {
        level_for_experience(self.experience)
    }

    pub fn rank(&self) -> AdmiralRank {
        AdmiralRank::for_level(self.level())
    }

    /// Fill of the level gauge, 0.0 to 100.0
    pub fn level_progress_percent(&self) -> f32 {
        progress_percent(self.experience)
    }

    pub fn experience_to_next_level(&self) -> Option<u64> {
        experience_to_next_level(self.experience)
    }

    pub fn current_phase(&self) -> ModulePhase {
        self.current_phase
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn ships(&self) -> &[Ship] {
        self.fleet.ships()
    }

    pub fn active_ship(&self) -> Option<&Ship> {
        self.fleet.active_ship()
    }

    /// Number of ships actually in the fleet
    pub fn fleet_size(&self) -> usize {
        self.fleet.len()
    }

    /// Display counter, possibly overwritten by a shipyard report
    pub fn reported_fleet_size(&self) -> usize {
        self.fleet.reported_size()
    }

    pub fn academy_completed(&self) -> bool {
        self.academy_completed
    }

    pub fn helm_mastery(&self) -> u8 {
        self.helm_mastery
    }

    pub fn achievements(&self) -> &[Achievement] {
        self.achievements.entries()
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.get(id)
    }

    pub fn unlocked_phases(&self) -> &PhaseUnlockSet {
        &self.phases
    }

    pub fn is_phase_unlocked(&self, phase: ModulePhase) -> bool {
        self.phases.contains(phase)
    }

    pub fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    /// Events recorded since the last drain
    pub fn pending_events(&self) -> &[ChronicleEvent] {
        self.events.pending()
    }

    pub fn drain_events(&mut self) -> Vec<ChronicleEvent> {
        self.events.drain()
    }

    // === PROGRESSION ===

    /// Add experience and re-derive level, rank and phase unlocks
    ///
    /// An amount of zero only recomputes.
    pub fn gain_experience(&mut self, amount: u64) {
        let total = self.experience.saturating_add(amount);
        if amount > 0 {
            self.events
                .record(ChronicleEvent::ExperienceGained { amount, total });
        }
        self.set_experience(total);
    }

    /// Re-derive rank and phase unlocks from the current experience
    pub fn update_rank(&mut self) {
        self.set_experience(self.experience);
    }

    /// Single write path for experience; emits level and rank changes
    fn set_experience(&mut self, total: u64) {
        let previous_level = self.level();
        let previous_rank = self.rank();
        self.experience = total;

        let level = self.level();
        if level != previous_level {
            tracing::info!(from = previous_level, to = level, experience = total, "level changed");
            self.events.record(ChronicleEvent::LevelChanged {
                from: previous_level,
                to: level,
            });
        }
        let rank = self.rank();
        if rank != previous_rank {
            tracing::info!(%rank, "rank changed");
            self.events.record(ChronicleEvent::RankChanged {
                from: previous_rank,
                to: rank,
            });
        }

        for phase in self.phases.unlock_for_level(level) {
            tracing::info!(%phase, level, "phase unlocked by level");
            self.events.record(ChronicleEvent::PhaseUnlocked { phase });
        }
    }

    /// Set the helm mastery gauge, clamped to 0-100
    pub fn update_helm_mastery(&mut self, percent: u32) {
        self.helm_mastery = percent.min(100) as u8;
    }

    /// Unlock a phase regardless of level
    pub fn unlock_phase(&mut self, phase: ModulePhase) -> bool {
        let added = self.phases.insert(phase);
        if added {
            tracing::info!(%phase, "phase unlocked");
            self.events.record(ChronicleEvent::PhaseUnlocked { phase });
        }
        added
    }

    /// Switch the viewed phase; refused while the phase is locked
    pub fn select_phase(&mut self, phase: ModulePhase) -> bool {
        if !self.phases.contains(phase) {
            tracing::debug!(%phase, "phase is locked");
            return false;
        }
        self.current_phase = phase;
        true
    }

    /// Unlock an achievement; unknown or already-unlocked ids are ignored
    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        let now = self.now();
        let unlocked = self.achievements.unlock(id, now);
        if unlocked {
            tracing::info!(achievement = id, "achievement unlocked");
            self.events
                .record(ChronicleEvent::AchievementUnlocked { id: id.to_string() });
        }
        unlocked
    }

    /// Graduate from the academy
    ///
    /// Runs once: hands out the starter dinghy (only into an empty fleet),
    /// grants the bonus, opens the helm and unlocks the graduate achievement.
    /// Later calls do nothing and return false.
    pub fn complete_academy(&mut self) -> bool {
        if self.academy_completed {
            return false;
        }

        if self.fleet.is_empty() {
            let starter = ShipTemplate::of_class(ShipClass::Dinghy).named(STARTER_SHIP_NAME);
            self.push_ship(Ship::from_template(starter, self.now()));
        }

        self.academy_completed = true;
        tracing::info!(call_sign = %self.admiral.call_sign, "academy completed");
        self.events.record(ChronicleEvent::AcademyCompleted);

        self.gain_experience(ACADEMY_BONUS_EXPERIENCE);
        self.unlock_phase(ModulePhase::Helm);
        self.unlock_achievement(ACADEMY_GRADUATE);
        true
    }

    // === FLEET ===

    /// Commission a ship of the given class and return its id
    pub fn add_ship(&mut self, class: ShipClass) -> ShipId {
        let ship = Ship::commission(class, self.now());
        self.push_ship(ship)
    }

    /// Add a ship built from a template and return its id
    pub fn unlock_ship(&mut self, template: ShipTemplate) -> ShipId {
        let ship = Ship::from_template(template, self.now());
        self.push_ship(ship)
    }

    fn push_ship(&mut self, ship: Ship) -> ShipId {
        let id = ship.id;
        let class = ship.class;
        let auto_selected = self.fleet.push(ship);

        tracing::info!(%id, %class, fleet_size = self.fleet.len(), "ship acquired");
        self.events.record(ChronicleEvent::ShipAcquired { id, class });
        if auto_selected {
            self.events
                .record(ChronicleEvent::ActiveShipChanged { id: Some(id) });
        }
        id
    }

    /// Select the active ship, or clear it with `None`
    ///
    /// Returns false and changes nothing when the id is not in the fleet.
    pub fn set_active_ship(&mut self, id: Option<ShipId>) -> bool {
        if self.fleet.active_id() == id {
            return true;
        }
        let accepted = self.fleet.set_active(id);
        if accepted {
            self.events.record(ChronicleEvent::ActiveShipChanged { id });
        } else {
            tracing::warn!(?id, "ignoring unknown active ship");
        }
        accepted
    }

    // === IDENTITY ===

    pub fn set_admiral_info(&mut self, name: impl Into<String>, call_sign: impl Into<String>) {
        self.admiral = AdmiralProfile::new(name, call_sign);
        self.events.record(ChronicleEvent::AdmiralRenamed {
            name: self.admiral.name.clone(),
            call_sign: self.admiral.call_sign.clone(),
        });
    }

    /// Detect a brand-new cadet and commission them
    ///
    /// A new cadet gets the commissioned name, a generated call sign and an
    /// active onboarding sequence. Other profiles are left alone.
    pub fn first_contact<R: Rng>(&mut self, rng: &mut R) -> FirstContact {
        let is_new_cadet = self.admiral.is_placeholder()
            && self.onboarding.stage() == OnboardingStage::NotStarted;
        if is_new_cadet {
            let call_sign = generate_call_sign(rng, self.now());
            self.set_admiral_info(COMMISSIONED_NAME, call_sign.clone());
            self.start_onboarding();
            tracing::info!(%call_sign, "new cadet detected");
            return FirstContact::NewCadet { call_sign };
        }

        if !self.admiral.is_placeholder() && self.onboarding.has_completed() {
            tracing::info!(
                name = %self.admiral.name,
                call_sign = %self.admiral.call_sign,
                level = self.level(),
                rank = %self.rank(),
                "welcome back"
            );
            return FirstContact::ReturningAdmiral;
        }

        FirstContact::InProgress
    }

    // === ONBOARDING ===

    pub fn start_onboarding(&mut self) -> bool {
        let started = self.onboarding.start();
        if started {
            self.events.record(ChronicleEvent::OnboardingStarted);
        }
        started
    }

    pub fn advance_onboarding_step(&mut self) -> bool {
        let advanced = self.onboarding.advance_step();
        if advanced {
            self.events.record(ChronicleEvent::OnboardingStepAdvanced {
                step: self.onboarding.step(),
            });
        }
        advanced
    }

    pub fn complete_onboarding_phase(&mut self, milestone: Milestone) -> bool {
        let flipped = self.onboarding.complete_milestone(milestone);
        if flipped {
            self.events.record(ChronicleEvent::milestone(milestone));
        }
        flipped
    }

    pub fn complete_onboarding(&mut self) -> bool {
        let done = self.onboarding.complete();
        self.record_onboarding_completed(done, false);
        done
    }

    pub fn finish_onboarding(&mut self) -> bool {
        let done = self.onboarding.finish();
        self.record_onboarding_completed(done, false);
        done
    }

    pub fn skip_onboarding(&mut self) -> bool {
        let done = self.onboarding.skip();
        self.record_onboarding_completed(done, true);
        done
    }

    fn record_onboarding_completed(&mut self, done: bool, skipped: bool) {
        if done {
            tracing::info!(skipped, "onboarding completed");
            self.events
                .record(ChronicleEvent::OnboardingCompleted { skipped });
        }
    }
}
