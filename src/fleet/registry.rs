//! The admiral's fleet

use crate::core::types::ShipId;
use crate::fleet::ship::{Ship, ShipClass};
use std::collections::HashSet;

/// Append-only ship list with an optional active selection
///
/// `len()` is the authoritative fleet size. `reported_size()` is a display
/// counter that follows `len()` on every append but can be overwritten by an
/// external shipyard report, so the two may disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    ships: Vec<Ship>,
    active: Option<ShipId>,
    reported_size: usize,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored parts
    ///
    /// Ships repeating an earlier id are dropped, keeping the first. An
    /// active id that does not resolve is dropped. A missing reported size
    /// falls back to the ship count.
    pub fn from_parts(ships: Vec<Ship>, active: Option<ShipId>, reported_size: Option<usize>) -> Self {
        let mut seen = HashSet::new();
        let ships: Vec<Ship> = ships
            .into_iter()
            .filter(|ship| {
                let first = seen.insert(ship.id);
                if !first {
                    tracing::warn!(id = %ship.id, class = %ship.class, "dropping ship with duplicate id");
                }
                first
            })
            .collect();
        let active = active.filter(|id| ships.iter().any(|s| s.id == *id));
        let reported_size = reported_size.unwrap_or(ships.len());
        Self {
            ships,
            active,
            reported_size,
        }
    }

    /// Append a ship; selects it if nothing is active
    ///
    /// Returns true when the ship became the active one.
    pub fn push(&mut self, ship: Ship) -> bool {
        let auto_selected = self.active.is_none();
        if auto_selected {
            self.active = Some(ship.id);
        }
        self.ships.push(ship);
        self.reported_size = self.ships.len();
        auto_selected
    }

    /// Select a ship by id, or clear the selection with `None`
    ///
    /// Unknown ids are rejected and leave the selection untouched.
    pub fn set_active(&mut self, id: Option<ShipId>) -> bool {
        match id {
            Some(id) if !self.contains(id) => false,
            other => {
                self.active = other;
                true
            }
        }
    }

    pub fn active_id(&self) -> Option<ShipId> {
        self.active
    }

    pub fn active_ship(&self) -> Option<&Ship> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.get(id).is_some()
    }

    pub fn has_class(&self, class: ShipClass) -> bool {
        self.ships.iter().any(|s| s.class == class)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn reported_size(&self) -> usize {
        self.reported_size
    }

    /// Overwrite the display counter with an external count
    pub fn report_size(&mut self, count: usize) {
        self.reported_size = count;
    }

    pub fn is_report_consistent(&self) -> bool {
        self.reported_size == self.ships.len()
    }
}
