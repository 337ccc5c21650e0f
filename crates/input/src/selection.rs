//! Click-to-select with cycling through overlapping ships.

use glam::Vec2;
use space_core::{EntityId, Projection, Snapshot};
use std::collections::VecDeque;

/// Raised once per distinct selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub previous: Option<EntityId>,
    pub current: Option<EntityId>,
}

/// Tracks the selected ship and queues change notifications for the host.
#[derive(Debug, Default)]
pub struct SelectionResolver {
    selected: Option<EntityId>,
    events: VecDeque<SelectionChanged>,
}

impl SelectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Select `id`. Queues an event only if the selection actually changes.
    pub fn select(&mut self, id: Option<EntityId>) {
        if id == self.selected {
            return;
        }
        let event = SelectionChanged {
            previous: self.selected,
            current: id,
        };
        log::debug!("Selection changed: {:?} -> {:?}", event.previous, event.current);
        self.selected = id;
        self.events.push_back(event);
    }

    /// Resolve a click at `device_point`.
    ///
    /// Ships (own ship included) closer than half an inch of world distance
    /// are candidates. Repeated clicks on the same spot step through the
    /// candidates from nearest to farthest, wrapping around.
    pub fn click(&mut self, device_point: Vec2, projection: &Projection, snapshot: &Snapshot) {
        let world = projection.device_to_world(device_point);
        let threshold = projection.world_scale / 2.0;

        let mut candidates: Vec<(f64, EntityId)> = snapshot
            .all_ships()
            .filter_map(|ship| {
                let offset = ship.position - world;
                (offset.length() < threshold).then(|| (offset.length_squared(), ship.id))
            })
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let next = match candidates.as_slice() {
            [] => None,
            [(_, only)] => Some(*only),
            _ => {
                let current = self
                    .selected
                    .and_then(|id| candidates.iter().position(|(_, c)| *c == id));
                match current {
                    Some(index) => Some(candidates[(index + 1) % candidates.len()].1),
                    None => Some(candidates[0].1),
                }
            }
        };
        self.select(next);
    }

    /// Drop the selection if its ship is gone from `snapshot`.
    pub fn retain(&mut self, snapshot: &Snapshot) {
        if let Some(id) = self.selected {
            if snapshot.ship(id).is_none() {
                self.select(None);
            }
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SelectionChanged> + '_ {
        self.events.drain(..)
    }
}
