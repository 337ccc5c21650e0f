//! Entity snapshot handed to the display once per update tick.

use std::sync::Arc;

use crate::components::{EntityId, Missile, Ship, Star};

/// Everything the display knows about the world for one update tick.
///
/// Snapshots are shared as `Arc<Snapshot>` and replaced wholesale; the
/// display only ever reads them.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub own_ship: Option<Ship>,
    pub ships: Vec<Ship>,
    pub missiles: Vec<Missile>,
    pub stars: Vec<Star>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Other ships followed by the own ship, if any.
    pub fn all_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().chain(self.own_ship.iter())
    }

    /// Look up a ship (including the own ship) by identity.
    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.all_ships().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.own_ship.is_none()
            && self.ships.is_empty()
            && self.missiles.is_empty()
            && self.stars.is_empty()
    }
}
