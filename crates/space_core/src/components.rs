//! Entity data shared between the snapshot producer and the display.
//!
//! Entities are plain data. The display never mutates them; a producer
//! replaces whole snapshots instead.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::vector::Vector;

/// Stable identity of an entity across snapshot replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Hands out monotonically increasing [`EntityId`]s.
#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: AtomicU64,
}

impl EntityIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self) -> EntityId {
        EntityId(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Nation tag. Ships of the same nation are friendly to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nation(pub String);

impl Nation {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for Nation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that belongs to a nation and can be compared with the own ship.
pub trait Affiliated {
    fn id(&self) -> EntityId;
    fn nation(&self) -> &Nation;
}

/// A ship as seen by the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub name: String,
    pub nation: Nation,
    /// Ship class name, looked up in the catalog for missile range.
    pub class: Option<String>,
    /// Position (km).
    pub position: Vector,
    /// Velocity (km/s).
    pub velocity: Vector,
    /// Acceleration (km/s²).
    pub acceleration: Vector,
    /// Heading in radians, 0 = +Y, clockwise.
    pub heading: f64,
    /// Boarding/closing state in `[0, 1]`. Above one half the hull is drawn as an open wedge.
    pub board: f64,
}

impl Ship {
    pub fn new(id: EntityId, name: impl Into<String>, nation: Nation) -> Self {
        Self {
            id,
            name: name.into(),
            nation,
            class: None,
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            heading: 0.0,
            board: 0.0,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn at(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn board(mut self, board: f64) -> Self {
        self.board = board;
        self
    }
}

impl Affiliated for Ship {
    fn id(&self) -> EntityId {
        self.id
    }

    fn nation(&self) -> &Nation {
        &self.nation
    }
}

/// A missile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: EntityId,
    pub nation: Nation,
    pub position: Vector,
    pub velocity: Vector,
    /// Acceleration; its direction orients the missile marker.
    pub acceleration: Vector,
}

impl Affiliated for Missile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn nation(&self) -> &Nation {
        &self.nation
    }
}

/// A star with a physical radius (km).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: EntityId,
    pub name: String,
    pub position: Vector,
    pub radius: f64,
}
