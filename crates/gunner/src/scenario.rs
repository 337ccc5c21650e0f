//! Demo engagement held in a `hecs` world and published as snapshots.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use space_core::{
    Catalog, EntityId, EntityIdAllocator, Missile, Nation, Ship, Snapshot, Star, Vector,
};
use std::f64::consts::TAU;
use std::sync::Arc;

use crate::config::GunnerConfig;

#[derive(Debug, Clone)]
pub struct Identity {
    pub id: EntityId,
    pub name: String,
}

/// Nation of a ship or missile.
#[derive(Debug, Clone)]
pub struct Allegiance(pub Nation);

/// Kinematic state as reported by the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Body {
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
}

#[derive(Debug, Clone, Default)]
pub struct Hull {
    pub class: Option<String>,
    pub heading: f64,
    pub board: f64,
}

/// Marks the ship the gunner sits in.
#[derive(Debug, Clone, Copy)]
pub struct OwnShip;

/// Marks a missile in flight.
#[derive(Debug, Clone, Copy)]
pub struct Warhead;

#[derive(Debug, Clone, Copy)]
pub struct Photosphere {
    pub radius: f64,
}

pub const HOME_NATION: &str = "Federation";
pub const RIVAL_NATION: &str = "Consortium";

/// The world the gunner watches.
pub struct Scenario {
    pub world: World,
    ids: EntityIdAllocator,
    /// Ships other than the own ship, in spawn order.
    ships: Vec<Entity>,
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            ids: EntityIdAllocator::new(),
            ships: Vec::new(),
        }
    }

    /// Populate a random engagement around the origin. Distances are
    /// multiples of `scale` so everything starts near the screen.
    pub fn generate(config: &GunnerConfig, catalog: &Catalog, scale: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut scenario = Self::new();

        let mut classes: Vec<&str> = catalog.ship_classes.keys().map(String::as_str).collect();
        classes.sort_unstable();
        let pick_class = |rng: &mut StdRng| -> Option<String> {
            if classes.is_empty() {
                None
            } else {
                Some(classes[rng.gen_range(0..classes.len())].to_string())
            }
        };

        let own_hull = Hull {
            class: pick_class(&mut rng),
            heading: rng.gen_range(0.0..TAU),
            board: 0.0,
        };
        scenario.spawn_ship("Rodger Young", Nation::new(HOME_NATION), own_hull, Body::default(), true);

        for i in 0..config.ships {
            let nation = if i % 2 == 0 { RIVAL_NATION } else { HOME_NATION };
            let body = Body {
                position: random_offset(&mut rng, scale * 3.0),
                velocity: random_offset(&mut rng, 10.0),
                acceleration: Vector::ZERO,
            };
            let hull = Hull {
                class: pick_class(&mut rng),
                heading: rng.gen_range(0.0..TAU),
                board: if rng.gen_bool(0.25) { 0.75 } else { 0.0 },
            };
            scenario.spawn_ship(
                &format!("{} {}", &nation[..3], i + 1),
                Nation::new(nation),
                hull,
                body,
                false,
            );
        }

        for i in 0..config.missiles {
            let nation = if i % 2 == 0 { RIVAL_NATION } else { HOME_NATION };
            let body = Body {
                position: random_offset(&mut rng, scale * 2.0),
                velocity: random_offset(&mut rng, 50.0),
                acceleration: random_offset(&mut rng, 1.0),
            };
            scenario.spawn_missile(Nation::new(nation), body);
        }

        for i in 0..config.stars {
            let position = random_offset(&mut rng, scale * 4.0);
            let radius = rng.gen_range(1.0e5..1.0e6);
            scenario.spawn_star(&format!("Star {}", i + 1), position, radius);
        }

        log::info!(
            "Scenario generated: {} ships, {} missiles, {} stars",
            scenario.ships.len() + 1,
            config.missiles,
            config.stars
        );
        scenario
    }

    pub fn spawn_ship(
        &mut self,
        name: &str,
        nation: Nation,
        hull: Hull,
        body: Body,
        own: bool,
    ) -> Entity {
        let identity = Identity {
            id: self.ids.allocate(),
            name: name.to_string(),
        };
        let allegiance = Allegiance(nation);
        if own {
            self.world.spawn((identity, allegiance, body, hull, OwnShip))
        } else {
            let entity = self.world.spawn((identity, allegiance, body, hull));
            self.ships.push(entity);
            entity
        }
    }

    pub fn spawn_missile(&mut self, nation: Nation, body: Body) -> Entity {
        let identity = Identity {
            id: self.ids.allocate(),
            name: String::new(),
        };
        self.world.spawn((identity, Allegiance(nation), body, Warhead))
    }

    pub fn spawn_star(&mut self, name: &str, position: Vector, radius: f64) -> Entity {
        let identity = Identity {
            id: self.ids.allocate(),
            name: name.to_string(),
        };
        let body = Body {
            position,
            ..Body::default()
        };
        self.world.spawn((identity, body, Photosphere { radius }))
    }

    /// Remove the `index`-th spawned ship (own ship excluded). Returns its id.
    pub fn destroy_ship(&mut self, index: usize) -> Option<EntityId> {
        if index >= self.ships.len() {
            log::warn!("No ship #{} to destroy", index);
            return None;
        }
        let entity = self.ships.remove(index);
        let id = self.world.get::<&Identity>(entity).ok().map(|i| i.id);
        if self.world.despawn(entity).is_err() {
            log::warn!("Ship #{} was already gone", index);
        }
        id
    }

    /// Build an immutable snapshot of the current world.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let mut snapshot = Snapshot::new();

        for (_, (identity, allegiance, body, hull, own)) in self
            .world
            .query::<(&Identity, &Allegiance, &Body, &Hull, Option<&OwnShip>)>()
            .iter()
        {
            let ship = Ship {
                id: identity.id,
                name: identity.name.clone(),
                nation: allegiance.0.clone(),
                class: hull.class.clone(),
                position: body.position,
                velocity: body.velocity,
                acceleration: body.acceleration,
                heading: hull.heading,
                board: hull.board,
            };
            if own.is_some() {
                snapshot.own_ship = Some(ship);
            } else {
                snapshot.ships.push(ship);
            }
        }

        for (_, (identity, allegiance, body, _)) in self
            .world
            .query::<(&Identity, &Allegiance, &Body, &Warhead)>()
            .iter()
        {
            snapshot.missiles.push(Missile {
                id: identity.id,
                nation: allegiance.0.clone(),
                position: body.position,
                velocity: body.velocity,
                acceleration: body.acceleration,
            });
        }

        for (_, (identity, body, photosphere)) in
            self.world.query::<(&Identity, &Body, &Photosphere)>().iter()
        {
            snapshot.stars.push(Star {
                id: identity.id,
                name: identity.name.clone(),
                position: body.position,
                radius: photosphere.radius,
            });
        }

        // Query order follows archetypes; sort for a stable draw order.
        snapshot.ships.sort_by_key(|s| s.id);
        snapshot.missiles.sort_by_key(|m| m.id);
        snapshot.stars.sort_by_key(|s| s.id);
        snapshot.into_shared()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

fn random_offset(rng: &mut StdRng, extent: f64) -> Vector {
    Vector::new(rng.gen_range(-extent..extent), rng.gen_range(-extent..extent))
}
