//! Relationship of an entity to the own ship, and per-relationship style tables.

use serde::{Deserialize, Serialize};

use crate::components::Affiliated;

/// How an entity relates to the designated own ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// The own ship itself.
    Mine,
    /// Same nation, different entity.
    Friendly,
    /// Different nation.
    Hostile,
    /// No own ship designated.
    #[default]
    Default,
}

/// Classify `entity` relative to `own`.
pub fn classify<O, E>(own: Option<&O>, entity: &E) -> Classification
where
    O: Affiliated + ?Sized,
    E: Affiliated + ?Sized,
{
    match own {
        None => Classification::Default,
        Some(own) if own.id() == entity.id() => Classification::Mine,
        Some(own) if own.nation() == entity.nation() => Classification::Friendly,
        Some(_) => Classification::Hostile,
    }
}

/// One style per [`Classification`]. Unset entries fall back to `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSet<T> {
    pub default: T,
    pub mine: Option<T>,
    pub friendly: Option<T>,
    pub hostile: Option<T>,
}

impl<T> StyleSet<T> {
    pub fn new(default: T) -> Self {
        Self {
            default,
            mine: None,
            friendly: None,
            hostile: None,
        }
    }

    pub fn mine(mut self, style: T) -> Self {
        self.mine = Some(style);
        self
    }

    pub fn friendly(mut self, style: T) -> Self {
        self.friendly = Some(style);
        self
    }

    pub fn hostile(mut self, style: T) -> Self {
        self.hostile = Some(style);
        self
    }

    /// Replace the entry for one classification.
    pub fn set(&mut self, classification: Classification, style: T) {
        match classification {
            Classification::Mine => self.mine = Some(style),
            Classification::Friendly => self.friendly = Some(style),
            Classification::Hostile => self.hostile = Some(style),
            Classification::Default => self.default = style,
        }
    }

    pub fn select(&self, classification: Classification) -> &T {
        let entry = match classification {
            Classification::Mine => self.mine.as_ref(),
            Classification::Friendly => self.friendly.as_ref(),
            Classification::Hostile => self.hostile.as_ref(),
            Classification::Default => None,
        };
        entry.unwrap_or(&self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EntityId, Nation, Ship};

    fn ship(id: u64, nation: &str) -> Ship {
        Ship::new(EntityId(id), format!("ship-{id}"), Nation::new(nation))
    }

    #[test]
    fn classifies_against_own_ship() {
        let a = ship(1, "X");
        let b = ship(2, "X");
        let c = ship(3, "Y");
        assert_eq!(classify(Some(&a), &a), Classification::Mine);
        assert_eq!(classify(Some(&a), &b), Classification::Friendly);
        assert_eq!(classify(Some(&a), &c), Classification::Hostile);
    }

    #[test]
    fn no_own_ship_is_default() {
        let none: Option<&Ship> = None;
        for s in [ship(1, "X"), ship(2, "X"), ship(3, "Y")] {
            assert_eq!(classify(none, &s), Classification::Default);
        }
    }

    #[test]
    fn identity_beats_nation() {
        // Own ship is Mine even when compared against a copy from a newer snapshot.
        let own = ship(5, "X").at(crate::Vector::new(1.0, 0.0));
        let same = ship(5, "X").at(crate::Vector::new(9.0, 9.0));
        assert_eq!(classify(Some(&own), &same), Classification::Mine);
    }

    #[test]
    fn style_set_falls_back_to_default() {
        let styles = StyleSet::new("black").mine("navy").hostile("red");
        assert_eq!(*styles.select(Classification::Mine), "navy");
        assert_eq!(*styles.select(Classification::Friendly), "black");
        assert_eq!(*styles.select(Classification::Hostile), "red");
        assert_eq!(*styles.select(Classification::Default), "black");
    }

    #[test]
    fn style_set_overrides_entry() {
        let mut styles = StyleSet::new(0).friendly(1);
        styles.set(Classification::Friendly, 2);
        styles.set(Classification::Default, 9);
        assert_eq!(*styles.select(Classification::Friendly), 2);
        assert_eq!(*styles.select(Classification::Default), 9);
    }
}
