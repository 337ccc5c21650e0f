//! Read-only ship and weapon catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;

use crate::error::GridError;

/// Static properties of a ship class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipClass {
    /// Range of the missiles this class carries (km).
    pub missile_range: f64,
}

/// Catalog of ranges and sector apertures queried while drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Longest missile range of any class (km).
    #[serde(default = "default_maximum_missile_range")]
    pub maximum_missile_range: f64,
    /// Full aperture of the forward vulnerable cone (radians).
    #[serde(default = "default_throat_angle")]
    pub throat_angle: f64,
    /// Full aperture of the rear vulnerable cone (radians).
    #[serde(default = "default_skirt_angle")]
    pub skirt_angle: f64,
    /// Initial display scale (km per inch).
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    #[serde(default)]
    pub ship_classes: HashMap<String, ShipClass>,
}

fn default_maximum_missile_range() -> f64 {
    3.0e6
}
fn default_throat_angle() -> f64 {
    PI / 6.0
}
fn default_skirt_angle() -> f64 {
    PI / 4.0
}
fn default_scale() -> f64 {
    1.0e6
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            maximum_missile_range: default_maximum_missile_range(),
            throat_angle: default_throat_angle(),
            skirt_angle: default_skirt_angle(),
            default_scale: default_scale(),
            ship_classes: HashMap::new(),
        }
    }
}

impl Catalog {
    /// Parse a catalog from RON text.
    pub fn from_ron(text: &str) -> Result<Self, GridError> {
        ron::from_str(text).map_err(|e| GridError::Catalog(e.to_string()))
    }

    pub fn with_class(mut self, name: impl Into<String>, missile_range: f64) -> Self {
        self.ship_classes
            .insert(name.into(), ShipClass { missile_range });
        self
    }

    /// Strict lookup of a ship class.
    pub fn ship_class(&self, name: &str) -> Result<&ShipClass, GridError> {
        self.ship_classes
            .get(name)
            .ok_or_else(|| GridError::UnknownShipClass(name.to_string()))
    }

    /// Missile range of a class; 0 when the class is missing or unknown.
    pub fn missile_range(&self, class: Option<&str>) -> f64 {
        match class {
            Some(name) => match self.ship_class(name) {
                Ok(c) => c.missile_range,
                Err(e) => {
                    log::debug!("{}, assuming no missiles", e);
                    0.0
                }
            },
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missile_range_falls_back_to_zero() {
        let catalog = Catalog::default().with_class("Frigate", 2.0e6);
        assert_eq!(catalog.missile_range(Some("Frigate")), 2.0e6);
        assert_eq!(catalog.missile_range(Some("Dreadnought")), 0.0);
        assert_eq!(catalog.missile_range(None), 0.0);
    }

    #[test]
    fn strict_lookup_reports_unknown_class() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.ship_class("Corvette"),
            Err(GridError::UnknownShipClass("Corvette".into()))
        );
    }

    #[test]
    fn parses_partial_ron() {
        let catalog = Catalog::from_ron(
            r#"(
                maximum_missile_range: 5000000.0,
                ship_classes: { "Cruiser": (missile_range: 4000000.0) },
            )"#,
        )
        .unwrap();
        assert_eq!(catalog.maximum_missile_range, 5.0e6);
        assert_eq!(catalog.default_scale, 1.0e6);
        assert_eq!(catalog.missile_range(Some("Cruiser")), 4.0e6);
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(matches!(
            Catalog::from_ron("(maximum_missile_range: \"far\")"),
            Err(GridError::Catalog(_))
        ));
    }
}
