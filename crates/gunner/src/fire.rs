//! Broadside readout for the gunner station.

use space_core::{classify, Classification, Ship, VectorExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireSide {
    Left,
    Right,
}

/// Side of `own` facing `target`.
pub fn fire_side(own: &Ship, target: &Ship) -> FireSide {
    let bearing = (target.position - own.position).argument();
    if (bearing - own.heading).sin() < 0.0 {
        FireSide::Left
    } else {
        FireSide::Right
    }
}

/// A shot needs a selected ship other than our own, and a hostile one unless
/// friendly fire is allowed.
pub fn can_fire(own: &Ship, target: Option<&Ship>, friendly_fire: bool) -> bool {
    match target {
        None => false,
        Some(target) => match classify(Some(own), target) {
            Classification::Mine => false,
            Classification::Hostile => true,
            _ => friendly_fire,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_core::{EntityId, Nation, Vector};
    use std::f64::consts::FRAC_PI_2;

    fn ship(id: u64, nation: &str, x: f64, y: f64) -> Ship {
        Ship::new(EntityId(id), format!("S{id}"), Nation::new(nation)).at(Vector::new(x, y))
    }

    #[test]
    fn side_depends_on_relative_bearing() {
        let own = ship(1, "A", 0.0, 0.0);
        assert_eq!(fire_side(&own, &ship(2, "B", 10.0, 0.0)), FireSide::Right);
        assert_eq!(fire_side(&own, &ship(2, "B", -10.0, 0.0)), FireSide::Left);

        // Heading east, a target to the north is on the left.
        let east = own.clone().heading(FRAC_PI_2);
        assert_eq!(fire_side(&east, &ship(2, "B", 0.0, 10.0)), FireSide::Left);
        assert_eq!(fire_side(&east, &ship(2, "B", 0.0, -10.0)), FireSide::Right);
    }

    #[test]
    fn firing_rules() {
        let own = ship(1, "A", 0.0, 0.0);
        let friend = ship(2, "A", 5.0, 0.0);
        let enemy = ship(3, "B", 5.0, 0.0);
        assert!(!can_fire(&own, None, true));
        assert!(!can_fire(&own, Some(&own), true));
        assert!(can_fire(&own, Some(&enemy), false));
        assert!(!can_fire(&own, Some(&friend), false));
        assert!(can_fire(&own, Some(&friend), true));
    }
}
