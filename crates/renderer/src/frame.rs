//! One redraw of the whole display.

use space_core::{Catalog, EntityId, Snapshot};
use std::sync::Arc;

use crate::canvas::{Canvas, DrawCommand};
use crate::entities::{Curve, EntityRef, EntityRenderer};
use crate::grid::{draw_grid, GridGeometry};
use crate::options::DisplayOptions;
use crate::palette::Palette;
use crate::view::{Surface, ViewState};
use crate::visibility::{ClientArea, Culler, FrameStats};

/// The tactical display: view settings, styles, catalog, host curves and the
/// snapshot currently shown.
pub struct SpaceGrid {
    pub view: ViewState,
    pub palette: Palette,
    catalog: Arc<Catalog>,
    curves: Vec<Curve>,
    snapshot: Arc<Snapshot>,
    selected: Option<EntityId>,
}

impl SpaceGrid {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            view: ViewState::default(),
            palette: Palette::default(),
            catalog,
            curves: Vec::new(),
            snapshot: Arc::new(Snapshot::default()),
            selected: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Replace the snapshot by reference.
    pub fn set_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        if !Arc::ptr_eq(&self.snapshot, &snapshot) {
            self.snapshot = snapshot;
            self.view.request_redraw();
        }
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn set_selected(&mut self, selected: Option<EntityId>) {
        if selected != self.selected {
            self.selected = selected;
            self.view.request_redraw();
        }
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn add_curve(&mut self, curve: Curve) {
        self.curves.push(curve);
        self.view.request_redraw();
    }

    pub fn clear_curves(&mut self) {
        if !self.curves.is_empty() {
            self.curves.clear();
            self.view.request_redraw();
        }
    }

    /// Draw a full frame and clear the pending redraw request.
    ///
    /// Order: background, grid, stars, curves, missiles, other ships, own
    /// ship, selection marker.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, surface: &Surface) -> FrameStats {
        let projection = self.view.projection(surface);
        let area = ClientArea::new(surface.rect);
        let snapshot = Arc::clone(&self.snapshot);
        let mut culler = Culler::new(canvas, area);

        culler.always(DrawCommand::Fill {
            color: self.palette.paper,
            bounds: area.rect(),
        });
        culler.always(DrawCommand::Rectangle {
            pen: self.palette.border,
            bounds: area.rect(),
        });

        let options = self.view.options();
        if !options.contains(DisplayOptions::NO_GRID) {
            let geometry = if self.view.polar() {
                GridGeometry::polar(&projection, area.rect())
            } else {
                GridGeometry::cartesian(&projection, area.rect(), self.view.static_grid())
            };
            draw_grid(&mut culler, &geometry, self.palette.grid);
        }

        let renderer = EntityRenderer {
            projection: &projection,
            palette: &self.palette,
            catalog: &self.catalog,
            options,
            own_ship: snapshot.own_ship.as_ref(),
        };

        let entities = snapshot
            .stars
            .iter()
            .map(EntityRef::Star)
            .chain(self.curves.iter().map(EntityRef::Curve))
            .chain(snapshot.missiles.iter().map(EntityRef::Missile))
            .chain(snapshot.ships.iter().map(EntityRef::Ship))
            .chain(snapshot.own_ship.iter().map(EntityRef::Ship));
        for entity in entities {
            renderer.draw_entity(&mut culler, entity);
        }

        if let Some(ship) = self.selected.and_then(|id| snapshot.ship(id)) {
            renderer.draw_selection(&mut culler, ship);
        }

        let stats = culler.stats();
        log::debug!(
            "Frame drawn: {} primitives emitted, {} culled",
            stats.emitted,
            stats.culled
        );
        self.view.take_redraw();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, Rect};
    use glam::Vec2;
    use space_core::{Missile, Nation, Ship, Star, Vector};

    fn surface() -> Surface {
        Surface::new(800.0, 600.0, Vec2::splat(96.0))
    }

    fn grid() -> SpaceGrid {
        SpaceGrid::new(Arc::new(Catalog::default().with_class("Frigate", 1.0e6)))
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            own_ship: Some(
                Ship::new(EntityId(1), "Own", Nation::new("A")).with_class("Frigate"),
            ),
            ships: vec![Ship::new(EntityId(2), "Bandit", Nation::new("B"))
                .at(Vector::new(1.0e6, 1.0e6))],
            missiles: vec![Missile {
                id: EntityId(3),
                nation: Nation::new("B"),
                position: Vector::new(-1.0e6, 0.0),
                velocity: Vector::ZERO,
                acceleration: Vector::new(1.0, 0.0),
            }],
            stars: vec![Star {
                id: EntityId(4),
                name: "Sol".into(),
                position: Vector::new(0.0, -1.0e6),
                radius: 7.0e5,
            }],
        }
    }

    #[test]
    fn background_comes_first() {
        let mut grid = grid();
        let mut list = DrawList::new();
        grid.render(&mut list, &surface());
        assert!(matches!(list.commands[0], DrawCommand::Fill { .. }));
        assert!(matches!(
            list.commands[1],
            DrawCommand::Rectangle { bounds, .. } if bounds == Rect::new(0.0, 0.0, 799.0, 599.0)
        ));
    }

    #[test]
    fn no_grid_option_suppresses_grid() {
        let mut grid = grid();
        grid.view.set_options(DisplayOptions::NO_GRID);
        let mut list = DrawList::new();
        let stats = grid.render(&mut list, &surface());
        assert_eq!(list.len(), 2);
        assert_eq!(stats, FrameStats { emitted: 2, culled: 0 });
    }

    #[test]
    fn entities_draw_in_layer_order() {
        let mut grid = grid();
        grid.view.set_options(DisplayOptions::NO_GRID);
        grid.set_snapshot(snapshot().into_shared());
        grid.set_selected(Some(EntityId(2)));
        let mut list = DrawList::new();
        grid.render(&mut list, &surface());

        let texts: Vec<&str> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Sol", "Bandit", "Own"]);
        // Selection marker is the last primitive.
        assert!(matches!(list.commands.last(), Some(DrawCommand::Rectangle { .. })));
    }

    #[test]
    fn everything_offscreen_emits_only_background() {
        let mut grid = grid();
        grid.view.set_options(DisplayOptions::NO_GRID);
        grid.view.set_origin(Vector::new(1.0e12, 1.0e12));
        grid.set_snapshot(snapshot().into_shared());
        let mut list = DrawList::new();
        let stats = grid.render(&mut list, &surface());
        assert_eq!(list.len(), 2);
        assert_eq!(stats.emitted, 2);
        assert!(stats.culled > 0);
    }

    #[test]
    fn render_clears_redraw_request() {
        let mut grid = grid();
        assert!(grid.view.needs_redraw());
        grid.render(&mut DrawList::new(), &surface());
        assert!(!grid.view.needs_redraw());

        let shared = snapshot().into_shared();
        grid.set_snapshot(Arc::clone(&shared));
        assert!(grid.view.take_redraw());
        grid.set_snapshot(shared);
        assert!(!grid.view.needs_redraw());
    }

    #[test]
    fn polar_grid_draws_rings() {
        let mut grid = grid();
        grid.view.set_polar(true);
        let mut list = DrawList::new();
        grid.render(&mut list, &surface());
        assert!(list.count(|c| matches!(c, DrawCommand::Ellipse { .. })) >= 2);
    }
}
