//! The gunner's display station: one tick per frame.

use anyhow::Result;
use glam::Vec2;
use grid_input::{ElementState, InputState, KeyCode, MouseButton, SelectionResolver};
use grid_renderer::{colors, Curve, DrawList, FrameStats, LineVertex, Pen, SpaceGrid, Surface, Tessellator};
use space_core::{Catalog, Classification, EntityId, Ship, Vector};
use std::sync::Arc;

use crate::config::{Action, GunnerConfig};
use crate::fire::{can_fire, fire_side, FireSide};
use crate::scenario::Scenario;

/// What happened during one tick.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame: u32,
    /// Present when the display was redrawn.
    pub stats: Option<FrameStats>,
    /// Bytes of line vertices ready for upload.
    pub line_bytes: usize,
    pub selected: Option<EntityId>,
    /// Broadside facing the selected ship and whether a shot is allowed.
    pub fire: Option<(FireSide, bool)>,
    /// Motion of the selected ship, or of the own ship when nothing is selected.
    pub motion: Option<Motion>,
}

/// Kinematic readout shown on the gunner's indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub id: EntityId,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
}

impl Motion {
    pub fn of(ship: &Ship) -> Self {
        Self {
            id: ship.id,
            position: ship.position,
            velocity: ship.velocity,
            acceleration: ship.acceleration,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

pub struct Station {
    pub grid: SpaceGrid,
    pub selection: SelectionResolver,
    pub input: InputState,
    pub scenario: Scenario,
    surface: Surface,
    config: GunnerConfig,
    frame: u32,
}

impl Station {
    pub fn new(config: GunnerConfig, catalog: Catalog) -> Result<Self> {
        let catalog = Arc::new(catalog);
        let scale = config.initial_scale.unwrap_or(catalog.default_scale);

        let mut grid = SpaceGrid::new(Arc::clone(&catalog));
        grid.view.set_world_scale(scale)?;
        grid.view.set_polar(config.polar);
        grid.view.set_static_grid(config.static_grid);
        grid.view.set_options(config.display_options());
        grid.palette
            .vulnerable_sectors
            .set(Classification::Friendly, Pen::new(colors::BLACK));
        grid.palette
            .vulnerable_sectors
            .set(Classification::Hostile, Pen::new(colors::BLACK));

        let scenario = Scenario::generate(&config, &catalog, scale);
        let surface = Surface::new(
            config.surface_width,
            config.surface_height,
            Vec2::splat(config.dpi),
        );

        Ok(Self {
            grid,
            selection: SelectionResolver::new(),
            input: InputState::new(),
            scenario,
            surface,
            config,
            frame: 0,
        })
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Feed scripted actions for the current frame through the input layer.
    fn apply_script(&mut self) {
        let actions: Vec<Action> = self.config.actions_at(self.frame).cloned().collect();
        for action in actions {
            log::debug!("Frame {}: {:?}", self.frame, action);
            match action {
                Action::Click { x, y } => {
                    self.input.process_cursor_position((x as f64, y as f64));
                    self.input
                        .process_mouse_button(MouseButton::Left, ElementState::Pressed);
                    self.input
                        .process_mouse_button(MouseButton::Left, ElementState::Released);
                }
                Action::ZoomIn => self.tap(KeyCode::Equal),
                Action::ZoomOut => self.tap(KeyCode::Minus),
                Action::TogglePolar => {
                    let polar = self.grid.view.polar();
                    self.grid.view.set_polar(!polar);
                }
                Action::Destroy(index) => {
                    if let Some(id) = self.scenario.destroy_ship(index) {
                        log::info!("Ship {:?} destroyed", id);
                    }
                }
            }
        }
    }

    /// Replace the firing-line curve only when its endpoints move.
    fn update_firing_line(&mut self, points: Option<Vec<Vector>>) {
        let current = self.grid.curves().first().map(|curve| &curve.points);
        if current == points.as_ref() {
            return;
        }
        self.grid.clear_curves();
        if let Some(points) = points {
            self.grid
                .add_curve(Curve::with_points(self.grid.palette.signal, points));
        }
    }

    fn tap(&mut self, key: KeyCode) {
        self.input.process_keyboard(key, ElementState::Pressed);
        self.input.process_keyboard(key, ElementState::Released);
    }

    /// Run one frame: input, snapshot, selection, readouts, redraw.
    pub fn tick(&mut self) -> FrameReport {
        self.input.begin_frame();
        self.apply_script();

        let snapshot = self.scenario.snapshot();
        self.grid.set_snapshot(Arc::clone(&snapshot));
        self.selection.retain(&snapshot);

        if let Some(own) = &snapshot.own_ship {
            self.grid.view.set_origin(own.position);
            self.grid.view.set_rotation(own.heading);
        }

        let zoomed = match self.input.zoom_steps() {
            steps if steps > 0 => self.grid.view.zoom_in(),
            steps if steps < 0 => self.grid.view.zoom_out(),
            _ => Ok(()),
        };
        if let Err(err) = zoomed {
            log::debug!("Zoom ignored: {}", err);
        }

        let projection = self.grid.view.projection(&self.surface);
        for click in self.input.clicks() {
            self.selection.click(*click, &projection, &snapshot);
        }
        for event in self.selection.drain_events() {
            log::info!("Selected {:?} (was {:?})", event.current, event.previous);
            self.grid.set_selected(event.current);
        }

        let mut report = FrameReport {
            frame: self.frame,
            selected: self.selection.selected(),
            ..FrameReport::default()
        };

        let target = report.selected.and_then(|id| snapshot.ship(id));
        report.motion = target.or(snapshot.own_ship.as_ref()).map(Motion::of);

        let mut firing_line = None;
        if let (Some(own), Some(target)) = (snapshot.own_ship.as_ref(), target) {
            let allowed = can_fire(own, Some(target), self.config.friendly_fire);
            report.fire = Some((fire_side(own, target), allowed));
            if target.id != own.id {
                firing_line = Some(vec![own.position, target.position]);
            }
        }
        self.update_firing_line(firing_line);

        if self.grid.view.needs_redraw() {
            let mut list = DrawList::new();
            let stats = self.grid.render(&mut list, &self.surface);
            let tessellation =
                Tessellator::new(self.surface.rect.width, self.surface.rect.height)
                    .tessellate(&list);
            report.line_bytes = bytemuck::cast_slice::<LineVertex, u8>(&tessellation.lines).len();
            report.stats = Some(stats);
        }

        self.frame += 1;
        report
    }
}
