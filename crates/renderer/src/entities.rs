//! Per-entity drawing: stars, ships, missiles, curves and the selection marker.

use glam::Vec2;
use space_core::{
    classify, Catalog, Classification, Missile, Projection, Ship, Star, Vector, VectorExt,
    EPSILON,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::canvas::{Canvas, Pen, Rect};
use crate::options::DisplayOptions;
use crate::palette::Palette;
use crate::visibility::Culler;

/// Above this boarding state the hull is drawn as an open wedge.
pub const BOARD_THRESHOLD: f64 = 0.5;
/// Angle between the bow and each stern corner of the hull marker.
const HULL_TAIL: f64 = 11.0 * PI / 12.0;
/// Half-size of the single-point curve marker, in pixels.
pub const POINT_MARKER_PX: f32 = 4.0;

/// Freeform world-space polyline owned by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub points: Vec<Vector>,
    pub style: Pen,
}

impl Curve {
    pub fn new(style: Pen) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    pub fn with_points(style: Pen, points: Vec<Vector>) -> Self {
        Self { points, style }
    }
}

/// Anything the display can draw.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Missile(&'a Missile),
    Star(&'a Star),
    Curve(&'a Curve),
}

/// Draws entities for one frame.
pub struct EntityRenderer<'a> {
    pub projection: &'a Projection,
    pub palette: &'a Palette,
    pub catalog: &'a Catalog,
    pub options: DisplayOptions,
    pub own_ship: Option<&'a Ship>,
}

impl<'a> EntityRenderer<'a> {
    pub fn draw_entity<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, entity: EntityRef<'_>) {
        match entity {
            EntityRef::Ship(ship) => self.draw_ship(culler, ship),
            EntityRef::Missile(missile) => self.draw_missile(culler, missile),
            EntityRef::Star(star) => self.draw_star(culler, star),
            EntityRef::Curve(curve) => self.draw_curve(culler, curve),
        }
    }

    fn device(&self, world: Vector) -> Vec2 {
        self.projection.world_to_device(world)
    }

    /// Label offset from an entity's device position.
    fn label_offset(&self) -> Vec2 {
        Vec2::new(
            (self.projection.dpi.x / 8.0) as f32,
            (self.projection.dpi.y / 12.0) as f32,
        )
    }

    fn draw_star<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, star: &Star) {
        let center = self.device(star.position);
        let minimum = (self.projection.dpi / 32.0).as_vec2();
        let radius = self.projection.world_to_device_scalars(star.radius).max(minimum);
        culler.ellipse(self.palette.star, Rect::centered(center, radius));
        culler.text(self.palette.star_names, center + self.label_offset(), &star.name);
    }

    fn draw_ship<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, ship: &Ship) {
        let classification = classify(self.own_ship, ship);
        let center = self.device(ship.position);

        if self.sectors_enabled(classification) {
            self.draw_sectors(culler, ship, classification, center);
        }

        if self.missile_circle_enabled(classification) {
            let radius = self.missile_circle_radius(ship, classification);
            let radii = self.projection.world_to_device_scalars(radius);
            culler.ellipse(
                *self.palette.missile_circles.select(classification),
                Rect::centered(center, radii),
            );
        }

        self.draw_hull(culler, ship, classification);

        culler.text(
            *self.palette.ship_names.select(classification),
            center + self.label_offset(),
            &ship.name,
        );
    }

    fn sectors_enabled(&self, classification: Classification) -> bool {
        match classification {
            Classification::Mine => self.options.contains(DisplayOptions::MY_VULNERABLE_SECTORS),
            Classification::Friendly => self
                .options
                .contains(DisplayOptions::FRIENDLY_VULNERABLE_SECTORS),
            Classification::Hostile => self
                .options
                .contains(DisplayOptions::HOSTILE_VULNERABLE_SECTORS),
            Classification::Default => true,
        }
    }

    fn missile_circle_enabled(&self, classification: Classification) -> bool {
        match classification {
            Classification::Mine => self.options.contains(DisplayOptions::MY_MISSILE_CIRCLES),
            Classification::Friendly => self
                .options
                .contains(DisplayOptions::FRIENDLY_MISSILE_CIRCLES),
            Classification::Hostile => self
                .options
                .contains(DisplayOptions::HOSTILE_MISSILE_CIRCLES),
            Classification::Default => true,
        }
    }

    /// World radius of the vulnerable sectors.
    pub fn sector_radius(&self) -> f64 {
        if self
            .options
            .contains(DisplayOptions::FRIENDLY_SECTORS_BY_MY_MISSILE_RANGE)
        {
            if let Some(class) = self.own_ship.and_then(|own| own.class.as_deref()) {
                return self.catalog.missile_range(Some(class));
            }
        }
        self.catalog.maximum_missile_range
    }

    /// A hostile ship is drawn with the longest range in the catalog since
    /// its loadout is unknown.
    pub fn missile_circle_radius(&self, ship: &Ship, classification: Classification) -> f64 {
        match classification {
            Classification::Hostile => self.catalog.maximum_missile_range,
            _ => self.catalog.missile_range(ship.class.as_deref()),
        }
    }

    fn draw_sectors<C: Canvas + ?Sized>(
        &self,
        culler: &mut Culler<'_, C>,
        ship: &Ship,
        classification: Classification,
        center: Vec2,
    ) {
        let pen = *self.palette.vulnerable_sectors.select(classification);
        let radii = self.projection.world_to_device_scalars(self.sector_radius());
        let bounds = Rect::centered(center, radii);
        for (median, sweep) in [
            (ship.heading, self.catalog.throat_angle),
            (ship.heading - PI, self.catalog.skirt_angle),
        ] {
            let start = pie_start_degrees(median, sweep, self.projection.rotation);
            culler.pie(pen, bounds, start, sweep.to_degrees() as f32);
        }
    }

    fn draw_hull<C: Canvas + ?Sized>(
        &self,
        culler: &mut Culler<'_, C>,
        ship: &Ship,
        classification: Classification,
    ) {
        let pen = *self.palette.hulls.select(classification);
        let scale = self.projection.world_scale;
        let vertex = |size: f64, angle: f64| {
            self.device(ship.position + Vector::direction(ship.heading + angle) * size)
        };
        if ship.board <= BOARD_THRESHOLD {
            let size = scale / 6.0;
            culler.polygon(
                pen,
                vec![vertex(size, 0.0), vertex(size, HULL_TAIL), vertex(size, -HULL_TAIL)],
            );
        } else {
            let size = scale / 4.0;
            culler.line(pen, vertex(size, FRAC_PI_4), vertex(size, HULL_TAIL));
            culler.line(pen, vertex(size, -HULL_TAIL), vertex(size, -FRAC_PI_4));
        }
    }

    fn draw_missile<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, missile: &Missile) {
        let size = self.projection.world_scale / 6.0;
        let mut a = missile.acceleration;
        if a.length() > EPSILON {
            a = a.with_length(size);
        }
        let s = missile.position;
        let tail = a.rotated(FRAC_PI_2) / 3.0;
        let pen = self.palette.signal;
        culler.line(pen, self.device(s), self.device(s + a));
        culler.line(pen, self.device(s + tail), self.device(s - tail));
    }

    fn draw_curve<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, curve: &Curve) {
        let points = coalesce_pixels(curve.points.iter().map(|p| self.device(*p)));
        match points.as_slice() {
            [] => {}
            [p] => {
                let d = POINT_MARKER_PX;
                culler.polygon(
                    curve.style,
                    vec![
                        *p + Vec2::new(0.0, -d),
                        *p + Vec2::new(d, 0.0),
                        *p + Vec2::new(0.0, d),
                        *p + Vec2::new(-d, 0.0),
                    ],
                );
            }
            _ => culler.polyline(curve.style, points),
        }
    }

    /// Square marker around the selected ship.
    pub fn draw_selection<C: Canvas + ?Sized>(&self, culler: &mut Culler<'_, C>, ship: &Ship) {
        let half = (self.projection.dpi / 4.0).as_vec2();
        culler.rectangle(
            self.palette.selection,
            Rect::centered(self.device(ship.position), half),
        );
    }
}

/// Start angle of a pie wedge in device degrees (clockwise from +X) for a
/// cone centred on world heading `median` with full aperture `sweep`.
pub fn pie_start_degrees(median: f64, sweep: f64, rotation: f64) -> f32 {
    (median - sweep / 2.0 - FRAC_PI_2 - rotation).to_degrees() as f32
}

/// Round to whole pixels and drop consecutive duplicates.
pub fn coalesce_pixels(points: impl IntoIterator<Item = Vec2>) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::new();
    for p in points {
        let p = p.round();
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{colors, DrawCommand, DrawList};
    use crate::visibility::{ClientArea, FrameStats};
    use space_core::{EntityId, Nation};

    const SCALE: f64 = 1.0e6;

    fn projection() -> Projection {
        Projection::new(
            Vector::ZERO,
            0.0,
            SCALE,
            Vec2::splat(96.0),
            Vec2::new(400.0, 300.0),
        )
    }

    fn area() -> ClientArea {
        ClientArea::new(Rect::new(0.0, 0.0, 801.0, 601.0))
    }

    fn ship(id: u64, nation: &str) -> Ship {
        Ship::new(EntityId(id), format!("S{id}"), Nation::new(nation)).with_class("Frigate")
    }

    fn catalog() -> Catalog {
        Catalog::default().with_class("Frigate", 1.0e6)
    }

    fn render(
        entity: EntityRef<'_>,
        own: Option<&Ship>,
        options: DisplayOptions,
    ) -> (DrawList, FrameStats) {
        let projection = projection();
        let palette = Palette::default();
        let catalog = catalog();
        let renderer = EntityRenderer {
            projection: &projection,
            palette: &palette,
            catalog: &catalog,
            options,
            own_ship: own,
        };
        let mut list = DrawList::new();
        let stats = {
            let mut culler = Culler::new(&mut list, area());
            renderer.draw_entity(&mut culler, entity);
            culler.stats()
        };
        (list, stats)
    }

    fn pies(list: &DrawList) -> usize {
        list.count(|c| matches!(c, DrawCommand::Pie { .. }))
    }

    fn ellipses(list: &DrawList) -> usize {
        list.count(|c| matches!(c, DrawCommand::Ellipse { .. }))
    }

    #[test]
    fn ship_without_own_ship_draws_everything() {
        let s = ship(1, "A");
        let (list, stats) = render(EntityRef::Ship(&s), None, DisplayOptions::empty());
        assert_eq!(pies(&list), 2);
        assert_eq!(ellipses(&list), 1);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Polygon { .. })), 1);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Text { .. })), 1);
        assert_eq!(stats.culled, 0);
    }

    #[test]
    fn sector_toggles_follow_classification() {
        let own = ship(1, "A");
        let friend = ship(2, "A");
        let enemy = ship(3, "B");
        let options = DisplayOptions::HOSTILE_VULNERABLE_SECTORS;
        assert_eq!(pies(&render(EntityRef::Ship(&own), Some(&own), options).0), 0);
        assert_eq!(pies(&render(EntityRef::Ship(&friend), Some(&own), options).0), 0);
        assert_eq!(pies(&render(EntityRef::Ship(&enemy), Some(&own), options).0), 2);
    }

    #[test]
    fn hostile_missile_circle_uses_catalog_maximum() {
        let own = ship(1, "A");
        let enemy = ship(3, "B");
        let (list, _) = render(
            EntityRef::Ship(&enemy),
            Some(&own),
            DisplayOptions::HOSTILE_MISSILE_CIRCLES,
        );
        let radius = list.commands.iter().find_map(|c| match c {
            DrawCommand::Ellipse { bounds, .. } => Some(bounds.width / 2.0),
            _ => None,
        });
        // 3e6 km at 1e6 km/in and 96 dpi.
        assert_eq!(radius, Some(288.0));

        let (list, _) = render(EntityRef::Ship(&own), Some(&own), DisplayOptions::MY_MISSILE_CIRCLES);
        let radius = list.commands.iter().find_map(|c| match c {
            DrawCommand::Ellipse { bounds, .. } => Some(bounds.width / 2.0),
            _ => None,
        });
        assert_eq!(radius, Some(96.0));
    }

    #[test]
    fn unknown_class_skips_missile_circle() {
        let s = Ship::new(EntityId(4), "Drifter", Nation::new("A"));
        let (list, _) = render(EntityRef::Ship(&s), None, DisplayOptions::empty());
        assert_eq!(ellipses(&list), 0);
    }

    #[test]
    fn sector_radius_can_follow_own_missile_range() {
        let own = ship(1, "A");
        let projection = projection();
        let palette = Palette::default();
        let catalog = catalog();
        let mut renderer = EntityRenderer {
            projection: &projection,
            palette: &palette,
            catalog: &catalog,
            options: DisplayOptions::empty(),
            own_ship: Some(&own),
        };
        assert_eq!(renderer.sector_radius(), 3.0e6);
        renderer.options = DisplayOptions::FRIENDLY_SECTORS_BY_MY_MISSILE_RANGE;
        assert_eq!(renderer.sector_radius(), 1.0e6);
        renderer.own_ship = None;
        assert_eq!(renderer.sector_radius(), 3.0e6);
    }

    #[test]
    fn hull_state_is_exclusive() {
        let closed = ship(1, "A").board(0.5);
        let open = ship(1, "A").board(0.51);
        let (list, _) = render(EntityRef::Ship(&closed), None, DisplayOptions::empty());
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Polygon { .. })), 1);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Line { .. })), 0);
        let (list, _) = render(EntityRef::Ship(&open), None, DisplayOptions::empty());
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Polygon { .. })), 0);
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Line { .. })), 2);
    }

    #[test]
    fn missile_circle_ignores_board_state() {
        for board in [0.0, 0.5, 0.75, 1.0] {
            let s = ship(1, "A").board(board);
            let (list, _) = render(EntityRef::Ship(&s), None, DisplayOptions::empty());
            assert_eq!(ellipses(&list), 1, "board {board}");
        }
    }

    #[test]
    fn triangle_points_along_heading() {
        let s = ship(1, "A");
        let (list, _) = render(EntityRef::Ship(&s), None, DisplayOptions::empty());
        let tip = list.commands.iter().find_map(|c| match c {
            DrawCommand::Polygon { points, .. } => points.first().copied(),
            _ => None,
        });
        // scale/6 straight up: 16 px above centre.
        let tip = tip.unwrap_or_default();
        assert!((tip - Vec2::new(400.0, 284.0)).length() < 1e-3);
    }

    #[test]
    fn throat_pie_is_centred_on_screen_up() {
        // Heading 0 at rotation 0 points up, which is -90 degrees on screen.
        let start = pie_start_degrees(0.0, PI / 6.0, 0.0);
        assert!((start - (-105.0)).abs() < 1e-4);
        // Rotating the view along the heading keeps the wedge pointing up.
        let rotated = pie_start_degrees(1.0, PI / 6.0, 1.0);
        assert!((rotated - start).abs() < 1e-4);
    }

    #[test]
    fn missile_marker_uses_acceleration_direction() {
        let m = Missile {
            id: EntityId(9),
            nation: Nation::new("A"),
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            acceleration: Vector::new(0.0, 50.0),
        };
        let (list, _) = render(EntityRef::Missile(&m), None, DisplayOptions::empty());
        let lines: Vec<(Vec2, Vec2)> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert!((lines[0].0 - Vec2::new(400.0, 300.0)).length() < 1e-3);
        assert!((lines[0].1 - Vec2::new(400.0, 284.0)).length() < 1e-3);
        // Tail stroke is horizontal, a third of the marker length each side.
        assert!((lines[1].0.y - 300.0).abs() < 1e-3);
        assert!(((lines[1].0.x - lines[1].1.x).abs() - 32.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn curve_points_coalesce_per_pixel() {
        let pen = Pen::new(colors::BLACK);
        let near = Curve::with_points(pen, vec![Vector::ZERO, Vector::new(100.0, 0.0)]);
        let (list, _) = render(EntityRef::Curve(&near), None, DisplayOptions::empty());
        // Both points land on the same pixel: a diamond.
        let diamond = list.commands.iter().find_map(|c| match c {
            DrawCommand::Polygon { points, .. } => Some(points.clone()),
            _ => None,
        });
        assert_eq!(
            diamond,
            Some(vec![
                Vec2::new(400.0, 296.0),
                Vec2::new(404.0, 300.0),
                Vec2::new(400.0, 304.0),
                Vec2::new(396.0, 300.0),
            ])
        );

        let far = Curve::with_points(pen, vec![Vector::ZERO, Vector::new(1.0e6, 0.0)]);
        let (list, _) = render(EntityRef::Curve(&far), None, DisplayOptions::empty());
        assert_eq!(list.count(|c| matches!(c, DrawCommand::Polyline { .. })), 1);

        let empty = Curve::new(pen);
        let (list, stats) = render(EntityRef::Curve(&empty), None, DisplayOptions::empty());
        assert!(list.is_empty());
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn star_radius_has_a_floor() {
        let star = Star {
            id: EntityId(5),
            name: "Sol".into(),
            position: Vector::ZERO,
            radius: 1.0e3,
        };
        let (list, _) = render(EntityRef::Star(&star), None, DisplayOptions::empty());
        let bounds = list.commands.iter().find_map(|c| match c {
            DrawCommand::Ellipse { bounds, .. } => Some(*bounds),
            _ => None,
        });
        assert_eq!(bounds, Some(Rect::centered(Vec2::new(400.0, 300.0), Vec2::splat(3.0))));
    }

    #[test]
    fn offscreen_ship_is_fully_culled() {
        let s = ship(1, "A").at(Vector::new(1.0e9, 1.0e9));
        let (list, stats) = render(EntityRef::Ship(&s), None, DisplayOptions::empty());
        assert!(list.is_empty());
        assert!(stats.culled > 0);
        assert_eq!(stats.emitted, 0);
    }
}
