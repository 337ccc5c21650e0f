//! Pens and colours used for each visual channel.

use space_core::StyleSet;

use crate::canvas::{colors, Color, Pen};

/// Every style the display draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub paper: Color,
    pub border: Pen,
    pub grid: Pen,
    /// Curves and missile markers.
    pub signal: Pen,
    pub selection: Pen,
    pub star: Pen,
    pub star_names: Color,
    pub hulls: StyleSet<Pen>,
    pub missile_circles: StyleSet<Pen>,
    pub vulnerable_sectors: StyleSet<Pen>,
    pub ship_names: StyleSet<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paper: colors::WHITE,
            border: Pen::new(colors::BLACK),
            grid: Pen::new(colors::DARK_GRAY),
            signal: Pen::new(colors::BLACK),
            selection: Pen::new(colors::DARK_GREEN),
            star: Pen::new(colors::BLACK),
            star_names: colors::BLACK,
            hulls: StyleSet::new(Pen::new(colors::BLACK))
                .mine(Pen::new(colors::NAVY))
                .friendly(Pen::new(colors::NAVY))
                .hostile(Pen::new(colors::FIREBRICK)),
            missile_circles: StyleSet::new(Pen::new(colors::BLACK))
                .mine(Pen::new(colors::NAVY))
                .friendly(Pen::new(colors::DARK_GRAY))
                .hostile(Pen::new(colors::DARK_RED)),
            vulnerable_sectors: StyleSet::new(Pen::new(colors::BLACK))
                .mine(Pen::new(colors::FIREBRICK))
                .friendly(Pen::new(colors::DARK_GRAY))
                .hostile(Pen::new(colors::DARK_GRAY)),
            ship_names: StyleSet::new(colors::BLACK)
                .mine(colors::BLACK)
                .friendly(colors::NAVY)
                .hostile(colors::FIREBRICK),
        }
    }
}
