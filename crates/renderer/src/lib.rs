//! Tactical space grid display.
//!
//! Projects a [`space_core::Snapshot`] onto a device surface and emits the
//! resulting primitives through the [`Canvas`] trait. A recorded
//! [`DrawList`] can be flattened into `wgpu`-ready vertices with
//! [`Tessellator`].

pub mod canvas;
pub mod entities;
pub mod frame;
pub mod grid;
pub mod options;
pub mod palette;
pub mod vertex;
pub mod view;
pub mod visibility;

pub use canvas::*;
pub use entities::*;
pub use frame::*;
pub use grid::*;
pub use options::*;
pub use palette::*;
pub use vertex::*;
pub use view::*;
pub use visibility::*;
