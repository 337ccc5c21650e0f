//! Core types for the space grid display.
//!
//! This crate provides the vocabulary shared by the display crates:
//! - World vectors and heading math
//! - Entities, catalog and snapshots
//! - Classification against the own ship and style tables
//! - The world ↔ device projection

pub mod catalog;
pub mod classification;
pub mod components;
pub mod error;
pub mod snapshot;
pub mod transform;
pub mod vector;

pub use catalog::*;
pub use classification::*;
pub use components::*;
pub use error::*;
pub use snapshot::*;
pub use transform::*;
pub use vector::*;

// Re-export commonly used types
pub use glam::{DVec2, Vec2};
