//! Pointer and keyboard handling for the space grid display.

pub mod selection;

pub use selection::*;

use glam::Vec2;
use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,

    /// Cursor position in window coordinates.
    cursor_position: Vec2,
    /// Cursor positions of left clicks this frame, oldest first.
    clicks: Vec<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.clicks.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event. A left press records a click at the
    /// current cursor position.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                    if button == MouseButton::Left {
                        self.clicks.push(self.cursor_position);
                    }
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.cursor_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Left clicks received this frame.
    pub fn clicks(&self) -> &[Vec2] {
        &self.clicks
    }

    /// `+`/`=` (or keypad plus) pressed this frame.
    pub fn is_zoom_in_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Equal) || self.is_key_pressed(KeyCode::NumpadAdd)
    }

    /// `-`/`_` (or keypad minus) pressed this frame.
    pub fn is_zoom_out_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Minus) || self.is_key_pressed(KeyCode::NumpadSubtract)
    }

    /// Net zoom steps this frame: positive zooms in.
    pub fn zoom_steps(&self) -> i32 {
        i32::from(self.is_zoom_in_pressed()) - i32::from(self.is_zoom_out_pressed())
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
