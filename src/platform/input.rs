//! Input state recorded from host callbacks
//!
//! Callbacks only flip flags and store cursor coordinates. The tick never sees
//! this type directly: it receives a [`TickInput`] snapshot taken once per frame.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::camera::Look;
use crate::sim::math::map_to_range;
use crate::sim::ship::Thrust;
use crate::sim::tick::TickInput;

/// Window size in pixels, used to map the cursor to steering amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Map a cursor position to steering in `[-aspect, aspect]` on both axes.
    /// Left/top of the window maps to `+aspect`.
    pub fn steering(&self, cursor: (f32, f32)) -> Vec2 {
        let aspect = self.aspect();
        Vec2::new(
            map_to_range(cursor.0, 0.0, self.width, aspect, -aspect),
            map_to_range(cursor.1, 0.0, self.height, aspect, -aspect),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Something that can answer "what is held right now"
pub trait InputSource {
    fn is_key_pressed(&self, key: char) -> bool;
    fn mouse_position(&self) -> (f32, f32);
    fn is_left_held(&self) -> bool;
    fn is_right_held(&self) -> bool;

    /// Take the per-tick snapshot the simulation consumes
    fn snapshot(&self, viewport: Viewport) -> TickInput {
        let thrust = if self.is_key_pressed('w') {
            Thrust::Forward
        } else if self.is_key_pressed('s') {
            Thrust::Backward
        } else {
            Thrust::Idle
        };

        let mut roll = 0.0;
        if self.is_key_pressed('a') {
            roll -= 1.0;
        }
        if self.is_key_pressed('d') {
            roll += 1.0;
        }

        let look = if self.is_key_pressed('i') {
            Look::Above
        } else if self.is_key_pressed('m') {
            Look::Below
        } else if self.is_key_pressed('j') {
            Look::Left
        } else if self.is_key_pressed('l') {
            Look::Right
        } else if self.is_key_pressed('k') {
            Look::Behind
        } else {
            Look::Ahead
        };

        let steer = self
            .is_left_held()
            .then(|| viewport.steering(self.mouse_position()));

        TickInput {
            thrust,
            roll,
            fire: self.is_key_pressed(' '),
            reset: self.is_key_pressed('r'),
            look,
            steer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Plain flags mutated by host callbacks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<char>,
    mouse: (f32, f32),
    left_held: bool,
    right_held: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, key: char) {
        self.keys.insert(key.to_ascii_lowercase());
    }

    pub fn on_key_up(&mut self, key: char) {
        self.keys.remove(&key.to_ascii_lowercase());
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool, x: f32, y: f32) {
        match button {
            MouseButton::Left => self.left_held = pressed,
            MouseButton::Right => self.right_held = pressed,
            MouseButton::Middle => {}
        }
        self.mouse = (x, y);
    }

    /// Cursor moved (with or without a button held)
    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse = (x, y);
    }

    pub fn is_any_key_pressed(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Drop everything (focus lost)
    pub fn clear(&mut self) {
        self.keys.clear();
        self.left_held = false;
        self.right_held = false;
    }
}

impl InputSource for InputState {
    fn is_key_pressed(&self, key: char) -> bool {
        self.keys.contains(&key)
    }

    fn mouse_position(&self) -> (f32, f32) {
        self.mouse
    }

    fn is_left_held(&self) -> bool {
        self.left_held
    }

    fn is_right_held(&self) -> bool {
        self.right_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let mut input = InputState::new();
        input.on_key_down('W');
        input.on_key_down('d');
        input.on_key_down(' ');
        input.on_key_down('k');

        let tick = input.snapshot(Viewport::default());
        assert_eq!(tick.thrust, Thrust::Forward);
        assert_eq!(tick.roll, 1.0);
        assert!(tick.fire);
        assert!(!tick.reset);
        assert_eq!(tick.look, Look::Behind);
        assert!(tick.steer.is_none());

        input.on_key_up('w');
        input.on_key_down('s');
        input.on_key_down('a');
        let tick = input.snapshot(Viewport::default());
        assert_eq!(tick.thrust, Thrust::Backward);
        assert_eq!(tick.roll, 0.0);
    }

    #[test]
    fn test_forward_wins_over_backward() {
        let mut input = InputState::new();
        input.on_key_down('w');
        input.on_key_down('s');
        assert_eq!(input.snapshot(Viewport::default()).thrust, Thrust::Forward);
    }

    #[test]
    fn test_mouse_steering_only_while_held() {
        let viewport = Viewport::new(200.0, 100.0);
        let mut input = InputState::new();
        input.on_mouse_move(0.0, 100.0);
        assert!(input.snapshot(viewport).steer.is_none());

        input.on_mouse_button(MouseButton::Left, true, 0.0, 100.0);
        let steer = input.snapshot(viewport).steer.unwrap();
        // Left edge maps to +aspect, bottom edge to -aspect
        assert!((steer.x - 2.0).abs() < 1e-5);
        assert!((steer.y + 2.0).abs() < 1e-5);

        input.on_mouse_move(100.0, 50.0);
        let steer = input.snapshot(viewport).steer.unwrap();
        assert!(steer.length() < 1e-5);

        input.on_mouse_button(MouseButton::Left, false, 100.0, 50.0);
        assert!(input.snapshot(viewport).steer.is_none());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::new();
        input.on_key_down('w');
        input.on_mouse_button(MouseButton::Right, true, 1.0, 1.0);
        assert!(input.is_any_key_pressed());
        assert!(input.is_right_held());
        input.clear();
        assert!(!input.is_any_key_pressed());
        assert!(!input.is_right_held());
    }
}
