//! Input state fed by the host.
//!
//! The host records key and button transitions plus raw mouse motion;
//! the player controller reads the held sets every frame and consumes the
//! accumulated deltas exactly once.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the player controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sprint,
    Dash,
}

/// Mouse buttons the player controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Attack.
    Primary,
    /// Block.
    Secondary,
}

/// Current input snapshot plus consume-once deltas.
#[derive(Debug, Clone)]
pub struct InputState {
    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,
    mouse_delta: Vec2,
    wheel_delta: f32,
    attached: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            wheel_delta: 0.0,
            attached: true,
        }
    }
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        if self.attached {
            self.keys_down.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        if self.attached {
            self.buttons_down.insert(button);
        }
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.buttons_down.remove(&button);
    }

    /// Accumulate raw mouse motion (pixels).
    pub fn add_mouse_delta(&mut self, delta: Vec2) {
        if self.attached {
            self.mouse_delta += delta;
        }
    }

    /// Accumulate wheel motion (positive zooms out).
    pub fn add_wheel_delta(&mut self, delta: f32) {
        if self.attached {
            self.wheel_delta += delta;
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Mouse motion since the last call; resets the accumulator.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Wheel motion since the last call; resets the accumulator.
    pub fn take_wheel_delta(&mut self) -> f32 {
        std::mem::take(&mut self.wheel_delta)
    }

    /// Drop all held input and ignore further events.
    pub fn detach(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
        self.mouse_delta = Vec2::ZERO;
        self.wheel_delta = 0.0;
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
