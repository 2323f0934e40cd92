//! Keyboard state
//!
//! Only press/release state matters: no repeat, no ordering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    KeyA,
    KeyD,
    KeyW,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            "a" | "A" => Some(Key::KeyA),
            "d" | "D" => Some(Key::KeyD),
            "w" | "W" => Some(Key::KeyW),
            _ => None,
        }
    }
}

/// Which physical keys trigger each logical action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub jump: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![Key::ArrowLeft],
            right: vec![Key::ArrowRight],
            jump: vec![Key::Space, Key::ArrowUp],
        }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: BTreeSet<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Drop everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_held(*k))
    }

    /// Logical actions for this frame
    pub fn to_tick_input(&self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            left: self.any_held(&bindings.left),
            right: self.any_held(&bindings.right),
            jump: self.any_held(&bindings.jump),
        }
    }
}
