//! Logical actions and their held state.
//!
//! Raw key codes never reach game code: [`ActionState`] folds queued
//! [`InputEvent`]s through [`KeyBindings`] once per tick and answers
//! "is this action held?".

use std::collections::HashMap;

use crate::api::collab::ActionSource;

use super::queue::InputEvent;

/// A logical input the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Attack,
    Restart,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Attack,
        Action::Restart,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Numeric code used by the host's on-screen buttons.
    pub fn from_code(code: u32) -> Option<Action> {
        Action::ALL.get(code as usize).copied()
    }
}

/// DOM `keyCode` values for the default layout.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const F: u32 = 70;
    pub const R: u32 = 82;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// Key code → action table. Several keys may map to one action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<u32, Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn bind(&mut self, key_code: u32, action: Action) {
        self.map.insert(key_code, action);
    }

    pub fn action_for(&self, key_code: u32) -> Option<Action> {
        self.map.get(&key_code).copied()
    }
}

impl Default for KeyBindings {
    /// WASD + arrows, Space to jump, F to attack, R to restart.
    fn default() -> Self {
        let mut b = Self::empty();
        b.bind(keys::W, Action::Forward);
        b.bind(keys::ARROW_UP, Action::Forward);
        b.bind(keys::S, Action::Back);
        b.bind(keys::ARROW_DOWN, Action::Back);
        b.bind(keys::A, Action::Left);
        b.bind(keys::ARROW_LEFT, Action::Left);
        b.bind(keys::D, Action::Right);
        b.bind(keys::ARROW_RIGHT, Action::Right);
        b.bind(keys::SPACE, Action::Jump);
        b.bind(keys::F, Action::Attack);
        b.bind(keys::R, Action::Restart);
        b
    }
}

/// Per-action held flags, sampled once per tick.
///
/// Each source (a key or an on-screen button) is tracked separately, so
/// releasing one of two keys bound to the same action keeps it held.
#[derive(Debug, Clone)]
pub struct ActionState {
    bindings: KeyBindings,
    held_keys: HashMap<u32, Action>,
    buttons: [bool; Action::ALL.len()],
    held: [bool; Action::ALL.len()],
    previous: [bool; Action::ALL.len()],
}

impl ActionState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held_keys: HashMap::new(),
            buttons: [false; Action::ALL.len()],
            held: [false; Action::ALL.len()],
            previous: [false; Action::ALL.len()],
        }
    }

    /// Fold this frame's events into the held state. Call once per tick,
    /// before the game reads any action.
    pub fn sample(&mut self, events: &[InputEvent]) {
        self.previous = self.held;

        for event in events {
            match *event {
                InputEvent::KeyDown { key_code } => {
                    if let Some(action) = self.bindings.action_for(key_code) {
                        self.held_keys.insert(key_code, action);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.held_keys.remove(&key_code);
                }
                InputEvent::ActionDown(action) => self.buttons[action.index()] = true,
                InputEvent::ActionUp(action) => self.buttons[action.index()] = false,
                InputEvent::FocusLost => self.release_all(),
            }
        }

        self.held = self.buttons;
        for action in self.held_keys.values() {
            self.held[action.index()] = true;
        }
    }

    /// Forget every held key and button.
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        self.buttons = [false; Action::ALL.len()];
        self.held = [false; Action::ALL.len()];
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Held now but not on the previous sample.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.held[action.index()] && !self.previous[action.index()]
    }

    /// Horizontal steering axes in [-1, 1]: (right - left, back - forward).
    pub fn move_axes(&self) -> (f32, f32) {
        let axis = |pos: Action, neg: Action| {
            (self.is_held(pos) as i32 - self.is_held(neg) as i32) as f32
        };
        (axis(Action::Right, Action::Left), axis(Action::Back, Action::Forward))
    }
}

impl Default for ActionState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl ActionSource for ActionState {
    fn held(&self, action: Action) -> bool {
        self.is_held(action)
    }

    fn pressed(&self, action: Action) -> bool {
        self.just_pressed(action)
    }
}
