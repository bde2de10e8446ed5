//! Live input state.
//!
//! The simulation never sees raw key events.  It asks an [`InputState`]
//! whether an [`Action`] is currently held; whatever the host last reported
//! wins (no queueing, no debouncing).

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    AimUp,
    AimDown,
    FireLeft,
    FireRight,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::AimUp,
        Action::AimDown,
        Action::FireLeft,
        Action::FireRight,
    ];
}

pub trait InputState {
    fn is_down(&self, action: Action) -> bool;
}

/// Pressed/released map fed by the host's key notifications.
#[derive(Clone, Debug, Default)]
pub struct KeysDown {
    pressed: HashMap<Action, bool>,
}

impl KeysDown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.pressed.insert(action, false);
    }
}

impl InputState for KeysDown {
    fn is_down(&self, action: Action) -> bool {
        self.pressed.get(&action).copied().unwrap_or(false)
    }
}

/// Input that never has anything held.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputState for NoInput {
    fn is_down(&self, _action: Action) -> bool {
        false
    }
}
