//! Movement domain: edge-aware button states shared between the two update rates.

use bevy::prelude::*;

/// Per-button state. `Down` and `Up` last exactly one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ButtonState {
    #[default]
    Off,
    Held,
    Up,
    Down,
}

impl ButtonState {
    /// Fold a raw sample (`Held` or `Off`) into the previous resolved state.
    pub fn resolve(raw: ButtonState, previous: ButtonState) -> ButtonState {
        match (raw, previous) {
            (ButtonState::Held | ButtonState::Down, ButtonState::Down | ButtonState::Held) => {
                ButtonState::Held
            }
            (ButtonState::Held | ButtonState::Down, _) => ButtonState::Down,
            (_, ButtonState::Up | ButtonState::Off) => ButtonState::Off,
            (_, _) => ButtonState::Up,
        }
    }

    pub fn just_pressed(self) -> bool {
        self == ButtonState::Down
    }

    pub fn just_released(self) -> bool {
        self == ButtonState::Up
    }

    /// `Down` or `Held`.
    pub fn is_pressed(self) -> bool {
        matches!(self, ButtonState::Down | ButtonState::Held)
    }
}

/// Logical buttons the controller reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Jump,
    Dash,
    Grab,
}

impl ControlButton {
    fn index(self) -> usize {
        match self {
            ControlButton::Jump => 0,
            ControlButton::Dash => 1,
            ControlButton::Grab => 2,
        }
    }
}

/// Input resolved for one fixed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub axis: Vec2,
    pub jump: ButtonState,
    pub dash: ButtonState,
    pub grab: ButtonState,
}

/// Two-phase input sampler.
///
/// The variable-rate phase calls [`InputSampler::poll`] every frame; the
/// fixed-rate phase calls [`InputSampler::resolve`] once per tick. A press
/// observed in any frame since the last resolve is latched, so a tap shorter
/// than one fixed tick still produces a `Down` pulse.
#[derive(Component, Debug, Default, Clone)]
pub struct InputSampler {
    axis: Vec2,
    sampled: [ButtonState; 3],
    latched: [bool; 3],
    resolved: [ButtonState; 3],
}

impl InputSampler {
    /// Record the raw state of a button for this frame.
    pub fn poll(&mut self, button: ControlButton, held: bool) {
        let i = button.index();
        self.sampled[i] = if held {
            ButtonState::Held
        } else {
            ButtonState::Off
        };
        self.latched[i] |= held;
    }

    /// Record the directional input; each component is clamped to [-1, 1].
    pub fn poll_axis(&mut self, axis: Vec2) {
        self.axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Advance the resolved states by one fixed tick.
    pub fn resolve(&mut self) -> TickInput {
        for i in 0..3 {
            let previous = self.resolved[i];
            // A tap released before this tick still has to register as a press
            // when the previous tick saw the button up.
            let raw = if self.latched[i] && !previous.is_pressed() {
                ButtonState::Held
            } else {
                self.sampled[i]
            };
            self.resolved[i] = ButtonState::resolve(raw, previous);
            self.latched[i] = false;
        }
        self.current()
    }

    /// The input resolved by the most recent tick.
    pub fn current(&self) -> TickInput {
        TickInput {
            axis: self.axis,
            jump: self.resolved[ControlButton::Jump.index()],
            dash: self.resolved[ControlButton::Dash.index()],
            grab: self.resolved[ControlButton::Grab.index()],
        }
    }

    pub fn state(&self, button: ControlButton) -> ButtonState {
        self.resolved[button.index()]
    }
}
