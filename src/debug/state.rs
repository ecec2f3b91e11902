//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether debug UI is visible
    pub ui_visible: bool,
    /// Whether to show the controller overlay (mode, velocity, stamina, etc.)
    pub show_info: bool,
    /// Keep stamina and dashes topped up every tick
    pub infinite_stamina: bool,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// Actions that can be triggered from the debug panel or a hotkey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    ToggleInfo,
    ToggleInfiniteStamina,
    RefillDashes,
    Kill,
    ReloadTuning,
    Snapshot,
}
