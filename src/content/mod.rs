//! Content domain: data-driven tuning loaded from `assets/data`.

mod loader;
mod validation;


pub use loader::{ContentLoadError, MOVEMENT_FILE, load_movement_tuning, parse_single};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementTuning;

pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // Inserted at build time so Startup systems can spawn from it.
        app.insert_resource(load_tuning_or_default(Path::new(DATA_DIR)));
    }
}

/// Load and validate the tuning, falling back to defaults on any problem.
pub fn load_tuning_or_default(base_path: &Path) -> MovementTuning {
    let tuning = match load_movement_tuning(base_path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            return MovementTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if errors.is_empty() {
        info!(
            "Loaded movement tuning from {}: move_speed={}, dash_speed={}, dash_number={}",
            base_path.join(MOVEMENT_FILE).display(),
            tuning.move_speed,
            tuning.dash_speed,
            tuning.dash_number
        );
        return tuning;
    }

    for error in &errors {
        error!("Tuning validation: {}", error);
    }
    warn!(
        "{} tuning validation error(s); using default movement tuning",
        errors.len()
    );
    MovementTuning::default()
}
