//! Validation for loaded tuning values.

use crate::movement::{MovementTuning, SQUISH_QUANTUM};

/// A validation error naming the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MovementTuning field '{}' {}", self.field, self.message)
    }
}

/// Helper macro for checking a value is strictly positive
macro_rules! check_positive {
    ($errors:expr, $tuning:expr, $field:ident) => {
        if !($tuning.$field > 0.0) {
            $errors.push(ValidationError {
                field: stringify!($field),
                message: format!("must be positive, got {}", $tuning.$field),
            });
        }
    };
}

/// Validate a tuning set.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(errors, tuning, move_speed);
    check_positive!(errors, tuning, jump_force);
    check_positive!(errors, tuning, max_vertical_speed);
    check_positive!(errors, tuning, dash_speed);
    check_positive!(errors, tuning, max_stamina);
    check_positive!(errors, tuning, climb_speed);

    if tuning.gravity_scale < 0.0 {
        errors.push(ValidationError {
            field: "gravity_scale",
            message: format!("must not be negative, got {}", tuning.gravity_scale),
        });
    }

    if tuning.wave_dash_factor < 0.0 {
        errors.push(ValidationError {
            field: "wave_dash_factor",
            message: format!("must not be negative, got {}", tuning.wave_dash_factor),
        });
    }

    if tuning.dash_number == 0 {
        errors.push(ValidationError {
            field: "dash_number",
            message: "must allow at least one dash".to_string(),
        });
    }

    if tuning.dash_duration == 0 {
        errors.push(ValidationError {
            field: "dash_duration",
            message: "must last at least one tick".to_string(),
        });
    }

    // The squish limit is the size minus two quanta; anything smaller can never be compressed.
    let min_size = 2.0 * SQUISH_QUANTUM;
    for (field, value) in [
        ("hitbox_width", tuning.hitbox_width),
        ("hitbox_height", tuning.hitbox_height),
    ] {
        if !(value > min_size) {
            errors.push(ValidationError {
                field,
                message: format!("must be larger than {}, got {}", min_size, value),
            });
        }
    }

    errors
}
