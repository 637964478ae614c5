use crate::config::{FALLBACK_VIEWPORT_WIDTH, MIN_DURATION_SECS};
use wasm_bindgen::JsValue;

/// Duration field error types for better error messages
#[derive(Debug, Clone, PartialEq)]
pub enum DurationError {
    EmptyInput,
    NotAWholeNumber(String),
    BelowMinimum { value: i64, min: u32 },
    TooLarge(i64),
}

impl std::fmt::Display for DurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationError::EmptyInput => write!(f, "Duration cannot be empty"),
            DurationError::NotAWholeNumber(raw) => {
                write!(f, "\"{}\" is not a whole number of seconds", raw)
            }
            DurationError::BelowMinimum { value, min } => {
                write!(f, "Duration must be at least {} (got {})", min, value)
            }
            DurationError::TooLarge(value) => write!(f, "Duration {} is too large", value),
        }
    }
}

impl std::error::Error for DurationError {}

/// Generic whole-number input validation with optional bounds.
pub fn validate_numeric_input(
    input: &str,
    min: Option<u32>,
    max: Option<u32>,
) -> Result<u32, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::EmptyInput);
    }

    // Parse wide first so negative input reports the bound, not a parse failure
    let wide: i64 = trimmed
        .parse()
        .map_err(|_| DurationError::NotAWholeNumber(trimmed.to_string()))?;

    if let Some(min_val) = min {
        if wide < i64::from(min_val) {
            return Err(DurationError::BelowMinimum {
                value: wide,
                min: min_val,
            });
        }
    }
    let value = u32::try_from(wide).map_err(|_| DurationError::TooLarge(wide))?;
    if let Some(max_val) = max {
        if value > max_val {
            return Err(DurationError::TooLarge(wide));
        }
    }
    Ok(value)
}

/// Validate the game duration field. No upper bound beyond what fits in `u32`.
pub fn validate_duration(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(MIN_DURATION_SECS), None).map_err(|e| e.to_string())
}

/// Current viewport width in CSS pixels.
pub fn viewport_width() -> f64 {
    gloo_utils::window()
        .inner_width()
        .ok()
        .as_ref()
        .and_then(JsValue::as_f64)
        .unwrap_or(FALLBACK_VIEWPORT_WIDTH)
}
