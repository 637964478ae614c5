//! Application-level configuration constants.

// Timers
pub const TICK_INTERVAL_MS: u32 = 10;

// Duration field
pub const MIN_DURATION_SECS: u32 = 1;

// Confetti
pub const CONFETTI_PIECES: usize = 150;
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1024.0;
