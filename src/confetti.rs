//! Confetti pieces for the end-of-round celebration.
//!
//! Each piece is a small coloured rectangle that falls from above the
//! viewport with a CSS animation. Randomness lives here; rendering only turns
//! a piece into an inline style string.

use rand::Rng;
use rand_distr::{Distribution, Normal};

const COLORS: [&str; 8] = [
    "#f44336", "#e91e63", "#9c27b0", "#3f51b5", "#03a9f4", "#4caf50", "#ffeb3b", "#ff9800",
];

/// Mean and spread of the fall time, in milliseconds.
const FALL_MEAN_MS: f64 = 3200.0;
const FALL_STD_DEV_MS: f64 = 600.0;
const FALL_MIN_MS: f64 = 1500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal start position, percent of viewport width.
    pub left_pct: f64,
    pub delay_ms: f64,
    pub fall_ms: f64,
    /// Sideways travel during the fall, in pixels.
    pub drift_px: f64,
    pub spin_deg: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub color: &'static str,
}

impl ConfettiPiece {
    pub fn style(&self) -> String {
        format!(
            "left:{:.2}%;width:{:.1}px;height:{:.1}px;background:{};\
             animation-delay:{:.0}ms;animation-duration:{:.0}ms;\
             --drift:{:.1}px;--spin:{:.0}deg;",
            self.left_pct,
            self.width_px,
            self.height_px,
            self.color,
            self.delay_ms,
            self.fall_ms,
            self.drift_px,
            self.spin_deg,
        )
    }
}

/// Build `count` pieces spread across a viewport `viewport_width` pixels wide.
///
/// Wider viewports get proportionally more sideways drift so the shower looks
/// the same on phones and desktops.
pub fn generate_pieces<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    viewport_width: f64,
) -> Vec<ConfettiPiece> {
    let fall = Normal::new(FALL_MEAN_MS, FALL_STD_DEV_MS).ok();
    let max_drift = (viewport_width * 0.15).max(20.0);

    (0..count)
        .map(|_| {
            let fall_ms = match &fall {
                Some(normal) => normal.sample(rng),
                None => FALL_MEAN_MS,
            }
            .max(FALL_MIN_MS);
            let width_px: f64 = rng.random_range(6.0..12.0);
            ConfettiPiece {
                left_pct: rng.random_range(0.0..100.0),
                delay_ms: rng.random_range(0.0..1200.0),
                fall_ms,
                drift_px: rng.random_range(-max_drift..=max_drift),
                spin_deg: rng.random_range(180.0..1080.0),
                width_px,
                height_px: width_px * rng.random_range(0.4_f64..0.8),
                color: COLORS[rng.random_range(0..COLORS.len())],
            }
        })
        .collect()
}
