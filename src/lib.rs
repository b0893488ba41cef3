//! Tilt Catch - catch falling apples, dodge the bombs
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input shaping, spawning, physics, session phases)
//! - `renderer`: Procedural 2D drawing, tessellation and the WebGPU pipeline
//! - `platform`: HUD sinks and browser glue
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Frame timing constants
pub mod consts {
    /// Largest simulation step a single frame may take (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Step used when the frame delta is missing or unusable (seconds)
    pub const FALLBACK_FRAME_DT: f32 = 0.016;
    /// Backing store is never scaled beyond this device pixel ratio
    pub const MAX_PIXEL_RATIO: f64 = 2.0;
}

/// Clamp `value` into `[min, max]`, pinning to `min` when the span is empty
///
/// Unlike `f32::clamp` this never panics when the viewport is narrower than
/// the thing being clamped.
#[inline]
pub fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Build an RGBA color from a `0xRRGGBB` literal
pub const fn hex_color(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex_color(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_span(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_span(12.0, 0.0, 10.0), 10.0);
        // Empty span pins to the lower bound
        assert_eq!(clamp_span(4.0, 0.0, -20.0), 0.0);
    }
}
