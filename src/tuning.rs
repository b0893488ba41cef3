//! Data-driven game balance
//!
//! Every gameplay constant lives here so a round can be rebalanced without a
//! rebuild. Defaults are the shipped values; overrides come from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    /// Distance from the bottom of the viewport to the basket's top edge
    pub basket_bottom_offset: f32,
    pub basket_corner_radius: f32,

    // === Session ===
    pub start_lives: u8,

    // === Spawner ===
    pub initial_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    /// Interval shaved off the target per point scored
    pub spawn_interval_per_point_ms: f32,
    /// Fraction of the remaining gap closed each frame (first-order lag)
    pub spawn_interval_lag: f32,
    pub initial_item_speed: f32,
    pub item_speed_per_point: f32,
    pub max_item_speed_bonus: f32,
    /// Per-item random speed added on top of the base speed, in [0, jitter)
    pub item_speed_jitter: f32,
    pub item_size_min: f32,
    pub item_size_range: f32,
    /// Spin is drawn from [-max, max) radians per frame
    pub item_spin_max: f32,
    /// Items start this far above the top edge (plus their own size)
    pub spawn_height_offset: f32,
    /// Probability that a spawn is a hazard
    pub hazard_chance: f32,

    // === Physics ===
    /// Flat speed addend applied to every falling item (px/s)
    pub gravity: f32,
    /// Extra catch depth below the basket's bottom edge
    pub catch_tolerance: f32,
    /// Items are discarded once their top passes viewport height + margin
    pub despawn_margin: f32,

    // === Input ===
    pub tilt_smoothing: f32,
    pub tilt_range_deg: f32,
    pub max_tilt_speed: f32,
    pub key_speed: f32,

    // === Feedback ===
    pub flash_duration_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            basket_width: 110.0,
            basket_height: 24.0,
            basket_bottom_offset: 64.0,
            basket_corner_radius: 8.0,

            start_lives: 3,

            initial_spawn_interval_ms: 1200.0,
            min_spawn_interval_ms: 420.0,
            spawn_interval_per_point_ms: 6.0,
            spawn_interval_lag: 0.02,
            initial_item_speed: 160.0,
            item_speed_per_point: 3.0,
            max_item_speed_bonus: 360.0,
            item_speed_jitter: 80.0,
            item_size_min: 26.0,
            item_size_range: 10.0,
            item_spin_max: 0.05,
            spawn_height_offset: 10.0,
            hazard_chance: 0.3,

            gravity: 10.0,
            catch_tolerance: 6.0,
            despawn_margin: 60.0,

            tilt_smoothing: 0.12,
            tilt_range_deg: 30.0,
            max_tilt_speed: 520.0,
            key_speed: 420.0,

            flash_duration_ms: 220.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load an override, falling back to defaults when it is absent or bad
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {e}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let floats = [
            ("basket_width", self.basket_width),
            ("basket_height", self.basket_height),
            ("basket_bottom_offset", self.basket_bottom_offset),
            ("basket_corner_radius", self.basket_corner_radius),
            ("initial_spawn_interval_ms", self.initial_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("spawn_interval_per_point_ms", self.spawn_interval_per_point_ms),
            ("spawn_interval_lag", self.spawn_interval_lag),
            ("initial_item_speed", self.initial_item_speed),
            ("item_speed_per_point", self.item_speed_per_point),
            ("max_item_speed_bonus", self.max_item_speed_bonus),
            ("item_speed_jitter", self.item_speed_jitter),
            ("item_size_min", self.item_size_min),
            ("item_size_range", self.item_size_range),
            ("item_spin_max", self.item_spin_max),
            ("spawn_height_offset", self.spawn_height_offset),
            ("hazard_chance", self.hazard_chance),
            ("gravity", self.gravity),
            ("catch_tolerance", self.catch_tolerance),
            ("despawn_margin", self.despawn_margin),
            ("tilt_smoothing", self.tilt_smoothing),
            ("tilt_range_deg", self.tilt_range_deg),
            ("max_tilt_speed", self.max_tilt_speed),
            ("key_speed", self.key_speed),
            ("flash_duration_ms", self.flash_duration_ms),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        let positive = [
            ("basket_width", self.basket_width),
            ("basket_height", self.basket_height),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("item_size_min", self.item_size_min),
            ("item_size_range", self.item_size_range),
            ("item_speed_jitter", self.item_speed_jitter),
            ("tilt_range_deg", self.tilt_range_deg),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        if self.hazard_chance > 1.0 {
            return Err(TuningError::Invalid {
                field: "hazard_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.spawn_interval_lag > 1.0 {
            return Err(TuningError::Invalid {
                field: "spawn_interval_lag",
                reason: "must be in [0, 1]",
            });
        }
        if self.tilt_smoothing <= 0.0 || self.tilt_smoothing > 1.0 {
            return Err(TuningError::Invalid {
                field: "tilt_smoothing",
                reason: "must be in (0, 1]",
            });
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval_ms",
                reason: "must not exceed initial_spawn_interval_ms",
            });
        }
        if self.start_lives == 0 {
            return Err(TuningError::Invalid {
                field: "start_lives",
                reason: "must be at least 1",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "hazard_chance": 0.5, "key_speed": 300 }"#).unwrap();
        assert_eq!(tuning.hazard_chance, 0.5);
        assert_eq!(tuning.key_speed, 300.0);
        assert_eq!(tuning.basket_width, 110.0);
        assert_eq!(tuning.start_lives, 3);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "hazard_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "hazard_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_intervals() {
        let err = Tuning::from_json(r#"{ "min_spawn_interval_ms": 2000 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "min_spawn_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_ranges() {
        for (json, field) in [
            (r#"{ "item_size_range": 0 }"#, "item_size_range"),
            (r#"{ "item_speed_jitter": 0 }"#, "item_speed_jitter"),
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(
                matches!(err, TuningError::Invalid { field: f, .. } if f == field),
                "{json} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_override_falls_back_to_default() {
        let tuning = Tuning::from_json_or_default(Some(r#"{ "tilt_smoothing": 0 }"#));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
    }
}
