use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ShakeError;

/// Fraction of the lifetime spent fading in when no fade is given.
pub const DEFAULT_FADE_IN_FRACTION: f32 = 0.25;
/// Fraction of the lifetime at which fade-out starts when no fade is given.
pub const DEFAULT_FADE_OUT_FRACTION: f32 = 0.75;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Shake", inline)]
#[serde(default)]
/// Construction options for a [`ShakeSource`](super::ShakeSource).
///
/// Every field has a default so one-shot shakes stay terse:
/// `ShakeParams::at(pos)` is a one second, unit magnitude shake that
/// fades in over the first quarter and out over the last quarter.
pub struct ShakeParams {
    /// World-space emission origin.
    #[schemars(with = "[f32; 3]")]
    pub position: Vec3,
    /// Per-axis multiplier applied to the raw noise.
    #[schemars(with = "[f32; 3]")]
    pub scale: Vec3,
    /// Peak displacement.
    #[schemars(title = "Magnitude", range(min = 0.0))]
    pub magnitude: f32,
    /// Noise traversal speed, roughly shakes per second.
    #[schemars(title = "Roughness", range(min = 0.0))]
    pub roughness: f32,
    /// Repeat the sustain period instead of finishing at `lifetime`.
    pub looping: bool,
    /// Duration of one non-looping cycle in seconds.
    #[schemars(title = "Lifetime", range(min = 0.0))]
    pub lifetime: f32,
    /// Phase at which fade-in ends. `None` means a quarter of the lifetime.
    pub fade_in_time: Option<f32>,
    /// Phase at which fade-out starts. `None` means three quarters of the
    /// lifetime.
    pub fade_out_time: Option<f32>,
    /// Register with the registry immediately on creation.
    pub auto_play: bool,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            magnitude: 1.0,
            roughness: 1.0,
            looping: false,
            lifetime: 1.0,
            fade_in_time: None,
            fade_out_time: None,
            auto_play: true,
        }
    }
}

impl ShakeParams {
    /// Default shake emitted from `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the peak displacement.
    #[must_use]
    pub fn with_magnitude(mut self, magnitude: f32) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Set the noise traversal speed.
    #[must_use]
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Enable or disable sustain looping.
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the per-axis noise scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Whether creation should also start playback.
    #[must_use]
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Set the lifetime and reset the fades to their proportional defaults.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self.fade_in_time = None;
        self.fade_out_time = None;
        self
    }

    /// Fade in over `fade` seconds and fade out over the final `fade`
    /// seconds of the lifetime.
    #[must_use]
    pub fn with_symmetric_fade(self, fade: f32) -> Self {
        self.with_fade_durations(fade, fade)
    }

    /// Fade in over `fade_in` seconds and out over the final `fade_out`
    /// seconds of the lifetime.
    #[must_use]
    pub fn with_fade_durations(mut self, fade_in: f32, fade_out: f32) -> Self {
        self.fade_in_time = Some(fade_in);
        self.fade_out_time = Some(self.lifetime - fade_out);
        self
    }

    /// Set the absolute phase boundaries of the envelope.
    #[must_use]
    pub fn with_fade_times(
        mut self,
        fade_in_time: f32,
        fade_out_time: f32,
    ) -> Self {
        self.fade_in_time = Some(fade_in_time);
        self.fade_out_time = Some(fade_out_time);
        self
    }

    /// Phase at which the fade-in ends.
    #[must_use]
    pub fn resolved_fade_in_time(&self) -> f32 {
        self.fade_in_time
            .unwrap_or(self.lifetime * DEFAULT_FADE_IN_FRACTION)
    }

    /// Phase at which the fade-out begins.
    #[must_use]
    pub fn resolved_fade_out_time(&self) -> f32 {
        self.fade_out_time
            .unwrap_or(self.lifetime * DEFAULT_FADE_OUT_FRACTION)
    }

    /// Check every range and ordering constraint.
    ///
    /// # Errors
    ///
    /// [`ShakeError::InvalidParameter`] naming the first violated field.
    pub fn validate(&self) -> Result<(), ShakeError> {
        validate_magnitude(self.magnitude)?;
        validate_roughness(self.roughness)?;
        validate_vec("position", self.position)?;
        validate_vec("scale", self.scale)?;
        non_negative("lifetime", self.lifetime)?;
        let fade_in = self.resolved_fade_in_time();
        let fade_out = self.resolved_fade_out_time();
        non_negative("fade_in_time", fade_in)?;
        non_negative("fade_out_time", fade_out)?;
        if fade_in > fade_out {
            return Err(ShakeError::invalid(
                "fade_in_time",
                fade_in,
                "must not exceed fade_out_time",
            ));
        }
        if fade_out > self.lifetime {
            return Err(ShakeError::invalid(
                "fade_out_time",
                fade_out,
                "must not exceed lifetime",
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_magnitude(value: f32) -> Result<(), ShakeError> {
    non_negative("magnitude", value)
}

pub(crate) fn validate_roughness(value: f32) -> Result<(), ShakeError> {
    non_negative("roughness", value)
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ShakeError> {
    if !value.is_finite() {
        return Err(ShakeError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(ShakeError::invalid(name, value, "must be >= 0"));
    }
    Ok(())
}

fn validate_vec(name: &'static str, value: Vec3) -> Result<(), ShakeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShakeError::invalid(name, f32::NAN, "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scale_fades_with_lifetime() {
        let params = ShakeParams::default().with_lifetime(2.0);
        assert_eq!(params.resolved_fade_in_time(), 0.5);
        assert_eq!(params.resolved_fade_out_time(), 1.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn fade_durations_count_back_from_lifetime() {
        let params = ShakeParams::default()
            .with_lifetime(4.0)
            .with_fade_durations(1.0, 0.5);
        assert_eq!(params.resolved_fade_in_time(), 1.0);
        assert_eq!(params.resolved_fade_out_time(), 3.5);

        let symmetric = ShakeParams::default()
            .with_lifetime(4.0)
            .with_symmetric_fade(1.0);
        assert_eq!(symmetric.resolved_fade_out_time(), 3.0);
    }

    #[test]
    fn rejects_negative_values() {
        let cases = [
            ("magnitude", ShakeParams::default().with_magnitude(-1.0)),
            ("roughness", ShakeParams::default().with_roughness(-0.1)),
            ("lifetime", ShakeParams::default().with_lifetime(-1.0)),
            (
                "fade_in_time",
                ShakeParams::default().with_fade_times(-0.1, 0.5),
            ),
            (
                "fade_out_time",
                ShakeParams::default().with_fade_times(0.0, -0.5),
            ),
        ];
        for (name, params) in cases {
            let err = params.validate().unwrap_err();
            assert!(err.is_invalid(name), "expected {name}, got {err}");
        }
    }

    #[test]
    fn rejects_misordered_fades() {
        let err = ShakeParams::default()
            .with_fade_times(0.8, 0.5)
            .validate()
            .unwrap_err();
        assert!(err.is_invalid("fade_in_time"));

        let err = ShakeParams::default()
            .with_fade_times(0.2, 1.5)
            .validate()
            .unwrap_err();
        assert!(err.is_invalid("fade_out_time"));
    }

    #[test]
    fn rejects_non_finite() {
        let err = ShakeParams::default()
            .with_magnitude(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(err.is_invalid("magnitude"));

        let err = ShakeParams::default()
            .with_scale(Vec3::new(1.0, f32::INFINITY, 1.0))
            .validate()
            .unwrap_err();
        assert!(err.is_invalid("scale"));
    }

    #[test]
    fn zero_length_envelope_is_valid() {
        let params = ShakeParams::default().with_lifetime(0.0);
        assert!(params.validate().is_ok());
    }
}
