//! Fade-in / sustain / fade-out amplitude envelope.

use super::params::ShakeParams;
use crate::error::ShakeError;

/// Phase boundaries of a shake.
///
/// Always satisfies `0 <= fade_in_time <= fade_out_time <= lifetime`;
/// the only constructor validates it and the fields are private.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    lifetime: f32,
    fade_in_time: f32,
    fade_out_time: f32,
}

impl Envelope {
    /// Build the envelope described by `params`.
    ///
    /// # Errors
    ///
    /// [`ShakeError::InvalidParameter`] if the params fail validation.
    pub fn from_params(params: &ShakeParams) -> Result<Self, ShakeError> {
        params.validate()?;
        Ok(Self {
            lifetime: params.lifetime,
            fade_in_time: params.resolved_fade_in_time(),
            fade_out_time: params.resolved_fade_out_time(),
        })
    }

    /// Total duration of one non-looping cycle.
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Phase at which fade-in ends and sustain begins.
    pub fn fade_in_time(&self) -> f32 {
        self.fade_in_time
    }

    /// Phase at which fade-out begins.
    pub fn fade_out_time(&self) -> f32 {
        self.fade_out_time
    }

    /// Amplitude multiplier in `[0, 1]` at `phase`.
    ///
    /// While looping the fade-out never applies; the sustain holds.
    pub fn level(&self, phase: f32, looping: bool) -> f32 {
        if phase < self.fade_in_time {
            // phase < fade_in_time implies fade_in_time > 0
            (phase / self.fade_in_time).max(0.0)
        } else if !looping && phase > self.fade_out_time {
            let width = self.fade_out_time - self.lifetime;
            if width == 0.0 {
                0.0
            } else {
                ((phase - self.lifetime) / width).clamp(0.0, 1.0)
            }
        } else {
            1.0
        }
    }

    /// Phase to resume at when looping is switched on at `phase`.
    ///
    /// A phase inside the fade-out window maps onto the matching point of
    /// the fade-in ramp so the amplitude is unchanged; earlier phases are
    /// kept as they are.
    pub fn loop_enable_phase(&self, phase: f32) -> f32 {
        if phase <= self.fade_out_time {
            return phase;
        }
        let width = self.fade_out_time - self.lifetime;
        if width == 0.0 {
            return 0.0;
        }
        let t = phase.min(self.lifetime);
        (t - self.lifetime) / width * self.fade_in_time
    }

    /// Phase to resume at when looping is switched off at `phase`.
    pub fn loop_disable_phase(&self, phase: f32) -> f32 {
        phase.min(self.fade_out_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Envelope {
        Envelope::from_params(&ShakeParams::default()).unwrap()
    }

    #[test]
    fn ramps_in_and_out() {
        let env = standard();
        assert_eq!(env.level(0.0, false), 0.0);
        assert!((env.level(0.1, false) - 0.4).abs() < 1e-6);
        assert_eq!(env.level(0.5, false), 1.0);
        assert!((env.level(0.9, false) - 0.4).abs() < 1e-6);
        assert_eq!(env.level(1.0, false), 0.0);
    }

    #[test]
    fn looping_holds_sustain() {
        let env = standard();
        assert_eq!(env.level(0.9, true), 1.0);
        assert!((env.level(0.1, true) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn zero_width_fades_do_not_divide_by_zero() {
        let env = Envelope::from_params(
            &ShakeParams::default().with_fade_times(0.0, 1.0),
        )
        .unwrap();
        assert_eq!(env.level(0.0, false), 1.0);
        assert_eq!(env.level(1.0, false), 1.0);
        assert_eq!(env.level(1.5, false), 0.0);
        assert_eq!(env.loop_enable_phase(1.5), 0.0);
    }

    #[test]
    fn loop_enable_mirrors_fade_out_onto_fade_in() {
        let env = standard();
        assert_eq!(env.loop_enable_phase(0.5), 0.5);
        assert!((env.loop_enable_phase(0.9) - 0.1).abs() < 1e-6);
        assert_eq!(env.loop_enable_phase(1.0), 0.0);
        // level is preserved across the remap
        let remapped = env.loop_enable_phase(0.8);
        assert!((env.level(remapped, true) - env.level(0.8, false)).abs() < 1e-5);
    }

    #[test]
    fn loop_disable_clamps_to_fade_out() {
        let env = standard();
        assert_eq!(env.loop_disable_phase(0.3), 0.3);
        assert_eq!(env.loop_disable_phase(5.0), 0.75);
    }

    #[test]
    fn rejects_invalid_params() {
        let params = ShakeParams::default().with_fade_times(0.9, 0.1);
        assert!(Envelope::from_params(&params).is_err());
    }
}
