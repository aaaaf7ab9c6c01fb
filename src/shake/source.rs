//! A single emitter of time-varying, distance-attenuated shake.

use glam::Vec3;

use super::coherent;
use super::envelope::Envelope;
use super::params::{validate_magnitude, validate_roughness, ShakeParams};
use crate::error::ShakeError;

/// Emitter of a noise offset shaped by an [`Envelope`].
///
/// Playback state (`play`/`pause`/`stop`/`advance`) is driven through a
/// [`ShakeRegistry`](super::ShakeRegistry) so active-set membership always
/// follows [`ShakeSource::is_playing`]. Everything else, including the
/// validated property setters, is available on the source directly.
#[derive(Debug, Clone)]
pub struct ShakeSource {
    magnitude: f32,
    roughness: f32,
    /// World-space emission origin.
    pub position: Vec3,
    scale: Vec3,
    envelope: Envelope,
    seed: f32,
    phase: f32,
    loop_offset: f32,
    looping: bool,
    active: bool,
    /// Unattenuated offset from the last refresh.
    last_sample: Vec3,
    /// Set when the phase (or anything feeding the sample) changed.
    dirty: bool,
}

impl ShakeSource {
    /// Validate `params` and build a source with the given noise seed.
    ///
    /// The source starts active when `params.auto_play` is set; hand it to
    /// [`ShakeRegistry::insert`](super::ShakeRegistry::insert) to register
    /// it.
    ///
    /// # Errors
    ///
    /// [`ShakeError::InvalidParameter`] for negative magnitude, roughness,
    /// lifetime or fade times, or fades out of order.
    pub fn new(params: &ShakeParams, seed: f32) -> Result<Self, ShakeError> {
        let envelope = Envelope::from_params(params)?;
        Ok(Self {
            magnitude: params.magnitude,
            roughness: params.roughness,
            position: params.position,
            scale: params.scale,
            envelope,
            seed,
            phase: 0.0,
            loop_offset: 0.0,
            looping: params.looping,
            active: params.auto_play,
            last_sample: Vec3::ZERO,
            dirty: true,
        })
    }

    // -- Properties --

    /// Peak displacement.
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Set the peak displacement.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite values, leaving the source unchanged.
    pub fn set_magnitude(&mut self, magnitude: f32) -> Result<(), ShakeError> {
        validate_magnitude(magnitude)?;
        self.magnitude = magnitude;
        self.dirty = true;
        Ok(())
    }

    /// Noise traversal speed.
    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    /// Set the noise traversal speed.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite values, leaving the source unchanged.
    pub fn set_roughness(&mut self, roughness: f32) -> Result<(), ShakeError> {
        validate_roughness(roughness)?;
        self.roughness = roughness;
        self.dirty = true;
        Ok(())
    }

    /// Per-axis noise multiplier.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the per-axis noise multiplier.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Phase boundaries.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Duration of one non-looping cycle.
    pub fn lifetime(&self) -> f32 {
        self.envelope.lifetime()
    }

    /// Phase at which fade-in ends.
    pub fn fade_in_time(&self) -> f32 {
        self.envelope.fade_in_time()
    }

    /// Phase at which fade-out starts.
    pub fn fade_out_time(&self) -> f32 {
        self.envelope.fade_out_time()
    }

    /// Noise decorrelation seed.
    pub fn seed(&self) -> f32 {
        self.seed
    }

    /// Elapsed active time since the last reset.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Accumulated phase correction from loop toggles.
    pub fn loop_offset(&self) -> f32 {
        self.loop_offset
    }

    /// Whether the sustain period repeats.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Whether the source is advancing and contributing.
    pub fn is_playing(&self) -> bool {
        self.active
    }

    /// Whether a non-looping source has run its full lifetime.
    pub fn is_complete(&self) -> bool {
        !self.looping && self.phase >= self.envelope.lifetime()
    }

    // -- Loop control --

    /// Switch sustain looping on or off.
    ///
    /// The phase is remapped so the envelope level carries over, and the
    /// jump is folded into the loop offset so the noise argument does not
    /// move.
    pub fn set_loop(&mut self, looping: bool) {
        if looping == self.looping {
            return;
        }
        self.looping = looping;
        let phase = if looping {
            self.envelope.loop_enable_phase(self.phase)
        } else {
            self.envelope.loop_disable_phase(self.phase)
        };
        self.loop_offset += self.phase - phase;
        self.phase = phase;
        self.dirty = true;
    }

    // -- Playback, driven by the registry --

    /// Start or resume. A completed shake restarts from zero.
    pub(crate) fn play(&mut self) {
        if self.active {
            return;
        }
        if self.is_complete() {
            self.phase = 0.0;
        }
        self.active = true;
        self.dirty = true;
        log::trace!("shake play at phase {}", self.phase);
    }

    /// Stop advancing, keeping the phase.
    pub(crate) fn pause(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        log::trace!("shake paused at phase {}", self.phase);
    }

    /// Jump to the end of the lifetime and clear the cached sample.
    pub(crate) fn stop(&mut self) {
        self.phase = self.envelope.lifetime();
        self.active = false;
        self.last_sample = Vec3::ZERO;
        self.dirty = false;
        log::trace!("shake stopped");
    }

    /// Advance the phase by `dt` seconds.
    pub(crate) fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.phase += dt;
        self.dirty = true;
        if !self.looping && self.phase > self.envelope.lifetime() {
            self.stop();
        }
    }

    // -- Sampling --

    /// Amplitude at the current phase: magnitude times envelope level.
    pub fn envelope_scale(&self) -> f32 {
        self.magnitude * self.envelope.level(self.phase, self.looping)
    }

    /// Coordinate along the noise field at the current phase.
    pub fn noise_argument(&self) -> f32 {
        self.roughness * (self.phase + self.loop_offset)
    }

    /// Offset at the source itself, before distance falloff.
    ///
    /// Recomputed only when something changed since the last call.
    pub fn unattenuated(&mut self) -> Vec3 {
        if self.dirty {
            let raw = coherent::shared().axes(self.noise_argument(), self.seed);
            self.last_sample = self.envelope_scale() * self.scale * raw;
            self.dirty = false;
        }
        self.last_sample
    }

    /// Contribution of this source at `point`.
    ///
    /// Falls off with the squared distance, floored at one so points
    /// within a unit of the source get the full offset.
    pub fn sample_at(&mut self, point: Vec3) -> Vec3 {
        let offset = self.unattenuated();
        offset / point.distance_squared(self.position).max(1.0)
    }
}
