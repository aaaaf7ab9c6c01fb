//! Camera shake sources and the registry that blends them.
//!
//! A [`ShakeSource`] emits a coherent-noise offset shaped by a fade-in /
//! sustain / fade-out [`Envelope`] and attenuated by squared distance from
//! its origin. A [`ShakeRegistry`] owns the sources, advances the playing
//! ones once per tick and sums their contributions at any query point.
//!
//! ```
//! use glam::Vec3;
//! use quake::shake::{ShakeParams, ShakeRegistry};
//!
//! let mut registry = ShakeRegistry::with_seed(7);
//! let blast = registry
//!     .create(&ShakeParams::at(Vec3::new(0.0, 0.0, 2.0)).with_magnitude(0.3))?;
//!
//! registry.tick(1.0 / 60.0);
//! if registry.has_active_sources() {
//!     let offset = registry.sample_at(Vec3::ZERO);
//!     assert!(offset.length() <= 0.3);
//! }
//! registry.stop(blast);
//! # Ok::<(), quake::error::ShakeError>(())
//! ```

/// Shared coherent noise generator.
pub mod coherent;
/// Fade-in / sustain / fade-out phase boundaries.
pub mod envelope;
/// Dense swap-remove collection backing the active set.
pub mod packed;
/// Source construction options and validation.
pub mod params;
/// Source ownership, active set and per-frame aggregation.
pub mod registry;
/// Single shake emitter state machine.
pub mod source;

pub use coherent::ShakeNoise;
pub use envelope::Envelope;
pub use packed::PackedBuffer;
pub use params::ShakeParams;
pub use registry::{ShakeHandle, ShakeRegistry, DEFAULT_GROWTH_INCREMENT};
pub use source::ShakeSource;
