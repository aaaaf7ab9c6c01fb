//! Owner of every shake source and the dense set of active ones.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::coherent::SEED_RANGE;
use super::packed::PackedBuffer;
use super::params::ShakeParams;
use super::source::ShakeSource;
use crate::error::ShakeError;
use crate::options::RegistryOptions;

/// Default growth/shrink step of the active set.
pub const DEFAULT_GROWTH_INCREMENT: usize = 16;

/// Stable reference to a source held by a [`ShakeRegistry`].
///
/// Handles are cheap to copy. Once the source is released its slot is
/// reused under a new generation, so old handles resolve to nothing
/// instead of aliasing the new source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShakeHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    source: Option<ShakeSource>,
}

/// Collection of shake sources that advances and blends them.
///
/// Call [`tick`](Self::tick) once per simulation step, then
/// [`sample_at`](Self::sample_at) as many times as needed for that step.
/// Sources reuse their cached noise across queries within a step.
///
/// The registry is plain data; all mutation goes through `&mut self`.
/// Hosts sharing it across threads should wrap it in a `Mutex`.
#[derive(Debug)]
pub struct ShakeRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    active: PackedBuffer<ShakeHandle>,
    rng: StdRng,
}

impl Default for ShakeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakeRegistry {
    /// Empty registry with randomly drawn source seeds.
    pub fn new() -> Self {
        Self::from_parts(
            DEFAULT_GROWTH_INCREMENT,
            StdRng::from_rng(&mut rand::rng()),
        )
    }

    /// Empty registry whose source seeds are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(DEFAULT_GROWTH_INCREMENT, StdRng::seed_from_u64(seed))
    }

    /// Registry configured from options.
    pub fn with_options(options: &RegistryOptions) -> Self {
        let rng = options.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        );
        Self::from_parts(options.growth_increment, rng)
    }

    fn from_parts(increment: usize, rng: StdRng) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            active: PackedBuffer::new(increment),
            rng,
        }
    }

    // -- Lifecycle --

    /// Validate `params`, build a source with a fresh seed and store it.
    /// The source is registered right away when `params.auto_play` is set.
    ///
    /// # Errors
    ///
    /// [`ShakeError::InvalidParameter`] if `params` fail validation; nothing
    /// is stored in that case.
    pub fn create(
        &mut self,
        params: &ShakeParams,
    ) -> Result<ShakeHandle, ShakeError> {
        let seed = self.rng.random_range(-SEED_RANGE..=SEED_RANGE);
        let source = ShakeSource::new(params, seed)?;
        Ok(self.insert(source))
    }

    /// Take ownership of an existing source. It is registered if playing.
    pub fn insert(&mut self, source: ShakeSource) -> ShakeHandle {
        let playing = source.is_playing();
        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.source = Some(source);
            ShakeHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                source: Some(source),
            });
            ShakeHandle {
                index,
                generation: 0,
            }
        };
        if playing {
            self.register(handle);
        }
        handle
    }

    /// Destroy the source behind `handle` and hand it back.
    ///
    /// The source always leaves the active set and comes back paused, so
    /// dropping it never leaves a dangling registration. Returns `None` for
    /// a stale handle.
    pub fn release(&mut self, handle: ShakeHandle) -> Option<ShakeSource> {
        let slot = self.slot_mut(handle)?;
        let mut source = slot.source.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.deregister(handle);
        source.pause();
        Some(source)
    }

    /// Stop every source and drop them all.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if let Some(source) = slot.source.as_mut() {
                source.stop();
            }
        }
        self.slots.clear();
        self.free.clear();
        self.active.clear();
        log::debug!("shake registry cleared");
    }

    // -- Playback --

    /// Start or resume the source. A completed shake restarts from zero.
    pub fn play(&mut self, handle: ShakeHandle) {
        if let Some(source) = self.get_mut(handle) {
            source.play();
            self.register(handle);
        }
    }

    /// Suspend the source without resetting its phase.
    pub fn pause(&mut self, handle: ShakeHandle) {
        if let Some(source) = self.get_mut(handle) {
            source.pause();
            self.deregister(handle);
        }
    }

    /// Finish the source: jump to the end of its lifetime and deregister.
    pub fn stop(&mut self, handle: ShakeHandle) {
        if let Some(source) = self.get_mut(handle) {
            source.stop();
            self.deregister(handle);
        }
    }

    /// Switch sustain looping for the source.
    pub fn set_loop(&mut self, handle: ShakeHandle, looping: bool) {
        if let Some(source) = self.get_mut(handle) {
            source.set_loop(looping);
        }
    }

    // -- Access --

    /// Source behind `handle`, if it still exists.
    pub fn get(&self, handle: ShakeHandle) -> Option<&ShakeSource> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.source.as_ref())
    }

    /// Mutable source behind `handle`, if it still exists.
    ///
    /// Playback state is only reachable through the registry, so edits
    /// made here cannot desynchronize the active set.
    pub fn get_mut(&mut self, handle: ShakeHandle) -> Option<&mut ShakeSource> {
        self.slot_mut(handle)?.source.as_mut()
    }

    fn slot_mut(&mut self, handle: ShakeHandle) -> Option<&mut Slot> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| {
                slot.generation == handle.generation && slot.source.is_some()
            });
        if slot.is_none() {
            log::debug!("stale shake handle {handle:?}");
        }
        slot
    }

    /// Whether `handle` still refers to a live source.
    pub fn contains(&self, handle: ShakeHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live sources, active or not.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the registry holds no sources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered (playing) sources.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Reserved capacity of the active set.
    pub fn capacity(&self) -> usize {
        self.active.capacity()
    }

    /// Handles of the registered sources, in no particular order.
    pub fn active_handles(&self) -> &[ShakeHandle] {
        self.active.as_slice()
    }

    // -- Active set --

    /// Add `handle` to the active set. No-op if already present, stale or
    /// not playing.
    pub(crate) fn register(&mut self, handle: ShakeHandle) {
        if self.get(handle).is_some_and(ShakeSource::is_playing) {
            let _ = self.active.insert(handle);
        }
    }

    /// Remove `handle` from the active set. No-op if absent.
    pub(crate) fn deregister(&mut self, handle: ShakeHandle) {
        if self.active.remove(&handle) {
            let _ = self.active.try_shrink();
        }
    }

    // -- Per-frame --

    /// Advance every playing source by `dt` seconds.
    ///
    /// Sources that run past their lifetime stop and leave the active set.
    /// A `dt` that is NaN or infinite is ignored.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() {
            log::debug!("Ignoring non-finite tick dt {dt}");
            return;
        }
        // Reverse order: a swap-remove only moves already-visited handles.
        for i in (0..self.active.len()).rev() {
            let handle = self.active[i];
            let Some(source) = self.slots[handle.index as usize].source.as_mut()
            else {
                continue;
            };
            source.advance(dt);
            if !source.is_playing() {
                self.deregister(handle);
            }
        }
    }

    /// Whether any source is playing. Consumers can skip sampling when not.
    pub fn has_active_sources(&self) -> bool {
        !self.active.is_empty()
    }

    /// Combined offset of every playing source at `point`.
    pub fn sample_at(&mut self, point: Vec3) -> Vec3 {
        let mut total = Vec3::ZERO;
        for handle in self.active.as_slice() {
            if let Some(source) = self.slots[handle.index as usize].source.as_mut()
            {
                total += source.sample_at(point);
            }
        }
        total
    }
}
