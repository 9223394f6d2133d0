/// Transient surface pool.
///
/// Lends render surfaces to passes and takes them back once their last
/// reader is done. Surfaces are created lazily on the first miss for a
/// descriptor and live as long as the pool: there is no eviction and no
/// capacity bound. A resolution or format that is never used again strands
/// its surfaces until `shutdown()`; crossing the configured soft limit only
/// logs a warning.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, Texture};
use super::surface_descriptor::SurfaceDescriptor;

const SOURCE: &str = "galaxy3d::postfx::SurfacePool";

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable identity of a surface created by a `SurfacePool`.
    pub struct SurfaceKey;
}

// ===== POOLED SURFACE =====

/// A surface on loan from the pool
///
/// Deliberately not `Clone`: whoever holds the value owns the surface
/// until it is handed back with `free_unused_resource()`.
pub struct PooledSurface {
    key: SurfaceKey,
    descriptor: SurfaceDescriptor,
    texture: Arc<dyn Texture>,
}

impl PooledSurface {
    /// Pool identity of this surface
    pub fn key(&self) -> SurfaceKey {
        self.key
    }

    /// Descriptor the surface was created for
    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    /// GPU texture backing this surface
    pub fn texture(&self) -> &Arc<dyn Texture> {
        &self.texture
    }
}

impl fmt::Debug for PooledSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledSurface")
            .field("key", &self.key)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

// ===== STATISTICS =====

/// Pool counters since creation (or since the last shutdown)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Requests served from idle surfaces
    pub hits: u64,
    /// Requests that allocated a new surface
    pub misses: u64,
    /// Surfaces handed back to the pool
    pub returns: u64,
}

struct SurfaceRecord {
    descriptor: SurfaceDescriptor,
    on_loan: bool,
}

// ===== SURFACE POOL =====

/// Descriptor-keyed multi-collection of reusable surfaces
pub struct SurfacePool {
    /// Every surface created by this pool, with its loan state
    records: SlotMap<SurfaceKey, SurfaceRecord>,
    /// Idle surfaces grouped by exact descriptor
    idle: BTreeMap<SurfaceDescriptor, Vec<PooledSurface>>,
    stats: PoolStats,
    soft_limit: Option<usize>,
    over_soft_limit: bool,
}

impl SurfacePool {
    /// Create an empty pool without a soft limit
    pub fn new() -> Self {
        Self::with_soft_limit(None)
    }

    /// Create an empty pool warning once the surface count exceeds `soft_limit`
    pub fn with_soft_limit(soft_limit: Option<usize>) -> Self {
        Self {
            records: SlotMap::with_key(),
            idle: BTreeMap::new(),
            stats: PoolStats::default(),
            soft_limit,
            over_soft_limit: false,
        }
    }

    /// Lend a surface matching `descriptor` exactly
    ///
    /// Reuses the most recently returned idle surface with that descriptor,
    /// or allocates a new one through `device` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates texture creation failures from the device.
    pub fn find_free_element(
        &mut self,
        descriptor: &SurfaceDescriptor,
        device: &mut dyn GraphicsDevice,
    ) -> Result<PooledSurface> {
        if let Some(surface) = self.take_idle(descriptor) {
            if let Some(record) = self.records.get_mut(surface.key) {
                record.on_loan = true;
            }
            self.stats.hits += 1;
            return Ok(surface);
        }

        let texture = device.create_texture(descriptor.to_texture_desc())?;
        debug_assert!(
            descriptor.matches(texture.info()),
            "device created a texture that does not match {:?}",
            descriptor
        );

        let key = self.records.insert(SurfaceRecord {
            descriptor: *descriptor,
            on_loan: true,
        });
        self.stats.misses += 1;

        crate::engine_debug!(SOURCE,
            "Allocated {}x{} {:?} surface ({} total)",
            descriptor.width, descriptor.height, descriptor.format, self.records.len());
        self.check_soft_limit();

        Ok(PooledSurface {
            key,
            descriptor: *descriptor,
            texture,
        })
    }

    /// Take a surface back, keyed by the descriptor it was created for
    ///
    /// Surfaces from another pool (or lent before a `shutdown()`) are dropped.
    pub fn free_unused_resource(&mut self, surface: PooledSurface) {
        match self.records.get_mut(surface.key) {
            Some(record) => {
                debug_assert!(record.on_loan, "surface {:?} returned twice", surface.key);
                debug_assert_eq!(record.descriptor, surface.descriptor);
                record.on_loan = false;
            }
            None => {
                crate::engine_warn!(SOURCE,
                    "Dropping surface {:?} not owned by this pool", surface.key);
                return;
            }
        }

        self.stats.returns += 1;
        self.idle.entry(surface.descriptor).or_default().push(surface);
    }

    fn take_idle(&mut self, descriptor: &SurfaceDescriptor) -> Option<PooledSurface> {
        let list = self.idle.get_mut(descriptor)?;
        let surface = list.pop();
        if list.is_empty() {
            self.idle.remove(descriptor);
        }
        surface
    }

    fn check_soft_limit(&mut self) {
        let Some(limit) = self.soft_limit else {
            return;
        };
        let total = self.records.len();
        if total > limit && !self.over_soft_limit {
            self.over_soft_limit = true;
            crate::engine_warn!(SOURCE,
                "Pool holds {} surfaces (soft limit {}); surfaces are never evicted",
                total, limit);
        } else if total <= limit {
            self.over_soft_limit = false;
        }
    }

    /// Number of surfaces created by this pool (idle + on loan)
    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Number of idle surfaces
    pub fn idle_count(&self) -> usize {
        self.idle.values().map(Vec::len).sum()
    }

    /// Number of surfaces currently on loan
    pub fn loaned_count(&self) -> usize {
        self.records.values().filter(|r| r.on_loan).count()
    }

    /// Number of idle surfaces for one exact descriptor
    pub fn idle_count_for(&self, descriptor: &SurfaceDescriptor) -> usize {
        self.idle.get(descriptor).map_or(0, Vec::len)
    }

    /// Descriptors that currently have idle surfaces, in descriptor order
    pub fn idle_descriptors(&self) -> impl Iterator<Item = &SurfaceDescriptor> + '_ {
        self.idle.keys()
    }

    /// Whether `key` is currently lent out
    pub fn is_on_loan(&self, key: SurfaceKey) -> bool {
        self.records.get(key).is_some_and(|r| r.on_loan)
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn soft_limit(&self) -> Option<usize> {
        self.soft_limit
    }

    /// Destroy every surface and reset counters
    ///
    /// Surfaces still on loan are forgotten; handing them back later drops
    /// them. Safe to call more than once.
    pub fn shutdown(&mut self) {
        let loaned = self.loaned_count();
        if loaned > 0 {
            crate::engine_warn!(SOURCE,
                "Shutting down with {} surface(s) still on loan", loaned);
        }
        if !self.records.is_empty() {
            crate::engine_debug!(SOURCE, "Destroying {} surface(s)", self.records.len());
        }
        self.idle.clear();
        self.records.clear();
        self.stats = PoolStats::default();
        self.over_soft_limit = false;
    }
}

impl Default for SurfacePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "surface_pool_tests.rs"]
mod tests;
