//! Hash-consing cache for small green nodes
//!
//! Identical small subtrees (a `true` literal, a `0 0 R` reference) are
//! shared instead of being rebuilt. The table is direct-mapped and bounded:
//! a new entry simply overwrites whatever sits in its slot. Lookups compare
//! children by identity, so a hit is always a node with exactly those
//! children.
//!
//! The cache is best-effort. A collision, an evicted entry or a slot that
//! another thread is holding all read as a miss, and the caller builds a
//! fresh, structurally equal node instead.

use super::flags::NodeFlags;
use super::kind::SyntaxKind;
use super::node::GreenNode;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Nodes with more children than this are never cached
pub const MAX_CACHED_CHILDREN: usize = 3;

/// Default table size, as a power of two
pub const DEFAULT_CACHE_SIZE_BITS: u32 = 16;

const MAX_CACHE_SIZE_BITS: u32 = 24;

/// Outcome of [`NodeCache::try_get_node`]
#[derive(Debug, Clone)]
pub enum CacheLookup {
    /// A node with this kind and these exact children is cached
    Hit { node: GreenNode, hash: i32 },
    /// Not cached; pass the hash to [`NodeCache::add_node`] once built
    Miss { hash: i32 },
    /// The shape is not eligible for caching; do not call `add_node`
    Uncacheable,
}

impl CacheLookup {
    pub fn node(&self) -> Option<&GreenNode> {
        match self {
            CacheLookup::Hit { node, .. } => Some(node),
            _ => None,
        }
    }

    /// Positive hash for cacheable shapes, -1 otherwise.
    pub fn hash(&self) -> i32 {
        match self {
            CacheLookup::Hit { hash, .. } | CacheLookup::Miss { hash } => *hash,
            CacheLookup::Uncacheable => -1,
        }
    }
}

struct Entry {
    hash: i32,
    node: GreenNode,
}

/// Bounded, thread-safe node cache.
///
/// Owned by whoever builds trees (usually through a
/// [`SyntaxFactory`](super::SyntaxFactory)) and shared with `Arc` between
/// threads that parse concurrently.
pub struct NodeCache {
    slots: Box<[Mutex<Option<Entry>>]>,
    mask: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    uncacheable: AtomicU64,
}

impl NodeCache {
    /// Creates a cache with `2^size_bits` slots.
    pub fn new(size_bits: u32) -> Self {
        let size_bits = size_bits.clamp(1, MAX_CACHE_SIZE_BITS);
        let capacity = 1usize << size_bits;
        let slots: Vec<Mutex<Option<Entry>>> = (0..capacity).map(|_| Mutex::new(None)).collect();

        tracing::debug!(capacity, "created green node cache");

        Self {
            slots: slots.into_boxed_slice(),
            mask: capacity - 1,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            uncacheable: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Looks up a node of `kind` whose slots are exactly `children`
    /// (compared by identity).
    pub fn try_get_node(&self, kind: SyntaxKind, children: &[Option<&GreenNode>]) -> CacheLookup {
        if !Self::is_cacheable_shape(children) {
            self.uncacheable.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(?kind, children = children.len(), "uncacheable shape");
            return CacheLookup::Uncacheable;
        }

        let hash = cache_hash(kind, children);
        let found = match self.slots[self.index(hash)].try_lock() {
            Ok(slot) => slot
                .as_ref()
                .filter(|entry| entry.hash == hash && has_children(&entry.node, kind, children))
                .map(|entry| entry.node.clone()),
            // Contended or poisoned: treated like any other miss
            Err(_) => None,
        };

        match found {
            Some(node) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(?kind, hash, "node cache hit");
                CacheLookup::Hit { node, hash }
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(?kind, hash, "node cache miss");
                CacheLookup::Miss { hash }
            }
        }
    }

    /// Stores `node` under `hash` (from a previous `Miss`), replacing
    /// whatever occupied the slot.
    pub fn add_node(&self, node: GreenNode, hash: i32) {
        if hash <= 0 || node.contains_diagnostics() {
            return;
        }

        if let Ok(mut slot) = self.slots[self.index(hash)].try_lock() {
            if let Some(previous) = slot.as_ref() {
                if !previous.node.ptr_eq(&node) {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(
                        evicted = ?previous.node.kind(),
                        kind = ?node.kind(),
                        "node cache eviction"
                    );
                }
            }
            *slot = Some(Entry { hash, node });
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.lock().map(|s| s.is_some()).unwrap_or(false))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        for slot in self.slots.iter() {
            if let Ok(mut slot) = slot.lock() {
                *slot = None;
            }
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.uncacheable.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            uncacheable: self.uncacheable.load(Ordering::Relaxed),
        }
    }

    fn index(&self, hash: i32) -> usize {
        hash as usize & self.mask
    }

    fn is_cacheable_shape(children: &[Option<&GreenNode>]) -> bool {
        !children.is_empty()
            && children.len() <= MAX_CACHED_CHILDREN
            && children.iter().flatten().all(|child| {
                !child.contains_flags(NodeFlags::CONTAINS_DIAGNOSTICS)
                    && child.slot_count() <= MAX_CACHED_CHILDREN
            })
    }
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE_BITS)
    }
}

impl fmt::Debug for NodeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCache")
            .field("stats", &self.stats())
            .finish()
    }
}

fn has_children(node: &GreenNode, kind: SyntaxKind, children: &[Option<&GreenNode>]) -> bool {
    node.kind() == kind
        && node.slot_count() == children.len()
        && children
            .iter()
            .enumerate()
            .all(|(i, child)| match (node.slot(i), child) {
                (None, None) => true,
                (Some(a), Some(b)) => a.ptr_eq(b),
                _ => false,
            })
}

fn cache_hash(kind: SyntaxKind, children: &[Option<&GreenNode>]) -> i32 {
    const SEED: u32 = 0x9E37_79B9;

    let mut code = (kind as u32).wrapping_mul(SEED);
    for child in children {
        let id = child.map_or(0, |c| c.identity()) as u64;
        let id = (id ^ (id >> 32)) as u32;
        code = (code.rotate_left(5) ^ id).wrapping_mul(SEED);
    }
    code ^= code >> 16;

    ((code & 0x7FFF_FFFF) as i32).max(1)
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of slots in the table
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Entries overwritten by a different node
    pub evictions: u64,
    /// Lookups rejected as not eligible
    pub uncacheable: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}
