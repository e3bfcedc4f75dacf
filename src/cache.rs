/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Bounded memoisation of repertoires for one subsystem.
//!
//! A search over mechanisms and purviews asks for the same repertoire many
//! times. Because a [`Subsystem`] is immutable, a repertoire depends only on
//! `(direction, mechanism, purview)`, so it can be computed once and cloned
//! out afterwards. Cached results are bit-identical to fresh ones.
//!
//! # Invariants
//!
//! - At most `capacity` entries; the least recently used entry is evicted
//!   when a new one would exceed it.
//! - Mechanism and purview are keyed as sorted sets, so `[1, 0]` and `[0, 1]`
//!   share an entry.
//! - Errors are returned, never cached.
//! - no_std compatible; uses `hashbrown::HashMap`.

use alloc::vec::Vec;

use hashbrown::HashMap;
use tracing::trace;

use crate::error::Result;
use crate::repertoire::{Direction, Repertoire};
use crate::subsystem::Subsystem;

/// Default number of cached repertoires.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RepertoireKey {
    direction: Direction,
    mechanism: Vec<usize>,
    purview: Vec<usize>,
}

impl RepertoireKey {
    fn new(direction: Direction, mechanism: &[usize], purview: &[usize]) -> Self {
        Self {
            direction,
            mechanism: canonical(mechanism),
            purview: canonical(purview),
        }
    }
}

fn canonical(nodes: &[usize]) -> Vec<usize> {
    let mut v = nodes.to_vec();
    v.sort_unstable();
    v.dedup();
    v
}

#[derive(Clone, Debug)]
struct CacheEntry {
    repertoire: Repertoire,
    last_used: u64,
}

/// Memoising front end for a borrowed [`Subsystem`].
pub struct RepertoireCache<'s, 'a> {
    subsystem: &'s Subsystem<'a>,
    entries: HashMap<RepertoireKey, CacheEntry>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl<'s, 'a> RepertoireCache<'s, 'a> {
    /// Cache with [`DEFAULT_CAPACITY`] entries.
    pub fn new(subsystem: &'s Subsystem<'a>) -> Self {
        Self::with_capacity(subsystem, DEFAULT_CAPACITY)
    }

    /// Cache holding at most `capacity` repertoires. A capacity of 0 disables
    /// caching; every call is computed afresh.
    pub fn with_capacity(subsystem: &'s Subsystem<'a>, capacity: usize) -> Self {
        Self {
            subsystem,
            entries: HashMap::new(),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// The subsystem whose repertoires are cached.
    pub fn subsystem(&self) -> &'s Subsystem<'a> {
        self.subsystem
    }

    /// Cached [`Subsystem::cause_repertoire`].
    pub fn cause_repertoire(&mut self, mechanism: &[usize], purview: &[usize]) -> Result<Repertoire> {
        self.repertoire(Direction::Cause, mechanism, purview)
    }

    /// Cached [`Subsystem::effect_repertoire`].
    pub fn effect_repertoire(&mut self, mechanism: &[usize], purview: &[usize]) -> Result<Repertoire> {
        self.repertoire(Direction::Effect, mechanism, purview)
    }

    /// Cached [`Subsystem::repertoire`].
    pub fn repertoire(
        &mut self,
        direction: Direction,
        mechanism: &[usize],
        purview: &[usize],
    ) -> Result<Repertoire> {
        self.tick = self.tick.wrapping_add(1);
        let key = RepertoireKey::new(direction, mechanism, purview);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used = self.tick;
            self.hits += 1;
            trace!(%direction, mechanism = ?key.mechanism, purview = ?key.purview, "repertoire cache hit");
            return Ok(entry.repertoire.clone());
        }

        self.misses += 1;
        trace!(%direction, mechanism = ?key.mechanism, purview = ?key.purview, "repertoire cache miss");
        let repertoire = self.subsystem.repertoire(direction, mechanism, purview)?;
        if self.capacity > 0 {
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
            self.entries.insert(
                key,
                CacheEntry {
                    repertoire: repertoire.clone(),
                    last_used: self.tick,
                },
            );
        }
        Ok(repertoire)
    }

    // ── Collection helpers ─────────────────────────────────────────────────

    /// Number of cached repertoires.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached repertoires.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to be computed (including failed ones).
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every cached repertoire. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(k, _)| k.clone())
        {
            trace!(mechanism = ?oldest.mechanism, purview = ?oldest.purview, "evicting cached repertoire");
            self.entries.remove(&oldest);
        }
    }
}

impl core::fmt::Debug for RepertoireCache<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RepertoireCache")
            .field("nodes", &self.subsystem.nodes())
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
