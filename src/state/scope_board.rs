//! In-memory result board for the three-way concurrent scope fetch.
//!
//! Each (group, scope) pair owns an isolated slot; the three scope fetches
//! of one refresh resolve independently and in any order. A global
//! generation counter makes cancellation advisory: completions carrying a
//! superseded generation are discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use serde::Serialize;

use crate::types::{AnnotatedTable, Scope};

/// What one (group, scope) slot currently holds. Slots move
/// Loading → Ready/Error per refresh; an error in one scope leaves the
/// other two untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum SlotState {
    Loading,
    Ready(AnnotatedTable),
    Error(String),
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    state: SlotState,
}

pub struct ScopeBoard {
    slots: DashMap<(u64, Scope), Slot>,
    /// Groups ever refreshed; the background refresher re-fetches these.
    tracked: DashSet<u64>,
    generation: AtomicU64,
}

impl ScopeBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start a new refresh for a group: bump the generation, mark all three
    /// scope slots Loading, and return the generation token the scope tasks
    /// must present on completion.
    pub fn begin_refresh(&self, grupo_id: u64) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        for scope in Scope::ALL {
            self.slots
                .insert((grupo_id, scope), Slot { generation, state: SlotState::Loading });
        }
        self.tracked.insert(grupo_id);
        generation
    }

    /// Write a scope result. Discarded when a newer refresh has already
    /// claimed the slot — the stale task's response must not clobber it.
    pub fn complete(&self, grupo_id: u64, scope: Scope, generation: u64, state: SlotState) {
        match self.slots.entry((grupo_id, scope)) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                if occupied.get().generation <= generation {
                    occupied.insert(Slot { generation, state });
                }
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(Slot { generation, state });
            }
        }
    }

    pub fn has_group(&self, grupo_id: u64) -> bool {
        Scope::ALL.iter().any(|scope| self.slots.contains_key(&(grupo_id, *scope)))
    }

    /// Current state of all three scope slots for a group. None when the
    /// group has never been refreshed.
    pub fn snapshot(&self, grupo_id: u64) -> Option<Vec<(Scope, SlotState)>> {
        if !self.has_group(grupo_id) {
            return None;
        }
        Some(
            Scope::ALL
                .iter()
                .map(|&scope| {
                    let state = self
                        .slots
                        .get(&(grupo_id, scope))
                        .map(|slot| slot.state.clone())
                        .unwrap_or(SlotState::Loading);
                    (scope, state)
                })
                .collect(),
        )
    }

    pub fn tracked_groups(&self) -> Vec<u64> {
        self.tracked.iter().map(|g| *g).collect()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Default for ScopeBoard {
    fn default() -> Self {
        Self {
            slots: DashMap::new(),
            tracked: DashSet::new(),
            generation: AtomicU64::new(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
