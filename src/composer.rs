//! Multi-scope classification composition.
//!
//! One refresh fans out into three independent tasks (overall/home/away),
//! each fetching its own table, diffing it against the immediately
//! preceding available round, and completing its own board slot. Tasks are
//! never awaited jointly; each scope can be loading, ready, or failed at
//! any instant.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::fetcher::fetch_classification;
use crate::standings::{compute_delta, previous_round};
use crate::state::{ScopeBoard, SlotState};
use crate::types::{
    AnnotatedRow, AnnotatedTable, ClassificationTable, PositionDelta, RowKey, Scope,
};

pub struct ScopeComposer {
    cfg: Config,
    client: reqwest::Client,
    board: Arc<ScopeBoard>,
}

impl ScopeComposer {
    pub fn new(cfg: Config, client: reqwest::Client, board: Arc<ScopeBoard>) -> Arc<Self> {
        Arc::new(Self { cfg, client, board })
    }

    /// Fire-and-forget refresh of all three scopes for a group. Returns the
    /// generation the spawned tasks will complete under; responses from
    /// refreshes superseded in the meantime are discarded by the board.
    pub fn refresh(&self, grupo_id: u64, jornada: Option<u32>) -> u64 {
        let generation = self.board.begin_refresh(grupo_id);
        for scope in Scope::ALL {
            let cfg = self.cfg.clone();
            let client = self.client.clone();
            let board = Arc::clone(&self.board);
            tokio::spawn(async move {
                let state = match build_scope_table(&client, &cfg, grupo_id, scope, jornada).await {
                    Ok(table) => SlotState::Ready(table),
                    Err(e) => {
                        warn!(grupo_id, %scope, "scope fetch failed: {e}");
                        SlotState::Error(e.to_string())
                    }
                };
                board.complete(grupo_id, scope, generation, state);
            });
        }
        generation
    }

    /// Kick off a refresh only when the group has never been fetched; later
    /// callers read whatever state the slots currently hold.
    pub fn ensure(&self, grupo_id: u64) {
        if !self.board.has_group(grupo_id) {
            self.refresh(grupo_id, None);
        }
    }
}

/// One scope's table with deltas against the previous available round.
///
/// A failed previous-round fetch degrades to neutral deltas — the current
/// table is still worth serving.
pub async fn build_scope_table(
    client: &reqwest::Client,
    cfg: &Config,
    grupo_id: u64,
    scope: Scope,
    jornada: Option<u32>,
) -> Result<AnnotatedTable> {
    let current = fetch_classification(client, cfg, grupo_id, scope, jornada).await?;

    let prev_round = current
        .applied_round
        .and_then(|applied| previous_round(&current.rounds_available, applied));

    let deltas = match prev_round {
        Some(round) => match fetch_classification(client, cfg, grupo_id, scope, Some(round)).await
        {
            Ok(previous) => compute_delta(&current.rows, &previous.rows),
            Err(e) => {
                warn!(grupo_id, %scope, round, "previous round fetch failed: {e}");
                HashMap::new()
            }
        },
        None => HashMap::new(),
    };

    Ok(annotate_table(current, prev_round, &deltas))
}

/// Attach 1-based positions and deltas to a fetched table, preserving the
/// backend's row order.
pub fn annotate_table(
    table: ClassificationTable,
    previous_round: Option<u32>,
    deltas: &HashMap<RowKey, PositionDelta>,
) -> AnnotatedTable {
    let rows = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| AnnotatedRow {
            pos: idx + 1,
            delta: deltas.get(&row.key()).copied().unwrap_or(PositionDelta::Same),
            row,
        })
        .collect();

    AnnotatedTable {
        grupo_id: table.grupo_id,
        scope: table.scope,
        rounds_available: table.rounds_available,
        applied_round: table.applied_round,
        previous_round,
        rows,
    }
}
