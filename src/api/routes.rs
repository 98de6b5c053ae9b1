use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::composer::{build_scope_table, ScopeComposer};
use crate::config::Config;
use crate::error::AppError;
use crate::fetcher::{fetch_matches, fetch_sanctions};
use crate::standings::{row_ordering, SortDirection, SortField};
use crate::state::{ScopeBoard, SlotState};
use crate::types::{AnnotatedTable, MatchList, MatchScope, SancionRow, Scope, SeasonWeek, WeekWindow};
use crate::weeks::{self, ISO_DATE_FMT};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Config,
    pub client: reqwest::Client,
    pub board: Arc<ScopeBoard>,
    pub composer: Arc<ScopeComposer>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/clasificacion/:grupo_id", get(get_classification))
        .route("/clasificacion/:grupo_id/completa", get(get_multi_scope))
        .route("/semanas", get(get_weeks))
        .route("/sanciones", get(get_sanctions))
        .route("/partidos", get(get_matches))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ClassificationQuery {
    pub scope: Option<String>,
    pub jornada: Option<u32>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Deserialize)]
pub struct WeeksQuery {
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

#[derive(Deserialize)]
pub struct SanctionsQuery {
    /// Closing Tuesday of the requested week; defaults to the current one.
    pub martes: Option<String>,
    pub top: Option<usize>,
}

#[derive(Deserialize)]
pub struct MatchesQuery {
    pub scope: Option<String>,
    pub week: Option<String>,
    pub grupo_id: Option<u64>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tracked_groups: usize,
    pub generation: u64,
}

#[derive(Serialize)]
pub struct MultiScopeResponse {
    pub grupo_id: u64,
    pub overall: SlotState,
    pub home: SlotState,
    pub away: SlotState,
}

#[derive(Serialize)]
pub struct SanctionsResponse {
    pub temporada_id: u64,
    pub window: WeekWindow,
    pub matched_games: u32,
    pub ranking: Vec<SancionRow>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        tracked_groups: state.board.tracked_groups().len(),
        generation: state.board.current_generation(),
    })
}

/// Single-scope table fetched inline, optionally re-sorted by column.
/// `pos` and deltas keep the backend's default order regardless of the
/// requested sort.
async fn get_classification(
    State(state): State<ApiState>,
    Path(grupo_id): Path<u64>,
    Query(params): Query<ClassificationQuery>,
) -> Result<Json<AnnotatedTable>, AppError> {
    let scope = match params.scope.as_deref() {
        Some(raw) => Scope::from_param(raw)
            .ok_or_else(|| AppError::InvalidParam(format!("unknown scope {raw:?}")))?,
        None => Scope::Overall,
    };

    let mut table =
        build_scope_table(&state.client, &state.cfg, grupo_id, scope, params.jornada).await?;

    if let Some(raw) = params.sort.as_deref() {
        let field = SortField::from_param(raw)
            .ok_or_else(|| AppError::InvalidParam(format!("unknown sort field {raw:?}")))?;
        let direction = match params.dir.as_deref() {
            Some(d) => SortDirection::from_param(d)
                .ok_or_else(|| AppError::InvalidParam(format!("unknown sort direction {d:?}")))?,
            None => field.default_direction(),
        };
        table.rows.sort_by(|a, b| row_ordering(&a.row, &b.row, field, direction));
    }

    Ok(Json(table))
}

/// Three-scope snapshot. The first request for a group kicks off the
/// concurrent scope fetches and reports `loading` slots; poll again for
/// resolved states.
async fn get_multi_scope(
    State(state): State<ApiState>,
    Path(grupo_id): Path<u64>,
) -> Json<MultiScopeResponse> {
    state.composer.ensure(grupo_id);

    let snapshot = state
        .board
        .snapshot(grupo_id)
        .unwrap_or_else(|| Scope::ALL.iter().map(|&s| (s, SlotState::Loading)).collect());

    let slot = |wanted: Scope| {
        snapshot
            .iter()
            .find(|(scope, _)| *scope == wanted)
            .map(|(_, state)| state.clone())
            .unwrap_or(SlotState::Loading)
    };

    Json(MultiScopeResponse {
        grupo_id,
        overall: slot(Scope::Overall),
        home: slot(Scope::Home),
        away: slot(Scope::Away),
    })
}

async fn get_weeks(
    State(state): State<ApiState>,
    Query(params): Query<WeeksQuery>,
) -> Result<Json<Vec<SeasonWeek>>, AppError> {
    let desde = match params.desde.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, ISO_DATE_FMT)?,
        None => state.cfg.season_start,
    };
    let hasta = match params.hasta.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, ISO_DATE_FMT)?,
        None => state.cfg.season_end,
    };
    Ok(Json(weeks::enumerate_weeks(desde, hasta)))
}

async fn get_sanctions(
    State(state): State<ApiState>,
    Query(params): Query<SanctionsQuery>,
) -> Result<Json<SanctionsResponse>, AppError> {
    let tuesday = params
        .martes
        .unwrap_or_else(|| weeks::default_tuesday().format(ISO_DATE_FMT).to_string());
    let window = weeks::week_range_from_tuesday(&tuesday)?;
    let top = params.top.unwrap_or(state.cfg.sanctions_top);

    let ranking = fetch_sanctions(&state.client, &state.cfg, &window, top).await?;
    Ok(Json(SanctionsResponse {
        temporada_id: ranking.temporada_id,
        window,
        matched_games: ranking.matched_games,
        ranking: ranking.ranking,
    }))
}

async fn get_matches(
    State(state): State<ApiState>,
    Query(params): Query<MatchesQuery>,
) -> Result<Json<MatchList>, AppError> {
    let scope = match params.scope.as_deref() {
        Some(raw) => MatchScope::from_param(raw)
            .ok_or_else(|| AppError::InvalidParam(format!("unknown match scope {raw:?}")))?,
        None => MatchScope::Global,
    };
    let week = match params.week.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, ISO_DATE_FMT)?,
        None => weeks::default_tuesday(),
    };

    let list = fetch_matches(&state.client, &state.cfg, scope, week, params.grupo_id).await?;
    Ok(Json(list))
}
