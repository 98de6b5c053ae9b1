//! Backend REST consumption.
//!
//! The backend owns every wire shape; this module only fetches and
//! normalizes. Parsing is split into pure functions over
//! `serde_json::Value` so the lenient field handling is testable without
//! a live backend.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::standings::normalize_row;
use crate::types::{
    ClassificationTable, MatchItem, MatchList, MatchScope, SancionRow, SanctionsRanking, Scope,
    WeekWindow,
};
use crate::weeks::ISO_DATE_FMT;

/// Full classification for one (group, scope, round).
///
/// `jornada` is a request; the backend reports which round it actually
/// applied in `jornada_aplicada`.
pub async fn fetch_classification(
    client: &reqwest::Client,
    cfg: &Config,
    grupo_id: u64,
    scope: Scope,
    jornada: Option<u32>,
) -> Result<ClassificationTable> {
    let mut url = format!(
        "{}/api/estadisticas/clasificacion-completa/?grupo_id={}&scope={}",
        cfg.backend_api_url, grupo_id, scope
    );
    if let Some(round) = jornada {
        url.push_str(&format!("&jornada={round}"));
    }
    debug!(grupo_id, %scope, "fetching classification: {url}");

    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::Backend(format!(
            "classification request for grupo {grupo_id} returned {}",
            resp.status()
        )));
    }
    let body: Value = resp.json().await?;
    parse_classification(&body, grupo_id, scope)
}

pub fn parse_classification(body: &Value, grupo_id: u64, scope: Scope) -> Result<ClassificationTable> {
    let tabla = body
        .get("tabla")
        .and_then(|t| t.as_array())
        .ok_or_else(|| AppError::Backend("classification response carried no tabla array".to_string()))?;

    let rows = tabla.iter().map(|raw| normalize_row(raw, scope)).collect();

    let rounds_available = body
        .get("jornadas_disponibles")
        .and_then(|j| j.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_u64().map(|n| n as u32)).collect())
        .unwrap_or_default();

    let applied_round = body
        .get("jornada_aplicada")
        .and_then(|j| j.as_u64())
        .map(|n| n as u32);

    Ok(ClassificationTable {
        grupo_id,
        scope,
        rounds_available,
        applied_round,
        rows,
    })
}

/// Weekly global sanctions ranking. `window` bounds come from
/// [`crate::weeks::week_range_from_tuesday`].
pub async fn fetch_sanctions(
    client: &reqwest::Client,
    cfg: &Config,
    window: &WeekWindow,
    top: usize,
) -> Result<SanctionsRanking> {
    let url = format!(
        "{}/api/estadisticas/sanciones-global-optimized/?temporada_id={}&from={}&to={}&top={}",
        cfg.backend_api_url,
        cfg.temporada_id,
        window.from.date().format(ISO_DATE_FMT),
        window.to.date().format(ISO_DATE_FMT),
        top,
    );
    debug!(temporada_id = cfg.temporada_id, "fetching sanctions: {url}");

    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::Backend(format!(
            "sanctions request returned {}",
            resp.status()
        )));
    }
    let body: Value = resp.json().await?;
    Ok(parse_sanctions(&body, cfg.temporada_id))
}

pub fn parse_sanctions(body: &Value, fallback_temporada: u64) -> SanctionsRanking {
    let ranking = body
        .get("ranking_global")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().map(parse_sancion_row).collect())
        .unwrap_or_default();

    SanctionsRanking {
        temporada_id: body
            .get("temporada_id")
            .and_then(|t| t.as_u64())
            .unwrap_or(fallback_temporada),
        matched_games: body
            .get("window")
            .and_then(|w| w.get("matched_games"))
            .and_then(|m| m.as_u64())
            .map(|n| n as u32)
            .unwrap_or(0),
        ranking,
    }
}

fn parse_sancion_row(raw: &Value) -> SancionRow {
    let count = |names: &[&str]| -> u32 {
        names
            .iter()
            .find_map(|name| raw.get(name).and_then(|v| v.as_u64()))
            .unwrap_or(0) as u32
    };
    let text = |names: &[&str]| -> String {
        names
            .iter()
            .find_map(|name| raw.get(name).and_then(|v| v.as_str()))
            .unwrap_or("")
            .to_string()
    };

    let yellows = count(&["amarillas", "yellows"]);
    let reds = count(&["rojas", "reds"]);

    SancionRow {
        player_name: text(&["jugador", "nombre", "player_name"]),
        club_name: text(&["club", "equipo", "club_name"]),
        yellows,
        reds,
        total: count(&["total", "puntos_sancion"]).max(yellows + reds),
    }
}

/// Match list for the week closed by `week` (a closing Tuesday).
pub async fn fetch_matches(
    client: &reqwest::Client,
    cfg: &Config,
    scope: MatchScope,
    week: NaiveDate,
    grupo_id: Option<u64>,
) -> Result<MatchList> {
    let mut url = format!(
        "{}/api/partidos/lista/?scope={}&week={}",
        cfg.backend_api_url,
        scope,
        week.format(ISO_DATE_FMT),
    );
    if let Some(grupo) = grupo_id {
        url.push_str(&format!("&grupo_id={grupo}"));
    }
    debug!(%scope, %week, "fetching matches: {url}");

    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(AppError::Backend(format!(
            "match list request returned {}",
            resp.status()
        )));
    }
    let body: Value = resp.json().await?;
    Ok(parse_matches(&body, scope, week))
}

pub fn parse_matches(body: &Value, scope: MatchScope, week: NaiveDate) -> MatchList {
    // The list endpoint has returned both a bare array and an object with
    // a `partidos` key.
    let items = body
        .as_array()
        .or_else(|| body.get("partidos").and_then(|p| p.as_array()))
        .or_else(|| body.get("matches").and_then(|m| m.as_array()));

    let matches = items
        .map(|arr| arr.iter().map(parse_match_item).collect())
        .unwrap_or_default();

    MatchList { week, scope, matches }
}

fn parse_match_item(raw: &Value) -> MatchItem {
    let text = |names: &[&str]| -> String {
        names
            .iter()
            .find_map(|name| raw.get(name).and_then(|v| v.as_str()))
            .unwrap_or("")
            .to_string()
    };
    let goals = |names: &[&str]| -> Option<i64> {
        names.iter().find_map(|name| raw.get(name).and_then(|v| v.as_i64()))
    };

    MatchItem {
        home_name: text(&["local", "home", "home_name"]),
        away_name: text(&["visitante", "away", "away_name"]),
        home_goals: goals(&["goles_local", "home_goals"]),
        away_goals: goals(&["goles_visitante", "away_goals"]),
        date: raw
            .get("fecha")
            .or_else(|| raw.get("date"))
            .and_then(|v| v.as_str())
            .and_then(|s| NaiveDate::parse_from_str(&s[..10.min(s.len())], ISO_DATE_FMT).ok()),
        grupo_id: raw.get("grupo_id").and_then(|v| v.as_u64()),
    }
}
