use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Lens on a standings table: all matches, home matches only, or away only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Overall,
    Home,
    Away,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Overall, Scope::Home, Scope::Away];

    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overall" => Some(Scope::Overall),
            "home" => Some(Scope::Home),
            "away" => Some(Scope::Away),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scope::Overall => "overall",
            Scope::Home => "home",
            Scope::Away => "away",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Streak
// ---------------------------------------------------------------------------

/// One recent match outcome: V (win), E (draw), D (loss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakCode {
    #[serde(rename = "V")]
    Win,
    #[serde(rename = "E")]
    Draw,
    #[serde(rename = "D")]
    Loss,
}

impl StreakCode {
    /// Case-insensitive; anything other than V/E/D is not a streak code.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'V' => Some(StreakCode::Win),
            'E' => Some(StreakCode::Draw),
            'D' => Some(StreakCode::Loss),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            StreakCode::Win => 'V',
            StreakCode::Draw => 'E',
            StreakCode::Loss => 'D',
        }
    }
}

impl std::fmt::Display for StreakCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

/// One team's aggregate record within a scope, normalized from the
/// backend's heterogeneous row shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub club_id: Option<i64>,
    pub name: String,
    pub slug: Option<String>,
    pub crest: Option<String>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_diff: i64,
    pub points: i64,
    pub streak: Vec<StreakCode>,
}

impl StandingsRow {
    /// Delta-map key: numeric club identity when the backend supplies one,
    /// the team name otherwise.
    pub fn key(&self) -> RowKey {
        match self.club_id {
            Some(id) => RowKey::Id(id),
            None => RowKey::Name(self.name.clone()),
        }
    }
}

/// Identity used to match a team across two standings tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(i64),
    Name(String),
}

/// Ordered standings for one (group, scope, round) triple, as returned by
/// the backend for a single fetch.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationTable {
    pub grupo_id: u64,
    pub scope: Scope,
    /// Rounds the backend can serve for this group.
    pub rounds_available: Vec<u32>,
    /// Round actually applied by the backend (may differ from the request).
    pub applied_round: Option<u32>,
    pub rows: Vec<StandingsRow>,
}

/// A standings row annotated for display: 1-based position in the default
/// table order plus week-over-week movement.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRow {
    pub pos: usize,
    pub delta: PositionDelta,
    #[serde(flatten)]
    pub row: StandingsRow,
}

/// A served classification table: normalized rows with positions and
/// deltas, plus the round the deltas were computed against.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedTable {
    pub grupo_id: u64,
    pub scope: Scope,
    pub rounds_available: Vec<u32>,
    pub applied_round: Option<u32>,
    /// Round the previous table was fetched for; None when there was
    /// nothing to diff against (deltas all `Same`).
    pub previous_round: Option<u32>,
    pub rows: Vec<AnnotatedRow>,
}

// ---------------------------------------------------------------------------
// Position delta
// ---------------------------------------------------------------------------

/// Week-over-week rank movement. `Same` also covers teams absent from the
/// previous table (no delta icon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionDelta {
    Up,
    Down,
    Same,
}

impl std::fmt::Display for PositionDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PositionDelta::Up => "up",
            PositionDelta::Down => "down",
            PositionDelta::Same => "same",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Weeks
// ---------------------------------------------------------------------------

/// Query bounds for one Wednesday→Tuesday week: Wednesday 00:00:00 through
/// Tuesday 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// One enumerated season week, numbered from 1 at the season start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonWeek {
    pub num: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Sanctions
// ---------------------------------------------------------------------------

/// One entry of the weekly global sanctions ranking.
#[derive(Debug, Clone, Serialize)]
pub struct SancionRow {
    pub player_name: String,
    pub club_name: String,
    pub yellows: u32,
    pub reds: u32,
    /// Backend-weighted sanction total for the window.
    pub total: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanctionsRanking {
    pub temporada_id: u64,
    /// Matches that fell inside the requested week window.
    pub matched_games: u32,
    pub ranking: Vec<SancionRow>,
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Match-list lens: every competition, or competition-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchScope {
    Global,
    Competiciones,
}

impl MatchScope {
    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GLOBAL" => Some(MatchScope::Global),
            "COMPETICIONES" => Some(MatchScope::Competiciones),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchScope::Global => "GLOBAL",
            MatchScope::Competiciones => "COMPETICIONES",
        };
        write!(f, "{s}")
    }
}

/// One fixture inside a weekly match list.
#[derive(Debug, Clone, Serialize)]
pub struct MatchItem {
    pub home_name: String,
    pub away_name: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    /// Kick-off date as reported by the backend (day granularity).
    pub date: Option<NaiveDate>,
    pub grupo_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchList {
    /// Closing Tuesday identifying the requested week.
    pub week: NaiveDate,
    pub scope: MatchScope,
    pub matches: Vec<MatchItem>,
}
