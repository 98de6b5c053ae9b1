//! Column sorting for standings views.
//!
//! Position is not a sortable field — it is purely positional. Everything
//! else sorts stably with a fixed tie-break: goal difference following the
//! primary direction, then name ascending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::StandingsRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    GoalDiff,
    Points,
}

impl SortField {
    /// Column keys as the standings views name them.
    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nombre" | "name" => Some(SortField::Name),
            "pj" => Some(SortField::Played),
            "pg" => Some(SortField::Won),
            "pe" => Some(SortField::Drawn),
            "pp" => Some(SortField::Lost),
            "gf" => Some(SortField::GoalsFor),
            "gc" => Some(SortField::GoalsAgainst),
            "dg" => Some(SortField::GoalDiff),
            "pts" | "puntos" => Some(SortField::Points),
            _ => None,
        }
    }

    /// Direction a freshly selected column starts in: ascending for the
    /// name column, descending for every numeric one.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Name => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Current sort selection, with the column-header toggle rules: re-selecting
/// the active column flips direction, selecting a new one resets to that
/// column's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField) -> Self {
        Self { field, direction: field.default_direction() }
    }

    pub fn toggle(&mut self, requested: SortField) {
        if self.field == requested {
            self.direction = self.direction.flip();
        } else {
            *self = SortState::new(requested);
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        SortState::new(SortField::Points)
    }
}

fn compare_primary(a: &StandingsRow, b: &StandingsRow, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Played => a.played.cmp(&b.played),
        SortField::Won => a.won.cmp(&b.won),
        SortField::Drawn => a.drawn.cmp(&b.drawn),
        SortField::Lost => a.lost.cmp(&b.lost),
        SortField::GoalsFor => a.goals_for.cmp(&b.goals_for),
        SortField::GoalsAgainst => a.goals_against.cmp(&b.goals_against),
        SortField::GoalDiff => a.goal_diff.cmp(&b.goal_diff),
        SortField::Points => a.points.cmp(&b.points),
    }
}

/// Full row ordering under `field`/`direction`: primary comparison, then
/// goal difference following the primary direction, then name ascending
/// regardless of direction.
pub fn row_ordering(
    a: &StandingsRow,
    b: &StandingsRow,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let primary = direction.apply(compare_primary(a, b, field));
    if primary != Ordering::Equal {
        return primary;
    }
    let by_goal_diff = direction.apply(a.goal_diff.cmp(&b.goal_diff));
    if by_goal_diff != Ordering::Equal {
        return by_goal_diff;
    }
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Stable sort under `field`/`direction` with the tie-break above.
pub fn sort_rows(rows: &mut [StandingsRow], field: SortField, direction: SortDirection) {
    rows.sort_by(|a, b| row_ordering(a, b, field, direction));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, points: i64, goal_diff: i64) -> StandingsRow {
        StandingsRow {
            club_id: None,
            name: name.to_string(),
            slug: None,
            crest: None,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff,
            points,
            streak: Vec::new(),
        }
    }

    fn names(rows: &[StandingsRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn points_desc_with_goal_diff_tiebreak() {
        let mut rows = vec![row("A", 10, -2), row("B", 12, 0), row("C", 10, 5)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        assert_eq!(names(&rows), ["B", "C", "A"]);
    }

    #[test]
    fn full_tie_falls_back_to_name_ascending_in_both_directions() {
        let mut rows = vec![row("Zeta", 10, 0), row("alfa", 10, 0)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        assert_eq!(names(&rows), ["alfa", "Zeta"]);

        let mut rows = vec![row("Zeta", 10, 0), row("alfa", 10, 0)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Asc);
        assert_eq!(names(&rows), ["alfa", "Zeta"]);
    }

    #[test]
    fn goal_diff_tiebreak_follows_primary_direction() {
        let mut rows = vec![row("A", 10, 3), row("B", 10, 7)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        assert_eq!(names(&rows), ["B", "A"]);

        let mut rows = vec![row("A", 10, 3), row("B", 10, 7)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Asc);
        assert_eq!(names(&rows), ["A", "B"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut rows = vec![row("C", 8, 1), row("A", 10, -1), row("B", 10, 4)];
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        let once = names(&rows).into_iter().map(String::from).collect::<Vec<_>>();
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        assert_eq!(names(&rows), once);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let mut rows = vec![row("beta", 1, 0), row("Alfa", 2, 0), row("CARMEN", 3, 0)];
        sort_rows(&mut rows, SortField::Name, SortDirection::Asc);
        assert_eq!(names(&rows), ["Alfa", "beta", "CARMEN"]);
    }

    #[test]
    fn toggle_same_field_flips_direction() {
        let mut state = SortState::new(SortField::Points);
        assert_eq!(state.direction, SortDirection::Desc);
        state.toggle(SortField::Points);
        assert_eq!(state.direction, SortDirection::Asc);
        state.toggle(SortField::Points);
        assert_eq!(state.direction, SortDirection::Desc);
    }

    #[test]
    fn toggle_new_field_resets_to_its_default() {
        let mut state = SortState::new(SortField::Points);
        state.toggle(SortField::Name);
        assert_eq!(state, SortState { field: SortField::Name, direction: SortDirection::Asc });
        state.toggle(SortField::GoalsFor);
        assert_eq!(state, SortState { field: SortField::GoalsFor, direction: SortDirection::Desc });
    }

    #[test]
    fn computed_points_tie_orders_by_name() {
        // Neither row carries explicit points; both normalize to 3×3+1 = 10
        // with goal difference 0, so the name tie-break decides.
        let mut rows = vec![
            crate::standings::normalize_row(
                &serde_json::json!({"nombre": "B", "pg": 3, "pe": 1, "pp": 0}),
                crate::types::Scope::Overall,
            ),
            crate::standings::normalize_row(
                &serde_json::json!({"nombre": "A", "pg": 3, "pe": 1, "pp": 0}),
                crate::types::Scope::Overall,
            ),
        ];
        sort_rows(&mut rows, SortField::Points, SortDirection::Desc);
        assert_eq!(rows[0].points, 10);
        assert_eq!(names(&rows), ["A", "B"]);
    }

    #[test]
    fn sort_param_keys() {
        assert_eq!(SortField::from_param("pts"), Some(SortField::Points));
        assert_eq!(SortField::from_param("NOMBRE"), Some(SortField::Name));
        assert_eq!(SortField::from_param("pos"), None);
    }
}
