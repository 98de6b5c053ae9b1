//! Canonical row construction from the backend's heterogeneous shapes.
//!
//! The backend reports the same concept under several field names
//! depending on the endpoint and scope (`nombre`/`team_name`,
//! `escudo`/`badge`/`logo`, packed or array streaks, string-typed
//! numbers). All alternate-name handling lives here; absent or malformed
//! fields degrade to defaults and never error.

use serde_json::Value;

use crate::types::{Scope, StandingsRow, StreakCode};

/// First present field under any of `names`, as an i64. Accepts numbers
/// and numeric strings — the backend is inconsistent about which it sends.
fn num_field(raw: &Value, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|name| {
        let v = raw.get(name)?;
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

fn str_field(raw: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        raw.get(name)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    })
}

fn count(raw: &Value, names: &[&str]) -> u32 {
    num_field(raw, names).map(|n| n.max(0) as u32).unwrap_or(0)
}

/// Streak fields arrive either as an array of codes or as a packed string
/// (`"VVED"`). Codes are case-insensitive; anything other than V/E/D is
/// dropped.
fn parse_streak(value: &Value) -> Vec<StreakCode> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .filter_map(|s| s.chars().next())
            .filter_map(StreakCode::from_char)
            .collect(),
        Value::String(packed) => packed.chars().filter_map(StreakCode::from_char).collect(),
        _ => Vec::new(),
    }
}

fn scope_points_fields(scope: Scope) -> &'static [&'static str] {
    match scope {
        Scope::Overall => &["puntos", "pts", "points"],
        Scope::Home => &["puntos_casa", "puntos", "pts", "points"],
        Scope::Away => &["puntos_fuera", "puntos", "pts", "points"],
    }
}

/// Map one raw backend row to a canonical [`StandingsRow`].
///
/// Points fall back to the computed `3×won + 1×drawn` when the backend
/// supplies no explicit points field for the scope; goal difference falls
/// back to `for − against`.
pub fn normalize_row(raw: &Value, scope: Scope) -> StandingsRow {
    let played = count(raw, &["pj"]);
    let won = count(raw, &["pg"]);
    let drawn = count(raw, &["pe"]);
    let lost = count(raw, &["pp"]);
    let goals_for = num_field(raw, &["gf"]).unwrap_or(0);
    let goals_against = num_field(raw, &["gc"]).unwrap_or(0);

    let points = num_field(raw, scope_points_fields(scope))
        .unwrap_or_else(|| i64::from(won) * 3 + i64::from(drawn));
    let goal_diff = num_field(raw, &["dg", "diferencia"]).unwrap_or(goals_for - goals_against);

    let streak = ["racha", "racha_reciente", "streak", "forma"]
        .iter()
        .find_map(|name| raw.get(name))
        .map(parse_streak)
        .unwrap_or_default();

    StandingsRow {
        club_id: num_field(raw, &["club_id", "equipo_id", "id"]),
        name: str_field(raw, &["nombre", "team_name"]).unwrap_or_default(),
        slug: str_field(raw, &["slug"]),
        crest: str_field(raw, &["escudo", "badge", "logo"]),
        played,
        won,
        drawn,
        lost,
        goals_for,
        goals_against,
        goal_diff,
        points,
        streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::types::StreakCode::{Draw, Loss, Win};

    #[test]
    fn maps_alternate_field_names() {
        let row = normalize_row(
            &json!({
                "team_name": "CD Ejemplo",
                "badge": "https://cdn/escudo.png",
                "equipo_id": 42,
                "pj": 10, "pg": 6, "pe": 2, "pp": 2,
                "gf": 31, "gc": 18
            }),
            Scope::Overall,
        );
        assert_eq!(row.name, "CD Ejemplo");
        assert_eq!(row.crest.as_deref(), Some("https://cdn/escudo.png"));
        assert_eq!(row.club_id, Some(42));
        assert_eq!(row.played, 10);
        assert_eq!(row.lost, 2);
    }

    #[test]
    fn points_computed_when_absent() {
        let row = normalize_row(&json!({"nombre": "A", "pg": 3, "pe": 1}), Scope::Overall);
        assert_eq!(row.points, 10);
    }

    #[test]
    fn explicit_points_win_over_computed() {
        let row = normalize_row(
            &json!({"nombre": "A", "pg": 3, "pe": 1, "puntos": 9}),
            Scope::Overall,
        );
        assert_eq!(row.points, 9);
    }

    #[test]
    fn scope_specific_points_preferred() {
        let raw = json!({"nombre": "A", "puntos": 20, "puntos_casa": 12, "puntos_fuera": 8});
        assert_eq!(normalize_row(&raw, Scope::Overall).points, 20);
        assert_eq!(normalize_row(&raw, Scope::Home).points, 12);
        assert_eq!(normalize_row(&raw, Scope::Away).points, 8);
    }

    #[test]
    fn goal_diff_defaults_to_for_minus_against() {
        let row = normalize_row(&json!({"nombre": "A", "gf": 12, "gc": 15}), Scope::Overall);
        assert_eq!(row.goal_diff, -3);

        let explicit = normalize_row(&json!({"nombre": "A", "gf": 12, "gc": 15, "dg": 4}), Scope::Overall);
        assert_eq!(explicit.goal_diff, 4);
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let row = normalize_row(&json!({"nombre": "A"}), Scope::Overall);
        assert_eq!(
            (row.played, row.won, row.drawn, row.lost, row.goals_for, row.goals_against),
            (0, 0, 0, 0, 0, 0)
        );
        assert!(row.streak.is_empty());
    }

    #[test]
    fn numeric_strings_accepted() {
        let row = normalize_row(&json!({"nombre": "A", "pj": "10", "gf": "7"}), Scope::Overall);
        assert_eq!(row.played, 10);
        assert_eq!(row.goals_for, 7);
    }

    #[test]
    fn packed_streak_splits_and_uppercases() {
        let row = normalize_row(&json!({"nombre": "A", "racha": "VVED"}), Scope::Overall);
        assert_eq!(row.streak, vec![Win, Win, Draw, Loss]);
    }

    #[test]
    fn array_streak_uppercases() {
        let row = normalize_row(&json!({"nombre": "A", "racha": ["v", "e"]}), Scope::Overall);
        assert_eq!(row.streak, vec![Win, Draw]);
    }

    #[test]
    fn unknown_streak_codes_dropped() {
        let row = normalize_row(&json!({"nombre": "A", "racha": "VX-E"}), Scope::Overall);
        assert_eq!(row.streak, vec![Win, Draw]);
    }

    #[test]
    fn name_falls_back_to_identity_key() {
        let row = normalize_row(&json!({"nombre": "Sin Id"}), Scope::Overall);
        assert_eq!(row.key(), crate::types::RowKey::Name("Sin Id".to_string()));
    }
}
