//! Week-over-week position movement.

use std::collections::HashMap;

use crate::types::{PositionDelta, RowKey, StandingsRow};

/// Compare each current row's 1-based rank against the previous table.
///
/// Both tables are taken in their already-sorted display order. A team
/// absent from the previous table gets `Same` (no movement icon).
pub fn compute_delta(
    current: &[StandingsRow],
    previous: &[StandingsRow],
) -> HashMap<RowKey, PositionDelta> {
    let previous_ranks: HashMap<RowKey, usize> = previous
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.key(), idx + 1))
        .collect();

    current
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let rank = idx + 1;
            let delta = match previous_ranks.get(&row.key()) {
                Some(&prev_rank) if rank < prev_rank => PositionDelta::Up,
                Some(&prev_rank) if rank > prev_rank => PositionDelta::Down,
                _ => PositionDelta::Same,
            };
            (row.key(), delta)
        })
        .collect()
}

/// The round to diff against: the largest available round strictly below
/// the applied one. None when the applied round is the earliest available
/// (nothing to compare) or not listed.
pub fn previous_round(rounds_available: &[u32], applied: u32) -> Option<u32> {
    rounds_available.iter().copied().filter(|&r| r < applied).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, club_id: Option<i64>) -> StandingsRow {
        StandingsRow {
            club_id,
            name: name.to_string(),
            slug: None,
            crest: None,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            points: 0,
            streak: Vec::new(),
        }
    }

    #[test]
    fn climb_from_third_to_first_is_up() {
        let previous = vec![row("B", Some(2)), row("C", Some(3)), row("A", Some(1))];
        let current = vec![row("A", Some(1)), row("B", Some(2)), row("C", Some(3))];

        let deltas = compute_delta(&current, &previous);
        assert_eq!(deltas[&RowKey::Id(1)], PositionDelta::Up);
        assert_eq!(deltas[&RowKey::Id(2)], PositionDelta::Down);
        assert_eq!(deltas[&RowKey::Id(3)], PositionDelta::Down);
    }

    #[test]
    fn unchanged_rank_is_same() {
        let table = vec![row("A", Some(1)), row("B", Some(2))];
        let deltas = compute_delta(&table, &table);
        assert!(deltas.values().all(|&d| d == PositionDelta::Same));
    }

    #[test]
    fn absent_from_previous_is_same() {
        let previous = vec![row("A", Some(1))];
        let current = vec![row("A", Some(1)), row("Nuevo", Some(9))];
        let deltas = compute_delta(&current, &previous);
        assert_eq!(deltas[&RowKey::Id(9)], PositionDelta::Same);
    }

    #[test]
    fn falls_back_to_name_identity_without_club_id() {
        let previous = vec![row("B", None), row("A", None)];
        let current = vec![row("A", None), row("B", None)];
        let deltas = compute_delta(&current, &previous);
        assert_eq!(deltas[&RowKey::Name("A".to_string())], PositionDelta::Up);
        assert_eq!(deltas[&RowKey::Name("B".to_string())], PositionDelta::Down);
    }

    #[test]
    fn empty_previous_gives_all_same() {
        let current = vec![row("A", Some(1)), row("B", Some(2))];
        let deltas = compute_delta(&current, &[]);
        assert_eq!(deltas.len(), 2);
        assert!(deltas.values().all(|&d| d == PositionDelta::Same));
    }

    #[test]
    fn previous_round_picks_largest_below_applied() {
        assert_eq!(previous_round(&[1, 2, 3, 5], 5), Some(3));
        assert_eq!(previous_round(&[1, 2, 3], 2), Some(1));
        assert_eq!(previous_round(&[1, 2, 3], 1), None);
        assert_eq!(previous_round(&[], 4), None);
    }
}
