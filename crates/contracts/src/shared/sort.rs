//! Ranked table ordering shared by every sortable list
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Compares two records by the named field; unknown fields compare equal
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// Current sort column and direction of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Header click: the active ascending column flips to descending,
    /// anything else becomes ascending on the clicked column.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field && self.direction == SortDirection::Ascending {
            self.direction = SortDirection::Descending;
        } else {
            self.field = field.to_string();
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn is_active(&self, field: &str) -> bool {
        self.field == field
    }
}

/// A record with its 1-based position ("STT") in the current ordering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub stt: usize,
    pub item: T,
}

/// Returns a sorted copy with `stt` recomputed as `index + 1`.
///
/// The sort is stable: equal keys keep their incoming order, so sorting an
/// already sorted list changes nothing.
pub fn sort_ranked<T: Sortable + Clone>(
    items: &[T],
    field: &str,
    direction: SortDirection,
) -> Vec<Ranked<T>> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| direction.apply(a.compare_by_field(b, field)));
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, item)| Ranked {
            stt: index + 1,
            item,
        })
        .collect()
}

/// Same as [`sort_ranked`] driven by a [`SortState`]
pub fn sort_by_state<T: Sortable + Clone>(items: &[T], state: &SortState) -> Vec<Ranked<T>> {
    sort_ranked(items, &state.field, state.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        amount: i64,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                "amount" => self.amount.cmp(&other.amount),
                _ => Ordering::Equal,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "c", amount: 5 },
            Row { name: "a", amount: 5 },
            Row { name: "b", amount: -1 },
            Row { name: "d", amount: 12 },
        ]
    }

    #[test]
    fn test_rank_matches_position() {
        let sorted = sort_ranked(&rows(), "amount", SortDirection::Descending);
        for (index, ranked) in sorted.iter().enumerate() {
            assert_eq!(ranked.stt, index + 1);
        }
        let amounts: Vec<i64> = sorted.iter().map(|r| r.item.amount).collect();
        assert_eq!(amounts, vec![12, 5, 5, -1]);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let asc = sort_ranked(&rows(), "amount", SortDirection::Ascending);
        let names: Vec<&str> = asc.iter().map(|r| r.item.name).collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);

        let desc = sort_ranked(&rows(), "amount", SortDirection::Descending);
        let names: Vec<&str> = desc.iter().map(|r| r.item.name).collect();
        assert_eq!(names, vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn test_sorting_twice_is_idempotent() {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let once: Vec<Row> = sort_ranked(&rows(), "amount", direction)
                .into_iter()
                .map(|r| r.item)
                .collect();
            let twice: Vec<Row> = sort_ranked(&once, "amount", direction)
                .into_iter()
                .map(|r| r.item)
                .collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unknown_field_preserves_order() {
        let sorted = sort_ranked(&rows(), "missing", SortDirection::Descending);
        let names: Vec<&str> = sorted.iter().map(|r| r.item.name).collect();
        assert_eq!(names, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<Row> = Vec::new();
        assert!(sort_ranked(&empty, "name", SortDirection::Ascending).is_empty());
    }

    #[test]
    fn test_toggle_semantics() {
        let mut state = SortState::new("last_debt", SortDirection::Descending);

        // active descending column resets to ascending
        state.toggle("last_debt");
        assert_eq!(state, SortState::new("last_debt", SortDirection::Ascending));

        state.toggle("last_debt");
        assert_eq!(state, SortState::new("last_debt", SortDirection::Descending));

        state.toggle("agent_name");
        assert_eq!(state, SortState::new("agent_name", SortDirection::Ascending));
        assert!(state.is_active("agent_name"));
        assert!(!state.is_active("last_debt"));
    }
}
