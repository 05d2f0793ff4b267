/// Sort header helpers shared by list tables
use contracts::shared::sort::{SortDirection, SortState};

/// Sort indicator for a column header
pub fn get_sort_indicator(state: &SortState, field: &str) -> &'static str {
    if state.is_active(field) {
        match state.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    } else {
        " ⇅"
    }
}

/// CSS class of the indicator span
pub fn get_sort_class(state: &SortState, field: &str) -> &'static str {
    if state.is_active(field) {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let state = SortState::new("last_debt", SortDirection::Descending);
        assert_eq!(get_sort_indicator(&state, "last_debt"), " ▼");
        assert_eq!(get_sort_indicator(&state, "agent_name"), " ⇅");

        let state = SortState::new("agent_name", SortDirection::Ascending);
        assert_eq!(get_sort_indicator(&state, "agent_name"), " ▲");
    }

    #[test]
    fn test_sort_class() {
        let state = SortState::new("last_debt", SortDirection::Descending);
        assert!(get_sort_class(&state, "last_debt").ends_with("--active"));
        assert_eq!(get_sort_class(&state, "stt"), "table__sort-indicator");
    }
}
