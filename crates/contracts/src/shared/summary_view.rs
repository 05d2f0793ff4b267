//! Loading/empty/table choice shared by the period summary screens

/// A per-period summary shown as one table
pub trait PeriodSummary {
    fn is_empty(&self) -> bool;
    /// "m/yyyy"
    fn period_label(&self) -> String;
}

/// What the summary area renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    Loading,
    Empty { period: String },
    Table,
}

impl SummaryView {
    pub fn of<S: PeriodSummary>(loading: bool, summary: &S) -> Self {
        if loading {
            SummaryView::Loading
        } else if summary.is_empty() {
            SummaryView::Empty {
                period: summary.period_label(),
            }
        } else {
            SummaryView::Table
        }
    }
}

/// Stores a finished fetch. A failure keeps the records already shown and is
/// handed back to the caller.
pub fn apply_fetch<T, E>(records: &mut Vec<T>, result: Result<Vec<T>, E>) -> Option<E> {
    match result {
        Ok(fresh) => {
            *records = fresh;
            None
        }
        Err(e) => Some(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_fetch() {
        let mut rows = vec![1, 2, 3];
        assert_eq!(apply_fetch(&mut rows, Err("offline")), Some("offline"));
        assert_eq!(rows, vec![1, 2, 3]);

        assert_eq!(apply_fetch::<i32, &str>(&mut rows, Ok(Vec::new())), None);
        assert!(rows.is_empty());
    }
}
