//! Column totals over in-memory record lists
//!
//! Every summary view (debt report, receipt being composed) derives its totals
//! here instead of trusting pre-computed numbers.

use super::sort::Ranked;

/// A record that contributes to a set of column totals
pub trait Summable {
    /// Totals type; `Default` must be the additive identity (all zeros)
    type Totals: Default;

    /// Adds this record's numeric fields into `totals`
    fn accumulate(&self, totals: &mut Self::Totals);
}

/// Sums every record into a fresh totals value. An empty input yields `Default`.
pub fn aggregate<'a, T, I>(items: I) -> T::Totals
where
    T: Summable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(T::Totals::default(), |mut totals, item| {
            item.accumulate(&mut totals);
            totals
        })
}

impl<T: Summable> Summable for Ranked<T> {
    type Totals = T::Totals;

    fn accumulate(&self, totals: &mut Self::Totals) {
        self.item.accumulate(totals);
    }
}
