//! Table cell for VND amounts
//!
//! ```text
//! <TableCellMoney value=record.last_debt />
//! <TableCellMoney value=totals.total_last_debt bold=true />
//! <TableCellMoney value=line.total_price() color_by_tone=false />
//! ```

use super::number_format::format_money;
use contracts::shared::debt_band::AmountTone;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned, dot-grouped amount.
/// Positive (owed) amounts use the red family, negative (credit) the green one.
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<i64>,

    /// Colour the amount by owed/credit tone
    #[prop(optional, default = true)]
    color_by_tone: bool,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let cell_class = move || {
        let mut classes = vec!["amount"];
        if color_by_tone {
            classes.push(AmountTone::of(value.get()).css_class());
        }
        if bold {
            classes.push("amount--bold");
        }
        classes.join(" ")
    };

    view! {
        <TableCell class="text-right">
            <span class=cell_class>
                {move || format_money(value.get())}
            </span>
        </TableCell>
    }
}
