//! Sortable table header cell
//!
//! ```text
//! <SortableHeaderCell
//!     label="Nợ Cuối"
//!     sort_field="last_debt"
//!     sort_state=Signal::derive(move || sort.get())
//!     on_sort=Callback::new(move |field: String| sort.update(|s| s.toggle(&field)))
//!     align="right"
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::sort::SortState;
use leptos::prelude::*;
use thaw::*;

/// Header cell that shows ▲/▼/⇅ and reports clicks through `on_sort`
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Field name passed to `Sortable::compare_by_field`
    #[prop(into)]
    sort_field: String,

    #[prop(into)]
    sort_state: Signal<SortState>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// left/right
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let handle_click = move |_| {
        on_sort.run(sort_field_for_click.clone());
    };

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=handle_click
            >
                {label}
                <span class=move || sort_state.with(|s| get_sort_class(s, &sort_field_for_class))>
                    {move || sort_state.with(|s| get_sort_indicator(s, &sort_field_for_indicator))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
