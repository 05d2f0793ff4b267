use leptos::prelude::*;

/// Footer row: a label cell spanning the leading columns, then the given cells.
///
/// ```text
/// <TableTotalsRow label="TỔNG CỘNG" label_span=3>
///     <td class="text-right">{format_money(totals.total_amount)}</td>
/// </TableTotalsRow>
/// ```
#[component]
pub fn TableTotalsRow(
    #[prop(into)]
    label: Signal<String>,
    /// Number of columns the label covers
    #[prop(optional, default = 1)]
    label_span: u32,
    children: Children,
) -> impl IntoView {
    view! {
        <tr class="table__totals-row">
            <td class="table__totals-label" colspan=label_span.to_string()>
                {move || label.get()}
            </td>
            {children()}
        </tr>
    }
}
