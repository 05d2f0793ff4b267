use contracts::dashboards::d400_debt_summary::{debt_summary_sheet, DebtSummary};
use contracts::domain::a004_debt_report::DebtRecord;
use contracts::shared::debt_band::{AmountTone, DebtBand, DebtBands};
use contracts::shared::sort::{Ranked, SortState};
use contracts::shared::summary_view::SummaryView;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::export::export_sheet;
use crate::shared::icons::icon;

/// Debt summary table for one period.
///
/// Purely presentational: sorting is local and row actions are reported
/// through the callbacks. The export button writes the rows in the order
/// currently shown.
#[component]
pub fn DebtSummaryTable(
    #[prop(into)]
    summary: Signal<DebtSummary>,
    #[prop(into)]
    loading: Signal<bool>,
    sort: RwSignal<SortState>,
    #[prop(into)]
    bands: Signal<DebtBands>,
    on_view: Callback<DebtRecord>,
    on_edit: Callback<DebtRecord>,
    on_delete: Callback<DebtRecord>,
) -> impl IntoView {
    let (export_error, set_export_error) = signal::<Option<String>>(None);

    let rows = Memo::new(move |_| summary.with(|s| sort.with(|state| s.sorted(state))));
    let sort_state = Signal::derive(move || sort.get());
    let on_sort = Callback::new(move |field: String| sort.update(|s| s.toggle(&field)));

    let on_export = move |_| {
        set_export_error.set(None);
        let layout = summary.with_untracked(|s| {
            debt_summary_sheet(s.month, s.year, &rows.get_untracked(), &s.totals)
        });
        if let Err(e) = export_sheet(&layout) {
            log::error!("Debt summary export failed: {}", e);
            set_export_error.set(Some(format!("Không thể xuất file Excel: {}", e)));
        }
    };

    let totals = move || summary.with(|s| s.totals.clone());

    view! {
        {move || {
            match summary.with(|s| SummaryView::of(loading.get(), s)) {
                SummaryView::Loading => {
                    return view! {
                        <div class="debt-summary__loading">"Đang tải dữ liệu báo cáo công nợ..."</div>
                    }.into_any();
                }
                SummaryView::Empty { period } => {
                    return view! {
                        <div class="debt-summary__empty">
                            {format!("Không có dữ liệu công nợ cho tháng {}", period)}
                        </div>
                    }.into_any();
                }
                SummaryView::Table => {}
            }

            view! {
                <div class="debt-summary">
                    <div class="debt-summary__cards">
                        <StatCard
                            label="Tổng Nợ Đầu"
                            icon_name="debt"
                            value=Signal::derive(move || totals().total_first_debt)
                        />
                        <StatCard
                            label="Tổng Phát Sinh"
                            icon_name="debt"
                            value=Signal::derive(move || totals().total_arisen_debt)
                        />
                        <StatCard
                            label="Tổng Nợ Cuối"
                            icon_name="debt"
                            value=Signal::derive(move || totals().total_last_debt)
                            subtitle=Signal::derive(move || {
                                Some(format!("{} đại lý", summary.with(|s| s.agent_count())))
                            })
                        />
                    </div>

                    <div class="debt-summary__toolbar">
                        <h3 class="debt-summary__title">
                            {move || format!("Báo cáo công nợ tháng {}", summary.with(|s| s.period_label()))}
                        </h3>
                        <Button appearance=ButtonAppearance::Secondary on_click=on_export>
                            {icon("download")}
                            " Xuất Excel"
                        </Button>
                    </div>
                    {move || export_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=60.0>"STT"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Tên Đại Lý"
                                        sort_field="agent_name"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=200.0
                                    />
                                    <SortableHeaderCell
                                        label="Nợ Đầu"
                                        sort_field="first_debt"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=130.0
                                        align="right"
                                    />
                                    <SortableHeaderCell
                                        label="Phát Sinh"
                                        sort_field="arisen_debt"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=130.0
                                        align="right"
                                    />
                                    <SortableHeaderCell
                                        label="Nợ Cuối"
                                        sort_field="last_debt"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=130.0
                                        align="right"
                                    />
                                    <TableHeaderCell min_width=120.0>"Thao tác"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>

                            <TableBody>
                                <For
                                    each=move || rows.get()
                                    key={|row: &Ranked<DebtRecord>| (row.stt, row.item.key())}
                                    children={move |row: Ranked<DebtRecord>| {
                                        let band_class = bands.with_untracked(|b| b.classify(row.item.last_debt).css_class());
                                        let for_view = row.item.clone();
                                        let for_edit = row.item.clone();
                                        let for_delete = row.item.clone();
                                        view! {
                                            <TableRow class=band_class>
                                                <TableCell>
                                                    <TableCellLayout>{row.stt}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <span style="font-weight: 500;">{row.item.agent_name.clone()}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCellMoney value=row.item.first_debt />
                                                <TableCellMoney value=row.item.arisen_debt />
                                                <TableCellMoney value=row.item.last_debt bold=true />
                                                <TableCell>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| on_view.run(for_view.clone())
                                                        attr:title="Xem chi tiết"
                                                    >
                                                        {icon("eye")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| on_edit.run(for_edit.clone())
                                                        attr:title="Sửa"
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| on_delete.run(for_delete.clone())
                                                        attr:title="Xóa"
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }}
                                />
                            </TableBody>

                            <tfoot>
                                <TableTotalsRow
                                    label=Signal::derive(move || {
                                        format!("TỔNG CỘNG ({} đại lý)", summary.with(|s| s.agent_count()))
                                    })
                                    label_span=2
                                >
                                    <td class=move || total_class(totals().total_first_debt)>
                                        {move || format_money(totals().total_first_debt)}
                                    </td>
                                    <td class=move || total_class(totals().total_arisen_debt)>
                                        {move || format_money(totals().total_arisen_debt)}
                                    </td>
                                    <td class=move || total_class(totals().total_last_debt)>
                                        {move || format_money(totals().total_last_debt)}
                                    </td>
                                    <td></td>
                                </TableTotalsRow>
                            </tfoot>
                        </Table>
                    </div>

                    <DebtBandLegend bands=bands />
                </div>
            }.into_any()
        }}
    }
}

fn total_class(amount: i64) -> String {
    format!("text-right amount amount--bold {}", AmountTone::of(amount).css_class())
}

#[component]
fn DebtBandLegend(#[prop(into)] bands: Signal<DebtBands>) -> impl IntoView {
    view! {
        <div class="debt-legend">
            <span class="debt-legend__title">"Chú thích:"</span>
            {move || {
                let bands = bands.get();
                DebtBand::ALL
                    .iter()
                    .map(|band| {
                        view! {
                            <span class=format!("debt-legend__item {}", band.css_class())>
                                <span class="debt-legend__swatch"></span>
                                {bands.legend(*band)}
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
