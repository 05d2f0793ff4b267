use contracts::dashboards::d401_sales_report::{
    default_sales_sort, sales_report_sheet, AgentSales, SalesSummary,
};
use contracts::domain::a005_receipt::{ReceiptKind, StoredReceipt};
use contracts::shared::sort::{sort_by_state, Ranked, SortDirection, SortState};
use contracts::shared::summary_view::{apply_fetch, SummaryView};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_receipt::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::date_utils::current_month_year;
use crate::shared::export::export_sheet;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::state::RequestSeq;

/// Monthly sales per agent, derived from the stored export receipts
#[component]
pub fn SalesReportPage() -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));

    let (current_month, current_year) = current_month_year();
    let month = RwSignal::new(current_month);
    let year = RwSignal::new(current_year);

    let exports = RwSignal::new(Vec::<StoredReceipt>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (export_error, set_export_error) = signal(None::<String>);
    let sort = RwSignal::new(default_sales_sort());
    let seq = StoredValue::new(RequestSeq::new());
    let inspecting = RwSignal::new(None::<AgentSales>);

    let summary = Memo::new(move |_| {
        exports.with(|all| SalesSummary::for_period(month.get(), year.get(), all))
    });
    let rows = Memo::new(move |_| summary.with(|s| sort.with(|state| s.sorted(state))));
    let totals = move || summary.with(|s| s.totals);

    let load = move || {
        let mut ticket = None;
        seq.update_value(|s| ticket = Some(s.issue()));
        let Some(ticket) = ticket else { return };

        set_loading.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let result = api::fetch_all(&client, ReceiptKind::Export).await;
            if !seq.with_value(|s| s.is_current(ticket)) {
                log::warn!("Dropping superseded sales response");
                return;
            }
            let mut failure = None;
            exports.update(|all| failure = apply_fetch(all, result));
            if let Some(e) = failure {
                log::error!("Loading export receipts failed: {}", e);
                set_error.set(Some(e.user_message()));
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_export = move |_| {
        set_export_error.set(None);
        let layout = summary.with_untracked(|s| {
            sales_report_sheet(s.month, s.year, &rows.get_untracked(), &s.totals)
        });
        if let Err(e) = export_sheet(&layout) {
            log::error!("Sales report export failed: {}", e);
            set_export_error.set(Some(format!("Không thể xuất file Excel: {}", e)));
        }
    };

    let sort_state = Signal::derive(move || sort.get());
    let on_sort = Callback::new(move |field: String| sort.update(|s| s.toggle(&field)));

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Báo cáo doanh số"</h1>
                </div>
                <div class="page__header-right">
                    <MonthSelector
                        month=month
                        year=year
                        on_select=Callback::new(move |_| set_export_error.set(None))
                        disabled=Signal::derive(move || loading.get())
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Đang tải..." } else { " Làm mới" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                {move || {
                    match summary.with(|s| SummaryView::of(loading.get(), s)) {
                        SummaryView::Loading => {
                            return view! {
                                <div class="sales-report__loading">"Đang tải dữ liệu doanh số..."</div>
                            }.into_any();
                        }
                        SummaryView::Empty { period } => {
                            return view! {
                                <div class="sales-report__empty">
                                    {format!("Không có phiếu xuất nào trong tháng {}", period)}
                                </div>
                            }.into_any();
                        }
                        SummaryView::Table => {}
                    }

                    view! {
                        <div class="sales-report">
                            <div class="sales-report__cards">
                                <StatCard
                                    label="Tổng Doanh Thu"
                                    icon_name="sales"
                                    value=Signal::derive(move || totals().total_revenue)
                                    toned=false
                                />
                                <StatCard
                                    label="Đại Lý Có Giao Dịch"
                                    icon_name="agents"
                                    value=Signal::derive(move || totals().agent_count)
                                    toned=false
                                    money=false
                                />
                                <StatCard
                                    label="Tổng Số Phiếu Xuất"
                                    icon_name="export"
                                    value=Signal::derive(move || totals().export_count)
                                    toned=false
                                    money=false
                                />
                            </div>

                            <div class="sales-report__toolbar">
                                <h3 class="sales-report__title">
                                    {move || format!("Doanh số tháng {}", summary.with(|s| s.period_label()))}
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
                                                label="Số Phiếu Xuất"
                                                sort_field="export_count"
                                                sort_state=sort_state
                                                on_sort=on_sort
                                                min_width=110.0
                                                align="right"
                                            />
                                            <SortableHeaderCell
                                                label="Tổng Trị Giá"
                                                sort_field="total_amount"
                                                sort_state=sort_state
                                                on_sort=on_sort
                                                min_width=140.0
                                                align="right"
                                            />
                                            <SortableHeaderCell
                                                label="Tỷ Lệ (%)"
                                                sort_field="ratio"
                                                sort_state=sort_state
                                                on_sort=on_sort
                                                min_width=100.0
                                                align="right"
                                            />
                                            <TableHeaderCell min_width=70.0>"Xem"</TableHeaderCell>
                                        </TableRow>
                                    </TableHeader>

                                    <TableBody>
                                        <For
                                            each=move || rows.get()
                                            key={|row: &Ranked<AgentSales>| (row.stt, row.item.agent_id)}
                                            children={move |row: Ranked<AgentSales>| {
                                                let for_view = row.item.clone();
                                                let agent_name = row.item.agent_name.clone();
                                                let tier_class = row.item.tier().css_class();
                                                let ratio_label = format!("{}%", row.item.ratio_label());
                                                view! {
                                                    <TableRow>
                                                        <TableCell>
                                                            <TableCellLayout>{row.stt}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout truncate=true>
                                                                <span style="font-weight: 500;">{agent_name}</span>
                                                            </TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <TableCellLayout>{row.item.export_count}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCellMoney value=row.item.total_amount color_by_tone=false bold=true />
                                                        <TableCell>
                                                            <span class=tier_class>
                                                                {ratio_label}
                                                            </span>
                                                        </TableCell>
                                                        <TableCell>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| inspecting.set(Some(for_view.clone()))
                                                                attr:title="Xem chi tiết"
                                                            >
                                                                {icon("eye")}
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
                                                format!("TỔNG CỘNG ({} đại lý)", totals().agent_count)
                                            })
                                            label_span=2
                                        >
                                            <td class="text-right">{move || totals().export_count}</td>
                                            <td class="text-right amount amount--bold">
                                                {move || format_money(totals().total_revenue)}
                                            </td>
                                            <td></td>
                                            <td></td>
                                        </TableTotalsRow>
                                    </tfoot>
                                </Table>
                            </div>
                        </div>
                    }.into_any()
                }}
            </div>

            {move || inspecting.get().map(|sales| {
                let receipts = exports.with_untracked(|all| {
                    agent_receipts(all, sales.agent_id, month.get_untracked(), year.get_untracked())
                });
                view! {
                    <AgentSalesDetail
                        sales=sales
                        receipts=receipts
                        on_close=Callback::new(move |_| inspecting.set(None))
                    />
                }
            })}
        </div>
    }
}

/// One agent's exports in the month, newest first
fn agent_receipts(all: &[StoredReceipt], agent_id: i32, month: u32, year: i32) -> Vec<Ranked<StoredReceipt>> {
    let own: Vec<StoredReceipt> = all
        .iter()
        .filter(|r| r.agent_id() == Some(agent_id) && r.is_in_period(month, year))
        .cloned()
        .collect();
    sort_by_state(&own, &SortState::new("create_date", SortDirection::Descending))
}

#[component]
fn AgentSalesDetail(
    sales: AgentSales,
    receipts: Vec<Ranked<StoredReceipt>>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal title=format!("Chi Tiết Báo Cáo - {}", sales.agent_name) on_close=on_close class="modal--wide">
            <div class="detail">
                <div class="detail__row">
                    <span class="detail__label">"Số phiếu xuất"</span>
                    <span class="detail__value">{sales.export_count}</span>
                </div>
                <div class="detail__row">
                    <span class="detail__label">"Tổng trị giá"</span>
                    <span class="detail__value">{format_money(sales.total_amount)}</span>
                </div>
                <div class="detail__row">
                    <span class="detail__label">"Tỷ lệ"</span>
                    <span class=sales.tier().css_class()>{format!("{}%", sales.ratio_label())}</span>
                </div>
            </div>
            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=50.0>"STT"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Mã phiếu"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Ngày lập"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"Tổng tiền"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"Còn lại"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {receipts
                            .into_iter()
                            .map(|row| {
                                let date_label = row.item.date_label();
                                view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{row.stt}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{format!("#{}", row.item.receipt_id)}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{date_label}</TableCellLayout>
                                    </TableCell>
                                    <TableCellMoney value=row.item.total_amount color_by_tone=false />
                                    <TableCellMoney value={row.item.remaining_amount()} />
                                </TableRow>
                                }
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a001_agent::AgentRef;

    fn export(id: i32, agent_id: i32, day: u32, month: u32) -> StoredReceipt {
        StoredReceipt {
            kind: ReceiptKind::Export,
            receipt_id: id,
            create_date: NaiveDate::from_ymd_opt(2024, month, day),
            agent: Some(AgentRef {
                agent_id,
                agent_name: format!("Đại lý {}", agent_id),
            }),
            total_amount: 1_000,
            paid_amount: 0,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_agent_receipts_newest_first() {
        let all = vec![
            export(1, 1, 2, 6),
            export(2, 2, 3, 6),
            export(3, 1, 20, 6),
            export(4, 1, 1, 7),
        ];
        let rows = agent_receipts(&all, 1, 6, 2024);
        let ids: Vec<(usize, i32)> = rows.iter().map(|r| (r.stt, r.item.receipt_id)).collect();
        assert_eq!(ids, vec![(1, 3), (2, 1)]);
    }
}
