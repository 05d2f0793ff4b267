use contracts::domain::a005_receipt::{
    default_history_sort, ReceiptFilter, ReceiptKind, StoredReceipt,
};
use contracts::shared::aggregate::aggregate;
use contracts::shared::paging::paginate;
use contracts::shared::sort::{sort_by_state, Ranked};
use contracts::shared::summary_view::apply_fetch;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::detail::ReceiptDetail;
use crate::domain::a001_agent::api as agent_api;
use crate::domain::a005_receipt::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::pagination_controls::{PaginationControls, DEFAULT_PAGE_SIZE};
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::icons::icon;
use crate::shared::state::{CatalogStore, RequestSeq};

/// Read-only list of stored receipts of one kind: search, agent filter
/// (exports), local sorting and paging, and a detail dialog per row
#[component]
pub fn ReceiptHistoryPage(kind: ReceiptKind) -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));
    let store = use_context::<CatalogStore>().expect("CatalogStore not found");
    let is_export = kind == ReceiptKind::Export;

    let receipts = RwSignal::new(Vec::<StoredReceipt>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let seq = StoredValue::new(RequestSeq::new());

    let filter = RwSignal::new(ReceiptFilter::default());
    let sort = RwSignal::new(default_history_sort());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(DEFAULT_PAGE_SIZE);
    let viewing = RwSignal::new(None::<i32>);

    let filtered = Memo::new(move |_| receipts.with(|all| filter.with(|f| f.apply(all))));
    let totals = Memo::new(move |_| filtered.with(|rows| aggregate::<StoredReceipt, _>(rows)));
    let current = Memo::new(move |_| {
        let ranked: Vec<Ranked<StoredReceipt>> =
            filtered.with(|rows| sort.with(|state| sort_by_state(rows, state)));
        paginate(&ranked, page.get(), page_size.get())
    });

    let load = move || {
        let mut ticket = None;
        seq.update_value(|s| ticket = Some(s.issue()));
        let Some(ticket) = ticket else { return };

        set_loading.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let result = api::fetch_all(&client, kind).await;
            if !seq.with_value(|s| s.is_current(ticket)) {
                log::warn!("Dropping superseded receipt list response");
                return;
            }
            let mut failure = None;
            receipts.update(|all| failure = apply_fetch(all, result));
            if let Some(e) = failure {
                log::error!("Loading {} list failed: {}", kind.file_prefix(), e);
                set_error.set(Some(e.user_message()));
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load();
        if is_export && !store.agents_loaded.get_untracked() {
            let client = client.get_value();
            spawn_local(async move {
                match agent_api::fetch_agents(&client).await {
                    Ok(agents) => store.replace_agents(agents),
                    Err(e) => log::error!("Loading agents failed: {}", e),
                }
            });
        }
    });

    let sort_state = Signal::derive(move || sort.get());
    let on_sort = Callback::new(move |field: String| sort.update(|s| s.toggle(&field)));
    let set_query = move |query: String| {
        filter.update(|f| f.query = query);
        page.set(0);
    };
    let set_agent = move |raw: String| {
        filter.update(|f| f.agent_id = raw.parse().ok());
        page.set(0);
    };
    let label_span = if is_export { 4 } else { 3 };
    let placeholder = if is_export {
        "Tìm theo mã phiếu, đại lý..."
    } else {
        "Tìm theo mã phiếu..."
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {match kind {
                            ReceiptKind::Import => "Lịch sử phiếu nhập",
                            ReceiptKind::Export => "Lịch sử phiếu xuất",
                        }}
                    </h1>
                </div>
                <div class="page__header-right">
                    <input
                        type="search"
                        class="history__search"
                        placeholder=placeholder
                        prop:value=move || filter.with(|f| f.query.clone())
                        on:input=move |ev| set_query(event_target_value(&ev))
                    />
                    {is_export.then(|| view! {
                        <select
                            class="history__agent-filter"
                            prop:value=move || filter.with(|f| f.agent_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| set_agent(event_target_value(&ev))
                        >
                            <option value="">"Tất cả đại lý"</option>
                            <For
                                each=move || store.agents.get()
                                key=|a| a.agent_id
                                children=move |a| view! {
                                    <option value=a.agent_id.to_string()>{a.agent_name.clone()}</option>
                                }
                            />
                        </select>
                    })}
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

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=60.0>"STT"</TableHeaderCell>
                                <SortableHeaderCell
                                    label="Mã phiếu"
                                    sort_field="receipt_id"
                                    sort_state=sort_state
                                    on_sort=on_sort
                                    min_width=90.0
                                />
                                <SortableHeaderCell
                                    label="Ngày lập"
                                    sort_field="create_date"
                                    sort_state=sort_state
                                    on_sort=on_sort
                                    min_width=110.0
                                />
                                {is_export.then(|| view! {
                                    <SortableHeaderCell
                                        label="Đại lý"
                                        sort_field="agent_name"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=180.0
                                    />
                                })}
                                <SortableHeaderCell
                                    label="Tổng tiền"
                                    sort_field="total_amount"
                                    sort_state=sort_state
                                    on_sort=on_sort
                                    min_width=130.0
                                    align="right"
                                />
                                {is_export.then(|| view! {
                                    <SortableHeaderCell
                                        label="Đã trả"
                                        sort_field="paid_amount"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=130.0
                                        align="right"
                                    />
                                    <SortableHeaderCell
                                        label="Còn lại"
                                        sort_field="remaining_amount"
                                        sort_state=sort_state
                                        on_sort=on_sort
                                        min_width=130.0
                                        align="right"
                                    />
                                    <TableHeaderCell min_width=140.0>"Trạng thái"</TableHeaderCell>
                                })}
                                <TableHeaderCell min_width=70.0>"Xem"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || current.with(|p| p.items.clone())
                                key={|row: &Ranked<StoredReceipt>| (row.stt, row.item.receipt_id)}
                                children={move |row: Ranked<StoredReceipt>| {
                                    let receipt_id = row.item.receipt_id;
                                    let status = row.item.payment_status();
                                    let date_label = row.item.date_label();
                                    let agent_name = row.item.agent_name().to_string();
                                    let total_amount = row.item.total_amount;
                                    let paid_amount = row.item.paid_amount;
                                    let remaining_amount = row.item.remaining_amount();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{row.stt}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format!("#{}", receipt_id)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{date_label}</TableCellLayout>
                                            </TableCell>
                                            {is_export.then(|| view! {
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        {agent_name.clone()}
                                                    </TableCellLayout>
                                                </TableCell>
                                            })}
                                            <TableCellMoney value=total_amount color_by_tone=false bold=true />
                                            {is_export.then(|| view! {
                                                <TableCellMoney value=paid_amount color_by_tone=false />
                                                <TableCellMoney value=remaining_amount />
                                                <TableCell>
                                                    {status.map(|s| view! { <span class=s.css_class()>{s.label()}</span> })}
                                                </TableCell>
                                            })}
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| viewing.set(Some(receipt_id))
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
                                    format!("TỔNG CỘNG ({} phiếu)", totals.with(|t| t.receipt_count))
                                })
                                label_span=label_span
                            >
                                <td class="text-right amount amount--bold">
                                    {move || format_money(totals.with(|t| t.total_amount))}
                                </td>
                                {is_export.then(|| view! {
                                    <td class="text-right amount">
                                        {move || format_money(totals.with(|t| t.paid_amount))}
                                    </td>
                                    <td class="text-right amount amount--bold">
                                        {move || format_money(totals.with(|t| t.remaining_amount))}
                                    </td>
                                    <td></td>
                                })}
                                <td></td>
                            </TableTotalsRow>
                        </tfoot>
                    </Table>
                </div>

                {move || (!loading.get() && current.with(|p| p.total_count == 0)).then(|| view! {
                    <div class="history__empty">"Không có phiếu nào"</div>
                })}

                <PaginationControls
                    current_page=Signal::derive(move || current.with(|p| p.page))
                    total_pages=Signal::derive(move || current.with(|p| p.total_pages))
                    total_count=Signal::derive(move || current.with(|p| p.total_count))
                    page_size=page_size
                    on_page_change=Callback::new(move |p: usize| page.set(p))
                    on_page_size_change=Callback::new(move |size: usize| {
                        page_size.set(size);
                        page.set(0);
                    })
                />
            </div>

            {move || viewing.get().map(|receipt_id| view! {
                <ReceiptDetail
                    kind=kind
                    receipt_id=receipt_id
                    on_close=Callback::new(move |_| viewing.set(None))
                />
            })}
        </div>
    }
}
