use contracts::domain::a005_receipt::{ReceiptKind, StoredLine, StoredReceipt};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_receipt::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::table::{format_money, format_money_with_currency, TableCellMoney};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::modal::Modal;

/// Header and lines of one stored receipt, fetched by id
#[component]
pub fn ReceiptDetail(kind: ReceiptKind, receipt_id: i32, on_close: Callback<()>) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found");

    let (receipt, set_receipt) = signal(None::<StoredReceipt>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match api::fetch_one(&client, kind, receipt_id).await {
            Ok(found) => set_receipt.set(Some(found)),
            Err(e) => {
                log::error!("Loading receipt {} failed: {}", receipt_id, e);
                set_error.set(Some(e.user_message()));
            }
        }
        set_loading.set(false);
    });

    let info_row = |label: &'static str, value: String| {
        view! {
            <div class="detail__row">
                <span class="detail__label">{label}</span>
                <span class="detail__value">{value}</span>
            </div>
        }
    };

    view! {
        <Modal title=format!("{} #{}", kind.title(), receipt_id) on_close=on_close class="modal--wide">
            {move || {
                if loading.get() {
                    return view! { <div class="detail__loading">"Đang tải..."</div> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <div class="alert alert--error">{e}</div> }.into_any();
                }
                let Some(r) = receipt.get() else {
                    return view! { <div class="detail__empty">"Không tìm thấy phiếu"</div> }.into_any();
                };
                let status = r.payment_status();
                view! {
                    <div class="detail">
                        {info_row("Ngày lập", r.date_label())}
                        {(kind == ReceiptKind::Export).then(|| info_row("Đại lý", r.agent_name().to_string()))}
                        {info_row("Tổng tiền", format_money_with_currency(r.total_amount))}
                        {status.map(|s| view! {
                            {info_row("Đã trả", format_money_with_currency(r.paid_amount))}
                            {info_row("Còn lại", format_money_with_currency(r.remaining_amount()))}
                            <div class="detail__row">
                                <span class="detail__label">"Trạng thái"</span>
                                <span class=s.css_class()>{s.label()}</span>
                            </div>
                        })}
                    </div>
                    <ReceiptLinesTable lines=r.lines.clone() />
                }.into_any()
            }}
        </Modal>
    }
}

#[component]
fn ReceiptLinesTable(lines: Vec<StoredLine>) -> impl IntoView {
    if lines.is_empty() {
        return view! { <div class="detail__empty">"Phiếu không có mặt hàng"</div> }.into_any();
    }
    let quantity: i64 = lines.iter().fold(0, |sum, l| sum.saturating_add(l.quantity));
    let amount: i64 = lines.iter().fold(0, |sum, l| sum.saturating_add(l.into_money));

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=50.0>"STT"</TableHeaderCell>
                        <TableHeaderCell min_width=180.0>"Mặt hàng"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Đơn vị"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"Số lượng"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Đơn giá"</TableHeaderCell>
                        <TableHeaderCell min_width=130.0>"Thành tiền"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {lines
                        .into_iter()
                        .enumerate()
                        .map(|(index, line)| view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{index + 1}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{line.product_name}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{line.unit_name}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{line.quantity}</TableCellLayout>
                                </TableCell>
                                <TableCellMoney value=line.unit_price color_by_tone=false />
                                <TableCellMoney value=line.into_money color_by_tone=false bold=true />
                            </TableRow>
                        })
                        .collect_view()}
                </TableBody>
                <tfoot>
                    <TableTotalsRow label={"TỔNG CỘNG".to_string()} label_span=3>
                        <td>{quantity}</td>
                        <td></td>
                        <td class="text-right amount amount--bold">{format_money(amount)}</td>
                    </TableTotalsRow>
                </tfoot>
            </Table>
        </div>
    }
    .into_any()
}
