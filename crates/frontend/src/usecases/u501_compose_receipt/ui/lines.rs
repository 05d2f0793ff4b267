use contracts::domain::a005_receipt::{ReceiptKind, ReceiptLineItem};
use contracts::usecases::u501_compose_receipt::{LineItemError, ReceiptDraft};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::table::{format_number_int, TableCellMoney};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::icons::icon;

/// Editable line list of a receipt draft.
///
/// Quantity (and price, for imports) are edited in place. A rejected edit
/// reports the error and the input falls back to the stored value.
#[component]
pub fn ReceiptLinesTable(
    draft: RwSignal<ReceiptDraft>,
    on_error: Callback<Option<LineItemError>>,
    #[prop(into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let kind = draft.with_untracked(|d| d.kind());
    let price_editable = kind == ReceiptKind::Import;

    let apply = move |edit: Box<dyn FnOnce(&mut ReceiptDraft) -> Result<(), LineItemError>>| {
        let mut next = draft.get_untracked();
        match edit(&mut next) {
            Ok(()) => {
                draft.set(next);
                on_error.run(None);
            }
            Err(e) => {
                // re-render inputs with the unchanged values
                draft.update(|_| {});
                on_error.run(Some(e));
            }
        }
    };

    let line_value = move |product_id: i32, read: fn(&ReceiptLineItem) -> i64| {
        draft.with(|d| {
            d.lines()
                .iter()
                .find(|l| l.product_id() == product_id)
                .map(read)
                .unwrap_or(0)
        })
    };

    let totals = move || draft.with(|d| d.total());

    view! {
        {move || {
            if draft.with(|d| d.is_empty()) {
                return view! {
                    <div class="receipt-lines__empty">"Chưa có sản phẩm nào trong phiếu"</div>
                }.into_any();
            }

            view! {
                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=50.0>"STT"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Sản phẩm"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Đơn vị"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Số lượng"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Đơn giá"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Thành tiền"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || {
                                    draft.with(|d| {
                                        d.lines()
                                            .iter()
                                            .enumerate()
                                            .map(|(i, l)| (i + 1, l.clone()))
                                            .collect::<Vec<_>>()
                                    })
                                }
                                key=|(stt, line)| (*stt, line.product_id())
                                children=move |(stt, line)| {
                                    let product_id = line.product_id();
                                    let product = line.product().clone();
                                    let product_name = product.product_name.clone();
                                    let unit_name = product.unit_name().to_string();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{stt}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {product_name}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{unit_name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <input
                                                    class="receipt-lines__input"
                                                    type="number"
                                                    min="1"
                                                    disabled=move || disabled.get()
                                                    prop:value=move || line_value(product_id, |l| i64::from(l.quantity())).to_string()
                                                    on:change=move |ev| {
                                                        let raw = event_target_value(&ev);
                                                        apply(Box::new(move |d: &mut ReceiptDraft| d.update_quantity(product_id, &raw)));
                                                    }
                                                />
                                            </TableCell>
                                            {if price_editable {
                                                view! {
                                                    <TableCell>
                                                        <input
                                                            class="receipt-lines__input"
                                                            type="text"
                                                            inputmode="numeric"
                                                            disabled=move || disabled.get()
                                                            prop:value=move || line_value(product_id, ReceiptLineItem::unit_price).to_string()
                                                            on:change=move |ev| {
                                                                let raw = event_target_value(&ev);
                                                                apply(Box::new(move |d: &mut ReceiptDraft| d.update_price(product_id, &raw)));
                                                            }
                                                        />
                                                    </TableCell>
                                                }.into_any()
                                            } else {
                                                view! {
                                                    <TableCellMoney
                                                        value=Signal::derive(move || line_value(product_id, ReceiptLineItem::unit_price))
                                                        color_by_tone=false
                                                    />
                                                }.into_any()
                                            }}
                                            <TableCellMoney
                                                value=Signal::derive(move || line_value(product_id, ReceiptLineItem::total_price))
                                                color_by_tone=false
                                                bold=true
                                            />
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    disabled=disabled
                                                    on_click=move |_| {
                                                        draft.update(|d| {
                                                            d.remove(product_id);
                                                        });
                                                        on_error.run(None);
                                                    }
                                                    attr:title="Xóa dòng"
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                        <tfoot>
                            <TableTotalsRow label={"TỔNG CỘNG".to_string()} label_span=3>
                                <td>{move || format_number_int(totals().total_quantity)}</td>
                                <td></td>
                                <td class="text-right amount amount--bold">
                                    {move || format_number_int(totals().total_amount)}
                                </td>
                                <td></td>
                            </TableTotalsRow>
                        </tfoot>
                    </Table>
                </div>
            }.into_any()
        }}
    }
}
