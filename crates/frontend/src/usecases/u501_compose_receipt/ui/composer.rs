use contracts::dashboards::d400_debt_summary::receipt_sheet;
use contracts::domain::a003_product::Product;
use contracts::domain::a005_receipt::{CreatedReceipt, ReceiptKind};
use contracts::shared::api::ApiError;
use contracts::shared::sort::{sort_ranked, SortDirection};
use contracts::usecases::u501_compose_receipt::shortfall;
use contracts::usecases::u501_compose_receipt::{
    InventoryShortfall, LineItemError, ReceiptDraft, ReceiptHeader, ReceiptHeaderError,
    ShortfallAdjustment,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::lines::ReceiptLinesTable;
use crate::domain::a001_agent::api as agent_api;
use crate::domain::a003_product::api as product_api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::table::{format_money_with_currency, format_number_int};
use crate::shared::date_utils::{from_input_value, to_input_value, today};
use crate::shared::export::export_sheet;
use crate::shared::icons::icon;
use crate::shared::state::CatalogStore;
use crate::usecases::u501_compose_receipt::api;

/// Composes an import or export receipt line by line and submits it.
///
/// The draft survives a failed submission. For exports rejected for lack of
/// stock the offending line can be lowered to what is available.
#[component]
pub fn ReceiptComposer(kind: ReceiptKind) -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));
    let store = use_context::<CatalogStore>().expect("CatalogStore not found");

    let draft = RwSignal::new(ReceiptDraft::new(kind));
    let header = RwSignal::new(ReceiptHeader {
        create_date: Some(today()),
        ..ReceiptHeader::default()
    });

    // add-line inputs
    let selected_product = RwSignal::new(None::<i32>);
    let quantity_input = RwSignal::new(String::new());
    let price_input = RwSignal::new(String::new());

    let (line_error, set_line_error) = signal(None::<LineItemError>);
    let (header_errors, set_header_errors) = signal(Vec::<ReceiptHeaderError>::new());
    let (submit_error, set_submit_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let (pending_shortfall, set_pending_shortfall) = signal(None::<InventoryShortfall>);
    let (submitting, set_submitting) = signal(false);
    let (loading_catalog, set_loading_catalog) = signal(false);

    let load_products = move || {
        set_loading_catalog.set(true);
        let client = client.get_value();
        spawn_local(async move {
            match product_api::fetch_products(&client).await {
                Ok(products) => store.replace_products(products),
                Err(e) => {
                    log::error!("Loading products failed: {}", e);
                    set_submit_error.set(Some(e.user_message()));
                }
            }
            set_loading_catalog.set(false);
        });
    };

    let load_agents = move || {
        let client = client.get_value();
        spawn_local(async move {
            match agent_api::fetch_agents(&client).await {
                Ok(agents) => store.replace_agents(agents),
                Err(e) => log::error!("Loading agents failed: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        // stock changes with every receipt, so products are always refetched
        load_products();
        if kind == ReceiptKind::Export && !store.agents_loaded.get_untracked() {
            load_agents();
        }
    });

    let product_options = Memo::new(move |_| {
        store.products.with(|list| {
            sort_ranked(list, "product_name", SortDirection::Ascending)
                .into_iter()
                .map(|r| r.item)
                .collect::<Vec<Product>>()
        })
    });

    let agent_options = Memo::new(move |_| {
        store.agents.with(|list| {
            sort_ranked(list, "agent_name", SortDirection::Ascending)
                .into_iter()
                .map(|r| r.item)
                .collect::<Vec<_>>()
        })
    });

    let on_product_change = move |ev| {
        let product_id = event_target_value(&ev).parse::<i32>().ok();
        selected_product.set(product_id);
        if kind == ReceiptKind::Import {
            let price = product_id
                .and_then(|id| store.product(id))
                .map(|p| p.import_price.to_string())
                .unwrap_or_default();
            price_input.set(price);
        }
    };

    let on_add = move |_| {
        let product = selected_product.get_untracked().and_then(|id| store.product(id));
        let quantity = quantity_input.get_untracked();
        let price = price_input.get_untracked();
        let unit_price = (kind == ReceiptKind::Import).then_some(price.as_str());

        let mut next = draft.get_untracked();
        match next.add(product, &quantity, unit_price) {
            Ok(()) => {
                draft.set(next);
                selected_product.set(None);
                quantity_input.set(String::new());
                price_input.set(String::new());
                set_line_error.set(None);
                set_notice.set(None);
            }
            Err(e) => set_line_error.set(Some(e)),
        }
    };

    let header_error = move |field: &'static str| {
        header_errors.with(|list| {
            list.iter()
                .find(|e| e.field() == field)
                .map(|e| view! { <div class="form__error">{e.to_string()}</div> })
        })
    };

    let counterparty = move || {
        header
            .with_untracked(|h| h.agent_id)
            .and_then(|id| store.agent_name(id))
    };

    let on_success = move |created: Option<CreatedReceipt>| {
        let mut text = format!("Đã tạo {} thành công", kind.title().to_lowercase());
        if let Some(created) = created {
            if let Some(id) = created.receipt_id {
                text.push_str(&format!(" (mã {})", id));
            }
            if created.total_amount > 0 {
                text.push_str(&format!(
                    ", tổng tiền {}",
                    format_money_with_currency(created.total_amount)
                ));
            }
        }
        draft.update(|d| d.clear());
        header.update(|h| h.paid_amount.clear());
        set_notice.set(Some(text));
        load_products();
    };

    let on_failure = move |e: ApiError| {
        log::error!("Submitting {:?} receipt failed: {}", kind, e);
        set_submit_error.set(Some(e.user_message()));
        if kind == ReceiptKind::Export {
            set_pending_shortfall.set(shortfall::from_error(&e));
        }
    };

    let on_submit = move |_| {
        set_submit_error.set(None);
        set_notice.set(None);
        set_pending_shortfall.set(None);

        let current_header = header.get_untracked();
        let client = client.get_value();
        let prepared = draft.with_untracked(|d| match kind {
            ReceiptKind::Import => d
                .to_import_request(&current_header, today())
                .map(|request| (Some(request), None)),
            ReceiptKind::Export => d
                .to_export_request(&current_header, today())
                .map(|request| (None, Some(request))),
        });

        let (import_request, export_request) = match prepared {
            Ok(requests) => requests,
            Err(errors) => {
                set_header_errors.set(errors);
                return;
            }
        };
        set_header_errors.set(Vec::new());
        set_submitting.set(true);

        spawn_local(async move {
            let result = match (import_request, export_request) {
                (Some(request), _) => api::submit_import(&client, &request).await,
                (_, Some(request)) => api::submit_export(&client, &request).await,
                (None, None) => Ok(None),
            };
            match result {
                Ok(created) => on_success(created),
                Err(e) => on_failure(e),
            }
            set_submitting.set(false);
        });
    };

    let on_adjust = move |_| {
        let Some(found) = pending_shortfall.get_untracked() else {
            return;
        };
        let mut next = draft.get_untracked();
        let Some(product_id) = next.shortfall_target(&found) else {
            set_pending_shortfall.set(None);
            return;
        };
        match next.apply_shortfall(product_id, found.available) {
            Ok(adjustment) => {
                let name = next
                    .lines()
                    .iter()
                    .find(|l| l.product_id() == product_id)
                    .map(|l| l.product().product_name.clone())
                    .or_else(|| store.product(product_id).map(|p| p.product_name))
                    .unwrap_or_default();
                draft.set(next);
                set_notice.set(Some(match adjustment {
                    ShortfallAdjustment::Adjusted { quantity } => {
                        format!("Đã điều chỉnh số lượng {} về {}", name, quantity)
                    }
                    ShortfallAdjustment::Removed => {
                        format!("Đã xóa {} khỏi phiếu vì hết hàng", name)
                    }
                }));
                set_submit_error.set(None);
            }
            Err(e) => set_line_error.set(Some(e)),
        }
        set_pending_shortfall.set(None);
    };

    let on_export = move |_| {
        let date = header.with_untracked(|h| h.create_date).unwrap_or_else(today);
        let agent = counterparty();
        let layout = draft.with_untracked(|d| {
            receipt_sheet(kind, date, agent.as_deref(), d.lines(), &d.total())
        });
        if let Err(e) = export_sheet(&layout) {
            log::error!("Receipt export failed: {}", e);
            set_submit_error.set(Some(format!("Không thể xuất file Excel: {}", e)));
        }
    };

    let remaining = move || {
        let total = draft.with(|d| d.total().total_amount);
        let paid = header.with(|h| h.paid_amount_value());
        total - paid
    };

    let busy = Signal::derive(move || submitting.get());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{kind.title()}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_products()
                        disabled=Signal::derive(move || loading_catalog.get() || submitting.get())
                    >
                        {icon("refresh")}
                        " Tải lại sản phẩm"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || submit_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || notice.get().map(|n| view! { <div class="alert alert--success">{n}</div> })}
                {move || pending_shortfall.get().map(|found| view! {
                    <div class="alert alert--warning">
                        {format!(
                            "Thiếu {} sản phẩm: yêu cầu {}, tồn kho {}.",
                            found.shortage, found.requested, found.available
                        )}
                        <Button appearance=ButtonAppearance::Primary on_click=on_adjust>
                            "Điều chỉnh về số lượng tồn kho"
                        </Button>
                    </div>
                })}

                <div class="receipt-header">
                    <div class="form__group">
                        <Label>{if kind == ReceiptKind::Import { "Ngày nhập" } else { "Ngày xuất" }}</Label>
                        <input
                            type="date"
                            disabled=move || submitting.get()
                            prop:value=move || header.with(|h| to_input_value(h.create_date))
                            on:change=move |ev| {
                                let date = from_input_value(&event_target_value(&ev));
                                header.update(|h| h.create_date = date);
                            }
                        />
                        {move || header_error("create_date")}
                    </div>

                    {(kind == ReceiptKind::Export).then(move || view! {
                        <div class="form__group">
                            <Label>"Đại lý"</Label>
                            <select
                                disabled=move || submitting.get()
                                prop:value=move || header.with(|h| h.agent_id.map(|id| id.to_string()).unwrap_or_default())
                                on:change=move |ev| {
                                    let agent_id = event_target_value(&ev).parse::<i32>().ok();
                                    header.update(|h| h.agent_id = agent_id);
                                }
                            >
                                <option value="">"-- Chọn đại lý --"</option>
                                <For
                                    each=move || agent_options.get()
                                    key=|agent| agent.agent_id
                                    children=move |agent| view! {
                                        <option value=agent.agent_id.to_string()>{agent.agent_name.clone()}</option>
                                    }
                                />
                            </select>
                            {move || header_error("agent")}
                        </div>

                        <div class="form__group">
                            <Label>"Số tiền trả (VNĐ)"</Label>
                            <input
                                type="text"
                                inputmode="numeric"
                                disabled=move || submitting.get()
                                prop:value=move || header.with(|h| h.paid_amount.clone())
                                on:input=move |ev| {
                                    let raw = event_target_value(&ev);
                                    header.update(|h| h.paid_amount = raw);
                                }
                            />
                            {move || header_error("paid_amount")}
                        </div>

                        <div class="form__group">
                            <Label>"Còn lại"</Label>
                            <div class="form__computed">{move || format_money_with_currency(remaining())}</div>
                        </div>
                    })}
                </div>

                <div class="receipt-add">
                    <div class="form__group">
                        <Label>"Sản phẩm"</Label>
                        <select
                            disabled=move || submitting.get()
                            prop:value=move || selected_product.get().map(|id| id.to_string()).unwrap_or_default()
                            on:change=on_product_change
                        >
                            <option value="">"-- Chọn sản phẩm --"</option>
                            <For
                                each=move || product_options.get()
                                key=|product| (product.product_id, product.inventory_quantity)
                                children=move |product| {
                                    let label = if kind == ReceiptKind::Export {
                                        format!(
                                            "{} - tồn: {}",
                                            product.display_name(),
                                            format_number_int(product.inventory_quantity)
                                        )
                                    } else {
                                        product.display_name()
                                    };
                                    view! { <option value=product.product_id.to_string()>{label}</option> }
                                }
                            />
                        </select>
                    </div>

                    <div class="form__group">
                        <Label>"Số lượng"</Label>
                        <input
                            type="number"
                            min="1"
                            disabled=move || submitting.get()
                            prop:value=move || quantity_input.get()
                            on:input=move |ev| quantity_input.set(event_target_value(&ev))
                        />
                    </div>

                    {(kind == ReceiptKind::Import).then(move || view! {
                        <div class="form__group">
                            <Label>"Đơn giá (VNĐ)"</Label>
                            <input
                                type="text"
                                inputmode="numeric"
                                disabled=move || submitting.get()
                                prop:value=move || price_input.get()
                                on:input=move |ev| price_input.set(event_target_value(&ev))
                            />
                        </div>
                    })}

                    <Button appearance=ButtonAppearance::Secondary on_click=on_add disabled=busy>
                        {icon("plus")}
                        " Thêm"
                    </Button>
                </div>
                {move || line_error.get().map(|e| view! { <div class="form__error">{e.to_string()}</div> })}

                <ReceiptLinesTable
                    draft=draft
                    on_error=Callback::new(move |e| set_line_error.set(e))
                    disabled=busy
                />
                {move || header_error("lines")}

                <div class="receipt-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_export
                        disabled=Signal::derive(move || draft.with(|d| d.is_empty()))
                    >
                        {icon("download")}
                        " Xuất Excel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            draft.update(|d| d.clear());
                            set_line_error.set(None);
                            set_pending_shortfall.set(None);
                        }
                        disabled=busy
                    >
                        "Xóa tất cả"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=busy>
                        {move || if submitting.get() {
                            "Đang lưu...".to_string()
                        } else {
                            format!("Lưu {}", kind.title().to_lowercase())
                        }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
