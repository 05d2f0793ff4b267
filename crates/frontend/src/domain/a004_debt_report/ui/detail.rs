use contracts::domain::a004_debt_report::{DebtRecord, DebtReportKey};
use contracts::shared::debt_band::AmountTone;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_debt_report::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::table::format_money_with_currency;
use crate::shared::modal::Modal;

/// Read-only view of one report, fetched fresh by its key
#[component]
pub fn DebtReportDetail(report_key: DebtReportKey, on_close: Callback<()>) -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient not found");

    let (record, set_record) = signal(None::<DebtRecord>);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match api::fetch_one(&client, report_key).await {
            Ok(found) => set_record.set(Some(found)),
            Err(e) => {
                log::error!("Loading debt report {:?} failed: {}", report_key, e);
                set_error.set(Some(e.user_message()));
            }
        }
        set_loading.set(false);
    });

    let amount_row = |label: &'static str, amount: i64| {
        view! {
            <div class="detail__row">
                <span class="detail__label">{label}</span>
                <span class=format!("detail__value {}", AmountTone::of(amount).css_class())>
                    {format_money_with_currency(amount)}
                </span>
            </div>
        }
    };

    view! {
        <Modal title="Chi tiết công nợ" on_close=on_close>
            {move || {
                if loading.get() {
                    return view! { <div class="detail__loading">"Đang tải..."</div> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <div class="alert alert--error">{e}</div> }.into_any();
                }
                match record.get() {
                    Some(r) => view! {
                        <div class="detail">
                            <div class="detail__row">
                                <span class="detail__label">"Đại lý"</span>
                                <span class="detail__value">{r.agent_name.clone()}</span>
                            </div>
                            <div class="detail__row">
                                <span class="detail__label">"Kỳ"</span>
                                <span class="detail__value">{format!("Tháng {}", r.period_label())}</span>
                            </div>
                            {amount_row("Nợ đầu kỳ", r.first_debt)}
                            {amount_row("Phát sinh", r.arisen_debt)}
                            {amount_row("Nợ cuối kỳ", r.last_debt)}
                            {(!r.is_balanced()).then(|| view! {
                                <div class="alert alert--warning">
                                    "Nợ cuối kỳ không bằng nợ đầu kỳ cộng phát sinh."
                                </div>
                            })}
                        </div>
                    }.into_any(),
                    None => view! { <div class="detail__empty">"Không tìm thấy dữ liệu"</div> }.into_any(),
                }
            }}
        </Modal>
    }
}
