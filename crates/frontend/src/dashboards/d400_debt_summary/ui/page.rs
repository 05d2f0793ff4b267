use contracts::dashboards::d400_debt_summary::{default_sort, DebtSummary};
use contracts::domain::a004_debt_report::{DebtRecord, DebtReportDraft, DebtReportKey};
use contracts::shared::summary_view::apply_fetch;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::table::DebtSummaryTable;
use crate::config::AppConfig;
use crate::domain::a001_agent::api as agent_api;
use crate::domain::a004_debt_report::api;
use crate::domain::a004_debt_report::ui::{DebtReportDetail, DebtReportForm};
use crate::shared::api_utils::ApiClient;
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::date_utils::current_month_year;
use crate::shared::icons::icon;
use crate::shared::state::{CatalogStore, RequestSeq};

/// Monthly debt report screen
#[component]
pub fn DebtSummaryPage() -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));
    let config = use_context::<AppConfig>().expect("AppConfig not found");
    let store = use_context::<CatalogStore>().expect("CatalogStore not found");

    let (current_month, current_year) = current_month_year();
    let month = RwSignal::new(current_month);
    let year = RwSignal::new(current_year);

    let all_records = RwSignal::new(Vec::<DebtRecord>::new());
    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let sort = RwSignal::new(default_sort());
    let seq = StoredValue::new(RequestSeq::new());

    let editing = RwSignal::new(None::<DebtReportDraft>);
    let viewing = RwSignal::new(None::<DebtReportKey>);

    let bands = Signal::derive(move || config.debt_bands);
    let summary = Memo::new(move |_| {
        all_records.with(|all| DebtSummary::for_period(month.get(), year.get(), all))
    });

    let load_data = move || {
        let mut ticket = None;
        seq.update_value(|s| ticket = Some(s.issue()));
        let Some(ticket) = ticket else { return };

        set_loading.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            let result = api::fetch_all(&client).await;
            if !seq.with_value(|s| s.is_current(ticket)) {
                log::warn!("Dropping superseded debt report response");
                return;
            }
            let mut failure = None;
            all_records.update(|all| failure = apply_fetch(all, result));
            if let Some(e) = failure {
                log::error!("Loading debt reports failed: {}", e);
                set_error.set(Some(e.user_message()));
            }
            set_loading.set(false);
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
        load_data();
        if !store.agents_loaded.get_untracked() {
            load_agents();
        }
    });

    let on_summarize = move |_| {
        let (m, y) = (month.get_untracked(), year.get_untracked());
        set_busy.set(true);
        set_error.set(None);
        set_notice.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match api::summarize(&client, m, y).await {
                Ok(()) => {
                    set_notice.set(Some(format!("Đã tổng hợp công nợ tháng {}/{}", m, y)));
                    load_data();
                }
                Err(e) => {
                    log::error!("Summarizing debt reports for {}/{} failed: {}", m, y, e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_busy.set(false);
        });
    };

    let on_delete = Callback::new(move |record: DebtRecord| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!(
                    "Xóa báo cáo công nợ của {} tháng {}?",
                    record.agent_name,
                    record.period_label()
                ))
                .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        set_busy.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match api::delete(&client, record.key()).await {
                Ok(()) => {
                    set_notice.set(Some(format!("Đã xóa báo cáo của {}", record.agent_name)));
                    load_data();
                }
                Err(e) => {
                    log::error!("Deleting debt report {:?} failed: {}", record.key(), e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_busy.set(false);
        });
    });

    let on_view = Callback::new(move |record: DebtRecord| viewing.set(Some(record.key())));
    let on_edit = Callback::new(move |record: DebtRecord| {
        editing.set(Some(DebtReportDraft::from_record(&record)))
    });

    let controls_disabled = Signal::derive(move || loading.get() || busy.get());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Báo cáo công nợ"</h1>
                </div>
                <div class="page__header-right">
                    <MonthSelector
                        month=month
                        year=year
                        on_select=Callback::new(move |_| set_notice.set(None))
                        disabled=controls_disabled
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(DebtReportDraft::new(month.get_untracked(), year.get_untracked())))
                        disabled=controls_disabled
                    >
                        {icon("plus")}
                        " Thêm mới"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_summarize
                        disabled=controls_disabled
                    >
                        {icon("calculator")}
                        {move || if busy.get() { " Đang xử lý..." } else { " Tổng hợp" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=controls_disabled
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Đang tải..." } else { " Làm mới" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || notice.get().map(|n| view! { <div class="alert alert--success">{n}</div> })}

                <DebtSummaryTable
                    summary=summary
                    loading=loading
                    sort=sort
                    bands=bands
                    on_view=on_view
                    on_edit=on_edit
                    on_delete=on_delete
                />
            </div>

            {move || editing.get().map(|draft| view! {
                <DebtReportForm
                    initial=draft
                    agents=store.agents
                    on_close=Callback::new(move |_| editing.set(None))
                    on_saved=Callback::new(move |_| {
                        editing.set(None);
                        set_notice.set(Some("Đã lưu báo cáo công nợ".to_string()));
                        load_data();
                    })
                />
            })}

            {move || viewing.get().map(|key| view! {
                <DebtReportDetail report_key=key on_close=Callback::new(move |_| viewing.set(None)) />
            })}
        </div>
    }
}
