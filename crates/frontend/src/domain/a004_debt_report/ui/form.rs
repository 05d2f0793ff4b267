use contracts::domain::a001_agent::Agent;
use contracts::domain::a004_debt_report::{DebtFormError, DebtReportDraft};
use contracts::domain::a004_debt_report::form::{MAX_YEAR, MIN_YEAR};
use contracts::shared::sort::{sort_ranked, SortDirection};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_debt_report::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::components::table::format_money;
use crate::shared::modal::Modal;

/// Create/edit dialog for a debt report.
///
/// The closing debt is recomputed from the two inputs on every keystroke.
/// Nothing is sent until the draft validates.
#[component]
pub fn DebtReportForm(
    initial: DebtReportDraft,
    #[prop(into)]
    agents: Signal<Vec<Agent>>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));

    let editing = initial.is_editing();
    let draft = RwSignal::new(initial);
    let (errors, set_errors) = signal(Vec::<DebtFormError>::new());
    let (server_error, set_server_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let field_error = move |field: &'static str| {
        errors.with(|list| {
            list.iter()
                .find(|e| e.field() == field)
                .map(|e| view! { <div class="form__error">{e.to_string()}</div> })
        })
    };

    let sorted_agents = Memo::new(move |_| {
        agents.with(|list| {
            sort_ranked(list, "agent_name", SortDirection::Ascending)
                .into_iter()
                .map(|r| r.item)
                .collect::<Vec<_>>()
        })
    });

    let on_save = move |_| {
        set_server_error.set(None);
        let record = match agents.with_untracked(|list| draft.with_untracked(|d| d.validate(list))) {
            Ok(record) => record,
            Err(found) => {
                set_errors.set(found);
                return;
            }
        };
        set_errors.set(Vec::new());
        set_saving.set(true);

        let client = client.get_value();
        spawn_local(async move {
            let result = if editing {
                api::update(&client, &record).await
            } else {
                api::create(&client, &record).await
            };
            match result {
                Ok(()) => {
                    set_saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("Saving debt report failed: {}", e);
                    set_server_error.set(Some(e.user_message()));
                    set_saving.set(false);
                }
            }
        });
    };

    let title = if editing {
        "Sửa báo cáo công nợ"
    } else {
        "Thêm báo cáo công nợ"
    };

    let footer = move || {
        view! {
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_close.run(())
                disabled=Signal::derive(move || saving.get())
            >
                "Hủy"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=on_save
                disabled=Signal::derive(move || saving.get())
            >
                {move || if saving.get() { "Đang lưu..." } else { "Lưu" }}
            </Button>
        }
    };

    view! {
        <Modal title=title on_close=on_close footer=footer>
            {move || server_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form__row">
                <div class="form__group">
                    <Label>"Tháng"</Label>
                    <select
                        prop:value=move || draft.with(|d| d.month.to_string())
                        disabled=editing
                        on:change=move |ev| {
                            let month = event_target_value(&ev).parse::<u32>().unwrap_or(0);
                            draft.update(|d| d.month = month);
                        }
                    >
                        <option value="0">"-- Chọn tháng --"</option>
                        {(1..=12u32)
                            .map(|m| view! { <option value=m.to_string()>{format!("Tháng {}", m)}</option> })
                            .collect_view()}
                    </select>
                    {move || field_error("month")}
                </div>

                <div class="form__group">
                    <Label>"Năm"</Label>
                    <input
                        type="number"
                        min=MIN_YEAR.to_string()
                        max=MAX_YEAR.to_string()
                        disabled=editing
                        prop:value=move || draft.with(|d| d.year.to_string())
                        on:input=move |ev| {
                            let year = event_target_value(&ev).parse::<i32>().unwrap_or(0);
                            draft.update(|d| d.year = year);
                        }
                    />
                    {move || field_error("year")}
                </div>
            </div>

            <div class="form__group">
                <Label>"Đại lý"</Label>
                <select
                    prop:value=move || draft.with(|d| d.agent_id.map(|id| id.to_string()).unwrap_or_default())
                    disabled=editing
                    on:change=move |ev| {
                        let agent_id = event_target_value(&ev).parse::<i32>().ok();
                        draft.update(|d| d.agent_id = agent_id);
                    }
                >
                    <option value="">"-- Chọn đại lý --"</option>
                    <For
                        each=move || sorted_agents.get()
                        key=|agent| agent.agent_id
                        children=move |agent| {
                            view! {
                                <option value=agent.agent_id.to_string()>{agent.agent_name.clone()}</option>
                            }
                        }
                    />
                </select>
                {move || field_error("agent")}
            </div>

            <div class="form__group">
                <Label>"Nợ đầu kỳ (VNĐ)"</Label>
                <input
                    type="text"
                    inputmode="numeric"
                    prop:value=move || draft.with(|d| d.first_debt_text().to_string())
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        draft.update(|d| d.set_first_debt(&raw));
                    }
                />
                {move || field_error("first_debt")}
            </div>

            <div class="form__group">
                <Label>"Phát sinh (VNĐ)"</Label>
                <input
                    type="text"
                    inputmode="numeric"
                    prop:value=move || draft.with(|d| d.arisen_debt_text().to_string())
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        draft.update(|d| d.set_arisen_debt(&raw));
                    }
                />
                {move || field_error("arisen_debt")}
            </div>

            <div class="form__group">
                <Label>"Nợ cuối kỳ (VNĐ)"</Label>
                <div class="form__computed">
                    {move || match draft.with(|d| d.last_debt()) {
                        Ok(last) => format_money(last),
                        Err(e) => e.to_string(),
                    }}
                </div>
            </div>
        </Modal>
    }
}
