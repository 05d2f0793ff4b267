use contracts::domain::a006_parameter::{validate_parameter, Parameter};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a006_parameter::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::modal::Modal;

/// Edit dialog for one parameter; `None` opens it for a new key.
///
/// An existing parameter is refetched by key first so the dialog never edits
/// a value another user has already changed.
#[component]
pub fn ParameterForm(
    initial: Option<Parameter>,
    on_close: Callback<()>,
    on_saved: Callback<Parameter>,
) -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));

    let editing = initial.is_some();
    let parameter = RwSignal::new(initial.clone().unwrap_or(Parameter {
        param_key: String::new(),
        param_value: String::new(),
        param_description: None,
    }));
    let (validation_error, set_validation_error) = signal(None::<String>);
    let (server_error, set_server_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let (refreshing, set_refreshing) = signal(false);

    if let Some(existing) = initial {
        set_refreshing.set(true);
        let client = client.get_value();
        spawn_local(async move {
            match api::fetch_by_key(&client, &existing.param_key).await {
                Ok(fresh) => parameter.set(fresh),
                Err(e) => log::warn!("Refreshing parameter {} failed: {}", existing.param_key, e),
            }
            set_refreshing.set(false);
        });
    }

    let on_save = move |_| {
        set_server_error.set(None);
        let current = parameter.get_untracked();
        if let Err(e) = validate_parameter(&current.param_key, &current.param_value) {
            set_validation_error.set(Some(e.to_string()));
            return;
        }
        set_validation_error.set(None);
        set_saving.set(true);

        let client = client.get_value();
        spawn_local(async move {
            let result = if editing {
                api::update(&client, &current).await
            } else {
                api::create(&client, &current).await
            };
            match result {
                Ok(stored) => {
                    set_saving.set(false);
                    on_saved.run(stored.unwrap_or(current));
                }
                Err(e) => {
                    log::error!("Saving parameter {} failed: {}", current.param_key, e);
                    set_server_error.set(Some(e.user_message()));
                    set_saving.set(false);
                }
            }
        });
    };

    let locked = Signal::derive(move || saving.get() || refreshing.get());

    let footer = move || {
        view! {
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_close.run(())
                disabled=Signal::derive(move || saving.get())
            >
                "Hủy"
            </Button>
            <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=locked>
                {move || if saving.get() { "Đang lưu..." } else { "Lưu" }}
            </Button>
        }
    };

    let title = if editing { "Sửa tham số" } else { "Thêm tham số" };

    view! {
        <Modal title=title on_close=on_close footer=footer>
            {move || server_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form__group">
                <Label>"Tên tham số"</Label>
                <input
                    type="text"
                    disabled=editing
                    prop:value=move || parameter.with(|p| p.param_key.clone())
                    on:input=move |ev| {
                        let key = event_target_value(&ev);
                        parameter.update(|p| p.param_key = key);
                    }
                />
                {editing.then(|| view! {
                    <div class="form__hint">{move || parameter.with(|p| p.label().to_string())}</div>
                })}
            </div>

            <div class="form__group">
                <Label>"Giá trị"</Label>
                <input
                    type="text"
                    disabled=move || locked.get()
                    prop:value=move || parameter.with(|p| p.param_value.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        parameter.update(|p| p.param_value = value);
                    }
                />
                {move || validation_error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            </div>

            <div class="form__group">
                <Label>"Mô tả"</Label>
                <textarea
                    rows="3"
                    disabled=move || locked.get()
                    prop:value=move || parameter.with(|p| p.param_description.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        parameter.update(|p| {
                            p.param_description = if text.trim().is_empty() { None } else { Some(text) };
                        });
                    }
                />
            </div>
        </Modal>
    }
}
