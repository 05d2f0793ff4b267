use contracts::domain::a006_parameter::Parameter;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::form::ParameterForm;
use crate::domain::a006_parameter::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::icons::icon;

/// What the edit dialog is open for
#[derive(Clone)]
enum Editing {
    New,
    Existing(Parameter),
}

#[component]
pub fn ParametersPage() -> impl IntoView {
    let client = StoredValue::new(use_context::<ApiClient>().expect("ApiClient not found"));

    let parameters = RwSignal::new(Vec::<Parameter>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let editing = RwSignal::new(None::<Editing>);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let client = client.get_value();
        spawn_local(async move {
            match api::fetch_all(&client).await {
                Ok(items) => parameters.set(items),
                Err(e) => {
                    log::error!("Loading parameters failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_saved = Callback::new(move |saved: Parameter| {
        editing.set(None);
        set_notice.set(Some(format!("Đã lưu tham số {}", saved.label())));
        load();
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Tham số hệ thống"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(Editing::New))
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("plus")}
                        " Thêm mới"
                    </Button>
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
                {move || notice.get().map(|n| view! { <div class="alert alert--success">{n}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=200.0>"Tham số"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Giá trị"</TableHeaderCell>
                                <TableHeaderCell min_width=250.0>"Mô tả"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Thao tác"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || parameters.get()
                                key=|p| (p.param_key.clone(), p.param_value.clone())
                                children=move |p: Parameter| {
                                    let for_edit = p.clone();
                                    let label = p.label().to_string();
                                    let display_value = p.display_value();
                                    let description = p.param_description.clone().unwrap_or_default();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{label}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{display_value}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {description}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(Editing::Existing(for_edit.clone())))
                                                    attr:title="Sửa"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
                {move || (!loading.get() && parameters.with(|p| p.is_empty())).then(|| view! {
                    <div class="parameters__empty">"Chưa có tham số nào"</div>
                })}
            </div>

            {move || editing.get().map(|target| {
                let initial = match target {
                    Editing::New => None,
                    Editing::Existing(p) => Some(p),
                };
                view! {
                    <ParameterForm
                        initial=initial
                        on_close=Callback::new(move |_| editing.set(None))
                        on_saved=on_saved
                    />
                }
            })}
        </div>
    }
}
