use contracts::domain::a005_receipt::ReceiptKind;
use leptos::prelude::*;

use crate::config::{load_config, AppConfig};
use crate::dashboards::{DebtSummaryPage, SalesReportPage};
use crate::domain::a005_receipt::ui::ReceiptHistoryPage;
use crate::domain::a006_parameter::ui::ParametersPage;
use crate::shared::api_utils::ApiClient;
use crate::shared::icons::icon;
use crate::shared::state::CatalogStore;
use crate::usecases::u501_compose_receipt::ui::ReceiptComposer;

/// Top-level screens reachable from the sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    DebtReports,
    SalesReport,
    ImportReceipt,
    ExportReceipt,
    ImportHistory,
    ExportHistory,
    Parameters,
}

impl Section {
    const ALL: [Section; 7] = [
        Section::DebtReports,
        Section::SalesReport,
        Section::ImportReceipt,
        Section::ExportReceipt,
        Section::ImportHistory,
        Section::ExportHistory,
        Section::Parameters,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::DebtReports => "Công nợ",
            Section::SalesReport => "Doanh số",
            Section::ImportReceipt => "Phiếu nhập",
            Section::ExportReceipt => "Phiếu xuất",
            Section::ImportHistory => "Lịch sử nhập",
            Section::ExportHistory => "Lịch sử xuất",
            Section::Parameters => "Tham số",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Section::DebtReports => "debt",
            Section::SalesReport => "sales",
            Section::ImportReceipt => "import",
            Section::ExportReceipt => "export",
            Section::ImportHistory | Section::ExportHistory => "history",
            Section::Parameters => "parameters",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {:#}", e);
        AppConfig::default()
    });

    provide_context(ApiClient::new(&config));
    provide_context(CatalogStore::new());
    provide_context(config);

    let active = RwSignal::new(Section::DebtReports);

    view! {
        <div class="app-layout">
            <nav class="sidebar">
                <div class="sidebar__brand">
                    {icon("agents")}
                    <span>"Quản lý đại lý"</span>
                </div>
                {Section::ALL
                    .into_iter()
                    .map(|section| {
                        view! {
                            <button
                                class=move || {
                                    if active.get() == section {
                                        "sidebar__item sidebar__item--active"
                                    } else {
                                        "sidebar__item"
                                    }
                                }
                                on:click=move |_| active.set(section)
                            >
                                {icon(section.icon())}
                                <span>{section.label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <main class="app-content">
                {move || match active.get() {
                    Section::DebtReports => view! { <DebtSummaryPage /> }.into_any(),
                    Section::SalesReport => view! { <SalesReportPage /> }.into_any(),
                    Section::ImportReceipt => {
                        view! { <ReceiptComposer kind=ReceiptKind::Import /> }.into_any()
                    }
                    Section::ExportReceipt => {
                        view! { <ReceiptComposer kind=ReceiptKind::Export /> }.into_any()
                    }
                    Section::ImportHistory => {
                        view! { <ReceiptHistoryPage kind=ReceiptKind::Import /> }.into_any()
                    }
                    Section::ExportHistory => {
                        view! { <ReceiptHistoryPage kind=ReceiptKind::Export /> }.into_any()
                    }
                    Section::Parameters => view! { <ParametersPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
