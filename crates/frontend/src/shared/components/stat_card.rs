use crate::shared::components::table::format_money_with_currency;
use crate::shared::icons::icon;
use contracts::shared::debt_band::AmountTone;
use leptos::prelude::*;

/// Summary card for a VND total or a plain count
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    #[prop(into)]
    value: Signal<i64>,
    /// Colour the value by owed/credit tone
    #[prop(optional, default = true)]
    toned: bool,
    /// `false` shows the value as a bare count
    #[prop(optional, default = true)]
    money: bool,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let value_class = move || {
        if toned {
            format!("stat-card__value {}", AmountTone::of(value.get()).css_class())
        } else {
            "stat-card__value".to_string()
        }
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class=value_class>
                    {move || {
                        if money {
                            format_money_with_currency(value.get())
                        } else {
                            value.get().to_string()
                        }
                    }}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
