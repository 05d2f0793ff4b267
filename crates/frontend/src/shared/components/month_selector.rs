use crate::shared::date_utils::current_month_year;
use contracts::domain::a004_debt_report::form::{MAX_YEAR, MIN_YEAR};
use leptos::prelude::*;

/// Month preceding the given one
pub fn previous_period(month: u32, year: i32) -> (u32, i32) {
    if month <= 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

/// Month/year picker with "-1M" and "0M" quick buttons
#[component]
pub fn MonthSelector(
    month: RwSignal<u32>,
    year: RwSignal<i32>,
    /// Fired after any change with the new (month, year)
    on_select: Callback<(u32, i32)>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let select = move |m: u32, y: i32| {
        month.set(m);
        year.set(y);
        on_select.run((m, y));
    };

    let on_previous_month = move |_| {
        let (m, y) = previous_period(month.get_untracked(), year.get_untracked());
        select(m, y);
    };

    let on_current_month = move |_| {
        let (m, y) = current_month_year();
        select(m, y);
    };

    view! {
        <div class="month-selector">
            <button
                class="month-selector__quick"
                on:click=on_previous_month
                disabled=move || disabled.get()
                title="Tháng trước"
            >
                "-1M"
            </button>
            <button
                class="month-selector__quick"
                on:click=on_current_month
                disabled=move || disabled.get()
                title="Tháng hiện tại"
            >
                "0M"
            </button>
            <select
                class="month-selector__month"
                prop:value=move || month.get().to_string()
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                        select(m, year.get_untracked());
                    }
                }
            >
                {(1..=12u32)
                    .map(|m| view! { <option value=m.to_string()>{format!("Tháng {}", m)}</option> })
                    .collect_view()}
            </select>
            <input
                class="month-selector__year"
                type="number"
                min=MIN_YEAR.to_string()
                max=MAX_YEAR.to_string()
                prop:value=move || year.get().to_string()
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Ok(y) = event_target_value(&ev).parse::<i32>() {
                        if (MIN_YEAR..=MAX_YEAR).contains(&y) {
                            select(month.get_untracked(), y);
                        }
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_period() {
        assert_eq!(previous_period(3, 2024), (2, 2024));
        assert_eq!(previous_period(1, 2024), (12, 2023));
    }
}
