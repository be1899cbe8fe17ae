use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::AppState,
    infra::export::export_history,
    ui::{
        components::{
            history_table::{HistoryRow, HistoryTable},
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::format_currency,
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let summary = state.with(|st| st.history.summary());
    let rows: Vec<HistoryRow> =
        state.with(|st| st.history.latest_first().map(HistoryRow::from).collect());
    let has_rows = !state.with(|st| st.history.is_empty());

    let total_value = format_currency(summary.total_landed_cost);
    let total_count = summary.total_calculations.to_string();
    let categories = summary.distinct_hs_codes.to_string();

    let on_export = move |_| {
        let result = state.with(|st| export_history(&st.history));
        match result {
            Ok(path) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Exported history to {}", path.display()),
            ),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Export failed: {err}")),
        }
    };

    rsx! {
        div { class: "tf-stack",
            div { class: theme::PANEL_HEAD,
                div {
                    h1 { class: theme::H1, "Trade Overview" }
                    p { class: theme::MUTED, "Manage and analyze your international shipping costs." }
                }
                div { style: "display: flex; gap: 8px",
                    button {
                        class: theme::BTN_GHOST,
                        disabled: !has_rows,
                        onclick: on_export,
                        "⤓ Export CSV"
                    }
                    button {
                        class: theme::BTN_PRIMARY,
                        onclick: move |_| {
                            nav.push(Route::Calculator {});
                        },
                        "+ New Calculation"
                    }
                }
            }

            div { class: "tf-grid-3",
                KpiCard {
                    title: "Total Calculations".to_string(),
                    value: total_count,
                    description: "Recorded this session".to_string(),
                    accent: false,
                }
                KpiCard {
                    title: "Total Trade Value".to_string(),
                    value: total_value,
                    description: "Landed cost across all records".to_string(),
                    accent: true,
                }
                KpiCard {
                    title: "Product Categories".to_string(),
                    value: categories,
                    description: "Distinct HS codes".to_string(),
                    accent: false,
                }
            }

            div { class: theme::PANEL,
                h2 { class: theme::H2, "Recent Activity" }
                HistoryTable { rows }
            }
        }
    }
}
