use dioxus::prelude::*;

use crate::domain::TradeCalculation;
use crate::infra::export::format_timestamp;
use crate::ui::theme;
use crate::util::format_money;

#[derive(Clone, PartialEq)]
pub struct HistoryRow {
    pub id: String,
    pub product: String,
    pub hs_code: String,
    pub route: String,
    pub method: &'static str,
    pub landed_cost: String,
    pub date: String,
}

impl From<&TradeCalculation> for HistoryRow {
    fn from(calc: &TradeCalculation) -> Self {
        let product = if calc.product_name.trim().is_empty() {
            "Unnamed Cargo".to_string()
        } else {
            calc.product_name.clone()
        };
        let date = format_timestamp(calc.timestamp)
            .split('T')
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            id: calc.id.clone(),
            product,
            hs_code: calc.hs_code.clone(),
            route: calc.route_label(),
            method: calc.shipping_method.label(),
            landed_cost: format_money(calc.total_landed_cost),
            date,
        }
    }
}

#[component]
pub fn HistoryTable(rows: Vec<HistoryRow>) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: theme::TABLE_EMPTY,
                p { "No calculations found. Start your first trade analysis to see data here." }
            }
        };
    }

    rsx! {
        div { class: theme::TABLE_WRAP,
            table { class: theme::TABLE,
                thead {
                    tr {
                        th { "Product" }
                        th { "HS Code" }
                        th { "Route" }
                        th { "Method" }
                        th { class: theme::NUM, "Landed Cost" }
                        th { class: theme::NUM, "Date" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.id}",
                            td { style: "font-weight: 600", "{row.product}" }
                            td { class: theme::MONO, "{row.hs_code}" }
                            td { class: theme::MUTED, "{row.route}" }
                            td { "{row.method}" }
                            td { class: theme::NUM, style: "font-weight: 700", "{row.landed_cost}" }
                            td { class: theme::NUM, style: "color: var(--tf-muted)", "{row.date}" }
                        }
                    }
                }
            }
        }
    }
}
