use dioxus::prelude::*;

use crate::domain::{cost_breakdown, suggested_unit_price, TradeCalculation};
use crate::ui::components::kpi_card::KpiCard;
use crate::ui::theme;
use crate::util::format_currency;

#[derive(Clone, PartialEq)]
struct SegmentView {
    label: &'static str,
    amount: String,
    bar_style: Option<String>,
    swatch_style: String,
}

/// Totals, segment bar and line items for one calculation.
#[component]
pub fn CostBreakdown(calculation: TradeCalculation) -> Element {
    let money = format_currency;

    let segments: Vec<SegmentView> = cost_breakdown(&calculation)
        .into_iter()
        .map(|segment| SegmentView {
            label: segment.label,
            amount: money(segment.value),
            bar_style: (segment.share > 0.0).then(|| {
                format!(
                    "width: {:.2}%; background: {};",
                    segment.share * 100.0,
                    segment.color
                )
            }),
            swatch_style: format!("background: {};", segment.color),
        })
        .collect();

    let total = money(calculation.total_landed_cost);
    let per_unit = money(calculation.cost_per_unit);
    let suggested = format!(
        "Sell at {} for a {:.0}% margin",
        money(suggested_unit_price(&calculation)),
        calculation.expected_profit_margin
    );

    let line_items: Vec<(&'static str, String)> = [
        ("FOB value", calculation.fob_value),
        ("Freight", calculation.freight_cost),
        ("Insurance", calculation.insurance_cost),
        ("CIF value", calculation.cif_value()),
        ("Customs duty", calculation.customs_duty),
        ("Import tax", calculation.import_tax),
        ("VAT", calculation.vat_amount),
        ("Handling", calculation.handling_charges),
    ]
    .into_iter()
    .map(|(label, value)| (label, money(value)))
    .collect();

    rsx! {
        div { class: "tf-stack",
            div { class: "tf-grid-2",
                KpiCard { title: "Total Landed Cost".to_string(), value: total, description: None, accent: false }
                KpiCard { title: "Cost Per Unit".to_string(), value: per_unit, description: Some(suggested), accent: true }
            }

            div {
                div { class: "tf-bar",
                    for segment in segments.iter() {
                        if let Some(style) = segment.bar_style.clone() {
                            div { class: "tf-bar-fill", style: style, title: segment.label }
                        }
                    }
                }
                for segment in segments.iter() {
                    div { class: "tf-breakdown-row",
                        span {
                            span { class: "tf-swatch", style: segment.swatch_style.clone() }
                            span { class: theme::MUTED, "{segment.label}" }
                        }
                        span { class: theme::NUM, "{segment.amount}" }
                    }
                }
            }

            div { class: theme::TABLE_WRAP,
                table { class: theme::TABLE,
                    tbody {
                        for (label, amount) in line_items {
                            tr {
                                td { "{label}" }
                                td { class: theme::NUM, "{amount}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
