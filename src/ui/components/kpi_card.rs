use dioxus::prelude::*;

use crate::ui::theme;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>, accent: bool) -> Element {
    let value_class = theme::kpi_value(accent);
    rsx! {
        div {
            class: theme::PANEL,
            h3 { class: "tf-kpi-title", "{title}" }
            p { class: value_class, "{value}" }
            if let Some(desc) = description {
                p { class: "tf-kpi-desc", "{desc}" }
            }
        }
    }
}
