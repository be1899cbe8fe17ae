use dioxus::prelude::*;

use crate::{
    domain::AppState,
    infra::rule_source::{load_rules, rules_path, write_rule_template},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[derive(Clone, PartialEq)]
struct CountryRow {
    code: String,
    name: String,
    duty: String,
    tax: String,
    vat: String,
    currency: String,
}

#[derive(Clone, PartialEq)]
struct HsRow {
    code: String,
    category: String,
    multiplier: String,
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[component]
pub fn RulesPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let origin_label = state.with(|st| st.rule_origin.label());
    let path_label = rules_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string());

    let countries: Vec<CountryRow> = state.with(|st| {
        st.rules
            .countries
            .iter()
            .map(|c| CountryRow {
                code: c.country_code.clone(),
                name: c.country_name.clone(),
                duty: percent(c.default_duty_rate),
                tax: percent(c.default_tax_rate),
                vat: percent(c.vat_rate),
                currency: format!("{} ({})", c.currency, c.currency_symbol),
            })
            .collect()
    });
    let hs_codes: Vec<HsRow> = state.with(|st| {
        st.rules
            .hs_codes
            .iter()
            .map(|h| HsRow {
                code: h.code.clone(),
                category: h.category.clone(),
                multiplier: format!("×{:.2}", h.duty_multiplier),
            })
            .collect()
    });

    let on_write_template = move |_| {
        let Some(path) = rules_path() else {
            push_toast(toasts, ToastKind::Error, "No config directory available.");
            return;
        };
        if path.exists() {
            push_toast(
                toasts,
                ToastKind::Warning,
                format!("{} already exists; edit it and reload.", path.display()),
            );
            return;
        }
        match write_rule_template(&path) {
            Ok(()) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Wrote rule template to {}", path.display()),
            ),
            Err(err) => push_toast(toasts, ToastKind::Error, format!("Could not write template: {err}")),
        }
    };

    let on_reload = move |_| {
        let loaded = load_rules();
        let origin = loaded.origin;
        state.with_mut(|st| st.install_rules(loaded.rules, origin));
        match loaded.warning {
            Some(err) => push_toast(toasts, ToastKind::Warning, format!("Using built-in rules: {err}")),
            None => push_toast(
                toasts,
                ToastKind::Info,
                format!("Rules reloaded from {}.", origin.label()),
            ),
        }
    };

    rsx! {
        div { class: "tf-stack",
            div { class: theme::PANEL_HEAD,
                div {
                    h1 { class: theme::H1, "Rule Tables" }
                    p { class: theme::MUTED, "Source: {origin_label}" }
                    p { class: theme::MONO, "{path_label}" }
                }
                div { style: "display: flex; gap: 8px",
                    button { class: theme::BTN_GHOST, onclick: on_write_template, "Write template" }
                    button { class: theme::BTN_SECONDARY, onclick: on_reload, "↻ Reload" }
                }
            }

            div { class: theme::PANEL,
                h2 { class: theme::H2, "Countries" }
                div { class: theme::TABLE_WRAP,
                    table { class: theme::TABLE,
                        thead {
                            tr {
                                th { "Code" }
                                th { "Country" }
                                th { class: theme::NUM, "Duty" }
                                th { class: theme::NUM, "Import Tax" }
                                th { class: theme::NUM, "VAT" }
                                th { "Currency" }
                            }
                        }
                        tbody {
                            for row in countries {
                                tr { key: "{row.code}",
                                    td { class: theme::MONO, "{row.code}" }
                                    td { "{row.name}" }
                                    td { class: theme::NUM, "{row.duty}" }
                                    td { class: theme::NUM, "{row.tax}" }
                                    td { class: theme::NUM, "{row.vat}" }
                                    td { "{row.currency}" }
                                }
                            }
                        }
                    }
                }
            }

            div { class: theme::PANEL,
                h2 { class: theme::H2, "HS Codes" }
                div { class: theme::TABLE_WRAP,
                    table { class: theme::TABLE,
                        thead {
                            tr {
                                th { "Code" }
                                th { "Category" }
                                th { class: theme::NUM, "Duty Multiplier" }
                            }
                        }
                        tbody {
                            for row in hs_codes {
                                tr { key: "{row.code}",
                                    td { class: theme::MONO, "{row.code}" }
                                    td { "{row.category}" }
                                    td { class: theme::NUM, "{row.multiplier}" }
                                }
                            }
                        }
                    }
                }
                p { class: theme::NOTE,
                    "A blank HS code on a calculation applies the destination's default duty without a multiplier."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn percentages_keep_one_decimal() {
        assert_eq!(percent(2.5), "2.5%");
        assert_eq!(percent(20.0), "20.0%");
    }
}
