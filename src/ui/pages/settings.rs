use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, Incoterm, Preferences, ShippingMethod},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::calculator::parse_insurance_rate,
        theme,
    },
    util::{persistence::config_dir, version::version_label},
};

fn parse_preferences(
    base: &Preferences,
    insurance_rate: &str,
    margin: &str,
) -> Result<Preferences, String> {
    let insurance_rate = parse_insurance_rate(insurance_rate)?
        .ok_or_else(|| "Insurance rate must be between 0 and 100.".to_string())?;
    let expected_profit_margin = margin
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| "Profit margin must be a number of zero or more.".to_string())?;

    Ok(Preferences {
        insurance_rate,
        expected_profit_margin,
        ..base.clone()
    })
}

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.preferences.clone());
    let countries = state.with(|st| {
        st.rules
            .countries
            .iter()
            .map(|c| (c.country_code.clone(), c.country_name.clone()))
            .collect::<Vec<_>>()
    });

    let mut draft = use_signal(|| initial.clone());
    let mut insurance_input = use_signal(|| initial.insurance_rate.to_string());
    let mut margin_input = use_signal(|| initial.expected_profit_margin.to_string());

    let current = draft();
    let origin_options = countries.clone();
    let storage_label = config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string());
    let version = version_label();

    let on_apply = {
        let mut state = state;
        move |_| match parse_preferences(&draft(), &insurance_input(), &margin_input()) {
            Ok(prefs) => {
                state.with_mut(|st| st.preferences = prefs.clone());
                draft.set(prefs);
                persist_user_state(&state);
                push_toast(toasts, ToastKind::Success, "Saved calculation defaults.");
            }
            Err(message) => push_toast(toasts, ToastKind::Error, message),
        }
    };

    let on_reset = {
        let mut state = state;
        move |_| {
            let defaults = Preferences::default();
            insurance_input.set(defaults.insurance_rate.to_string());
            margin_input.set(defaults.expected_profit_margin.to_string());
            draft.set(defaults.clone());
            state.with_mut(|st| st.preferences = defaults);
            persist_user_state(&state);
            push_toast(toasts, ToastKind::Info, "Restored default calculation settings.");
        }
    };

    rsx! {
        div { class: "tf-stack",
            section { class: theme::PANEL,
                h2 { class: theme::H2, "Calculation Defaults" }
                p { class: theme::MUTED, "New calculations start from these values." }
                div { class: "tf-grid-2",
                    div {
                        label { class: theme::LABEL, "Default Origin" }
                        select {
                            class: theme::INPUT,
                            onchange: move |evt| draft.with_mut(|d| d.origin_country = evt.value()),
                            for (code, name) in origin_options {
                                option { value: code.clone(), selected: code == current.origin_country, "{name}" }
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Default Destination" }
                        select {
                            class: theme::INPUT,
                            onchange: move |evt| draft.with_mut(|d| d.destination_country = evt.value()),
                            for (code, name) in countries {
                                option { value: code.clone(), selected: code == current.destination_country, "{name}" }
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Default Shipping Method" }
                        select {
                            class: theme::INPUT,
                            onchange: move |evt| draft.with_mut(|d| {
                                d.shipping_method = ShippingMethod::from_code_or_default(&evt.value())
                            }),
                            for method in ShippingMethod::ALL {
                                option {
                                    value: method.code(),
                                    selected: method == current.shipping_method,
                                    "{method.label()}"
                                }
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Default Incoterm" }
                        select {
                            class: theme::INPUT,
                            onchange: move |evt| draft.with_mut(|d| {
                                d.incoterm = evt.value().parse::<Incoterm>().unwrap_or_default()
                            }),
                            for term in Incoterm::ALL {
                                option { value: term.code(), selected: term == current.incoterm, "{term}" }
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Insurance Rate (%)" }
                        input {
                            class: theme::INPUT,
                            value: insurance_input(),
                            oninput: move |evt| insurance_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Expected Margin (%)" }
                        input {
                            class: theme::INPUT,
                            value: margin_input(),
                            oninput: move |evt| margin_input.set(evt.value()),
                        }
                    }
                }
                div { style: "display: flex; gap: 8px; margin-top: 16px",
                    button { class: theme::BTN_PRIMARY, onclick: on_apply, "Apply" }
                    button { class: theme::BTN_GHOST, onclick: on_reset, "Reset defaults" }
                }
            }

            section { class: theme::PANEL,
                h2 { class: theme::H2, "About" }
                p { class: theme::MUTED, "{version}" }
                p { class: theme::MUTED, "Config directory:" }
                p { class: theme::MONO, "{storage_label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_fields_onto_base() {
        let base = Preferences {
            destination_country: "GBR".into(),
            ..Preferences::default()
        };
        let prefs = parse_preferences(&base, " 1.25 ", "35").expect("valid");

        assert_eq!(prefs.insurance_rate, 1.25);
        assert_eq!(prefs.expected_profit_margin, 35.0);
        assert_eq!(prefs.destination_country, "GBR");
    }

    #[test]
    fn rejects_out_of_range_insurance() {
        let base = Preferences::default();
        assert!(parse_preferences(&base, "-1", "20").is_err());
        assert!(parse_preferences(&base, "150", "20").is_err());
        assert!(parse_preferences(&base, "abc", "20").is_err());
        assert!(parse_preferences(&base, "", "20").is_err());
    }

    #[test]
    fn rejects_negative_margin() {
        let base = Preferences::default();
        assert_eq!(
            parse_preferences(&base, "0.5", "-5").unwrap_err(),
            "Profit margin must be a number of zero or more."
        );
    }
}
