use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{AppState, Incoterm, ShippingMethod, TradeCalculationInput},
    ui::{
        components::{
            breakdown::CostBreakdown,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

/// Raw calculator inputs as typed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorForm {
    pub product_name: String,
    pub hs_code: String,
    pub quantity: String,
    pub unit_price: String,
    pub origin_country: String,
    pub destination_country: String,
    pub incoterm: Incoterm,
    pub shipping_method: ShippingMethod,
    pub insurance_rate: String,
    pub expected_profit_margin: String,
}

impl From<TradeCalculationInput> for CalculatorForm {
    fn from(input: TradeCalculationInput) -> Self {
        Self {
            product_name: input.product_name,
            hs_code: input.hs_code,
            quantity: input.quantity.to_string(),
            unit_price: input.unit_price.to_string(),
            origin_country: input.origin_country,
            destination_country: input.destination_country,
            incoterm: input.incoterm,
            shipping_method: input.shipping_method,
            insurance_rate: input.insurance_rate.to_string(),
            expected_profit_margin: input
                .expected_profit_margin
                .map(|margin| margin.to_string())
                .unwrap_or_default(),
        }
    }
}

impl CalculatorForm {
    /// Validates the form. The calculator itself trusts its input, so checks live here.
    pub fn to_input(&self) -> Result<TradeCalculationInput, String> {
        let quantity = match self.quantity.trim() {
            "" => 0,
            raw => raw
                .parse::<i64>()
                .ok()
                .filter(|q| *q >= 0)
                .ok_or_else(|| "Quantity must be a whole number of zero or more.".to_string())?,
        };
        let unit_price = parse_non_negative(&self.unit_price, "Unit price")?.unwrap_or(0.0);
        let insurance_rate = parse_insurance_rate(&self.insurance_rate)?
            .unwrap_or(crate::domain::entities::DEFAULT_INSURANCE_RATE);
        let expected_profit_margin =
            parse_non_negative(&self.expected_profit_margin, "Profit margin")?;

        if self.origin_country.is_empty() || self.destination_country.is_empty() {
            return Err("Pick both an origin and a destination country.".to_string());
        }

        Ok(TradeCalculationInput {
            id: None,
            product_name: self.product_name.trim().to_string(),
            hs_code: self.hs_code.trim().to_string(),
            quantity,
            unit_price,
            origin_country: self.origin_country.clone(),
            destination_country: self.destination_country.clone(),
            incoterm: self.incoterm,
            shipping_method: self.shipping_method,
            insurance_rate,
            expected_profit_margin,
        })
    }
}

/// Insurance is a percentage of FOB, so it must sit in 0..=100. Blank yields `None`.
pub(crate) fn parse_insurance_rate(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=100.0).contains(value))
        .map(Some)
        .ok_or_else(|| "Insurance rate must be between 0 and 100.".to_string())
}

fn parse_non_negative(raw: &str, field: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(Some)
        .ok_or_else(|| format!("{field} must be a number of zero or more."))
}

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut form = use_signal(|| CalculatorForm::from(state.with(|st| st.draft_input())));

    let countries = state.with(|st| st.rules.countries.clone());
    let hs_codes = state.with(|st| st.rules.hs_codes.clone());
    let pending = state.with(|st| st.pending.clone());
    let current = form();

    let on_calculate = {
        let mut state = state;
        move |evt: FormEvent| {
            evt.prevent_default();
            let input = match form.with(|f| f.to_input()) {
                Ok(input) => input,
                Err(message) => {
                    push_toast(toasts, ToastKind::Warning, message);
                    return;
                }
            };

            match state.with(|st| st.rules.calculate(&input)) {
                Ok(calculation) => {
                    tracing::info!(
                        route = %calculation.route_label(),
                        total = calculation.total_landed_cost,
                        "calculated landed cost"
                    );
                    state.with_mut(|st| st.pending = Some(calculation));
                }
                Err(err) => push_toast(toasts, ToastKind::Error, format!("Cannot calculate: {err}")),
            }
        }
    };

    let on_save = {
        let mut state = state;
        move |_| match state.with_mut(|st| st.save_pending()) {
            Some(_) => {
                push_toast(toasts, ToastKind::Success, "Calculation saved to history.");
                nav.push(Route::Dashboard {});
            }
            None => push_toast(toasts, ToastKind::Warning, "Calculate before saving."),
        }
    };

    let result_view = pending.map(|calculation| {
        let destination = state.with(|st| st.rules.country(&calculation.destination_country).cloned());
        let (profile, currency) = destination
            .map(|c| (c.country_name, c.currency))
            .unwrap_or_else(|| (calculation.destination_country.clone(), "local currency".to_string()));
        (calculation, profile, currency)
    });

    rsx! {
        div { class: "tf-split",
            div { class: theme::PANEL,
                h2 { class: theme::H2, "📝 Trade Parameters" }
                form { class: "tf-form", onsubmit: on_calculate,
                    div {
                        label { class: theme::LABEL, "Product Name" }
                        input {
                            class: theme::INPUT,
                            value: current.product_name.clone(),
                            placeholder: "e.g. Premium Cotton T-Shirts",
                            oninput: move |evt| form.with_mut(|f| f.product_name = evt.value()),
                        }
                    }
                    div { class: "tf-grid-2",
                        div {
                            label { class: theme::LABEL, "HS Code" }
                            select {
                                class: theme::INPUT,
                                value: current.hs_code.clone(),
                                onchange: move |evt| form.with_mut(|f| f.hs_code = evt.value()),
                                option { value: "", "Select HS Code..." }
                                for hs in hs_codes.iter() {
                                    option {
                                        value: hs.code.clone(),
                                        selected: hs.code == current.hs_code,
                                        "{hs.code} - {hs.category}"
                                    }
                                }
                            }
                        }
                        div {
                            label { class: theme::LABEL, "Quantity" }
                            input {
                                class: theme::INPUT,
                                inputmode: "numeric",
                                value: current.quantity.clone(),
                                oninput: move |evt| form.with_mut(|f| f.quantity = evt.value()),
                            }
                        }
                    }
                    div { class: "tf-grid-2",
                        div {
                            label { class: theme::LABEL, "Unit Price" }
                            input {
                                class: theme::INPUT,
                                inputmode: "decimal",
                                value: current.unit_price.clone(),
                                oninput: move |evt| form.with_mut(|f| f.unit_price = evt.value()),
                            }
                        }
                        div {
                            label { class: theme::LABEL, "Incoterm" }
                            select {
                                class: theme::INPUT,
                                onchange: move |evt| form.with_mut(|f| {
                                    f.incoterm = evt.value().parse().unwrap_or_default()
                                }),
                                for term in Incoterm::ALL {
                                    option {
                                        value: term.code(),
                                        selected: term == current.incoterm,
                                        "{term}"
                                    }
                                }
                            }
                        }
                    }
                    div { class: "tf-grid-2",
                        CountrySelect {
                            label: "Origin",
                            selected: current.origin_country.clone(),
                            options: countries.iter().map(|c| (c.country_code.clone(), c.country_name.clone())).collect::<Vec<_>>(),
                            on_change: move |code: String| form.with_mut(|f| f.origin_country = code),
                        }
                        CountrySelect {
                            label: "Destination",
                            selected: current.destination_country.clone(),
                            options: countries.iter().map(|c| (c.country_code.clone(), c.country_name.clone())).collect::<Vec<_>>(),
                            on_change: move |code: String| form.with_mut(|f| f.destination_country = code),
                        }
                    }
                    div { class: "tf-grid-2",
                        div {
                            label { class: theme::LABEL, "Insurance Rate (%)" }
                            input {
                                class: theme::INPUT,
                                inputmode: "decimal",
                                value: current.insurance_rate.clone(),
                                oninput: move |evt| form.with_mut(|f| f.insurance_rate = evt.value()),
                            }
                        }
                        div {
                            label { class: theme::LABEL, "Expected Margin (%)" }
                            input {
                                class: theme::INPUT,
                                inputmode: "decimal",
                                value: current.expected_profit_margin.clone(),
                                oninput: move |evt| form.with_mut(|f| f.expected_profit_margin = evt.value()),
                            }
                        }
                    }
                    div {
                        label { class: theme::LABEL, "Shipping Method" }
                        div { class: "tf-method-grid",
                            for method in [ShippingMethod::Sea, ShippingMethod::Air, ShippingMethod::Land] {
                                button {
                                    r#type: "button",
                                    class: theme::method_button(method == current.shipping_method),
                                    onclick: move |_| form.with_mut(|f| f.shipping_method = method),
                                    span { style: "font-size: 20px", "{method.emoji()}" }
                                    span { "{method.label()}" }
                                }
                            }
                        }
                    }
                    button { class: theme::BTN_PRIMARY, r#type: "submit", "Calculate Landed Cost ›" }
                }
            }

            div {
                match result_view {
                    Some((calculation, profile, currency)) => rsx! {
                        div { class: theme::PANEL,
                            div { class: theme::PANEL_HEAD,
                                h2 { class: theme::H2, style: "margin: 0", "📊 Calculation Results" }
                                button { class: theme::BTN_SECONDARY, onclick: on_save, "+ Save Record" }
                            }
                            CostBreakdown { calculation }
                            p { class: theme::NOTE,
                                "Landed cost includes freight, insurance, port handling, and estimated customs duties based on the {profile} profile. Local VAT may be recoverable depending on your business status."
                            }
                            p { class: theme::NOTE,
                                "All amounts are in the currency of the unit price. The destination settles in {currency}; no conversion is applied."
                            }
                        }
                    },
                    None => rsx! {
                        div { class: theme::PLACEHOLDER,
                            p { style: "font-size: 40px; margin: 0", "ℹ️" }
                            h3 { "No Calculation Yet" }
                            p { "Fill in the parameters on the left and click calculate to see your detailed landed cost breakdown." }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn CountrySelect(
    label: &'static str,
    selected: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
) -> Element {
    let known = options.iter().any(|(code, _)| *code == selected);
    rsx! {
        div {
            label { class: theme::LABEL, "{label}" }
            select {
                class: theme::INPUT,
                onchange: move |evt| on_change.call(evt.value()),
                option { value: "", selected: !known, "Select country..." }
                for (code, name) in options {
                    option { value: code.clone(), selected: code == selected, "{name}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CalculatorForm {
        CalculatorForm::from(TradeCalculationInput::default())
    }

    #[test]
    fn default_form_parses_back_to_the_same_input() {
        let parsed = form().to_input().expect("valid defaults");
        assert_eq!(parsed, TradeCalculationInput::default());
    }

    #[test]
    fn blank_numbers_take_their_defaults() {
        let mut f = form();
        f.quantity = String::new();
        f.unit_price = " ".into();
        f.insurance_rate = String::new();
        f.expected_profit_margin = String::new();

        let parsed = f.to_input().expect("blank is allowed");
        assert_eq!(parsed.quantity, 0);
        assert_eq!(parsed.unit_price, 0.0);
        assert_eq!(parsed.insurance_rate, 0.5);
        assert_eq!(parsed.expected_profit_margin, None);
    }

    #[test]
    fn rejects_negative_and_fractional_quantities() {
        let mut f = form();
        f.quantity = "-3".into();
        assert!(f.to_input().is_err());
        f.quantity = "2.5".into();
        assert!(f.to_input().is_err());
    }

    #[test]
    fn rejects_non_numeric_prices() {
        let mut f = form();
        f.unit_price = "cheap".into();
        assert_eq!(
            f.to_input().unwrap_err(),
            "Unit price must be a number of zero or more."
        );
        f.unit_price = "NaN".into();
        assert!(f.to_input().is_err());
    }

    #[test]
    fn insurance_rate_is_a_percentage() {
        let mut f = form();
        f.insurance_rate = "100".into();
        assert_eq!(f.to_input().expect("upper bound").insurance_rate, 100.0);
        f.insurance_rate = "150".into();
        assert_eq!(
            f.to_input().unwrap_err(),
            "Insurance rate must be between 0 and 100."
        );
        assert_eq!(parse_insurance_rate("-1").map_err(|_| ()), Err(()));
    }

    #[test]
    fn trims_descriptive_fields() {
        let mut f = form();
        f.product_name = "  Laptops ".into();
        f.hs_code = " 8471.30 ".into();

        let parsed = f.to_input().expect("valid");
        assert_eq!(parsed.product_name, "Laptops");
        assert_eq!(parsed.hs_code, "8471.30");
    }
}
