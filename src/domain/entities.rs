use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Duty, tax and VAT profile of a country. Rates are percentages (0-100).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRule {
    pub country_code: String,
    pub country_name: String,
    pub default_duty_rate: f64,
    pub default_tax_rate: f64,
    pub vat_rate: f64,
    pub currency: String,
    pub currency_symbol: String,
}

/// Harmonized System classification with a duty scaling factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsCodeRule {
    pub code: String,
    pub category: String,
    pub duty_multiplier: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum ShippingMethod {
    Air,
    #[default]
    Sea,
    Land,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 3] = [Self::Air, Self::Sea, Self::Land];

    /// Scales the base freight rate (5% of FOB).
    pub fn freight_multiplier(&self) -> f64 {
        match self {
            Self::Sea => 0.5,
            Self::Air => 2.5,
            Self::Land => 1.2,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Air => "AIR",
            Self::Sea => "SEA",
            Self::Land => "LAND",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Air => "Air",
            Self::Sea => "Sea",
            Self::Land => "Land",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Air => "✈️",
            Self::Sea => "🚢",
            Self::Land => "🚚",
        }
    }

    /// Lenient parse used by form inputs: anything unrecognised ships by sea.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for ShippingMethod {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AIR" => Ok(Self::Air),
            "SEA" => Ok(Self::Sea),
            "LAND" => Ok(Self::Land),
            _ => Err(UnknownCode(s.to_string())),
        }
    }
}

impl From<String> for ShippingMethod {
    fn from(code: String) -> Self {
        Self::from_code_or_default(&code)
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Trade term recorded with a calculation. Does not enter the cost formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    Exw,
    #[default]
    Fob,
    Cfr,
    Cif,
    Ddp,
    Dap,
}

impl Incoterm {
    pub const ALL: [Incoterm; 6] = [
        Self::Exw,
        Self::Fob,
        Self::Cfr,
        Self::Cif,
        Self::Ddp,
        Self::Dap,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Exw => "EXW",
            Self::Fob => "FOB",
            Self::Cfr => "CFR",
            Self::Cif => "CIF",
            Self::Ddp => "DDP",
            Self::Dap => "DAP",
        }
    }
}

impl FromStr for Incoterm {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|term| term.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

impl fmt::Display for Incoterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised code: {0}")]
pub struct UnknownCode(pub String);

pub const DEFAULT_INSURANCE_RATE: f64 = 0.5;
pub const DEFAULT_PROFIT_MARGIN: f64 = 20.0;

/// Parameters of a single landed-cost estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCalculationInput {
    /// Carried into the result when present; a fresh id is minted otherwise.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub hs_code: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    pub origin_country: String,
    pub destination_country: String,
    #[serde(default)]
    pub incoterm: Incoterm,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    #[serde(default = "default_insurance_rate")]
    pub insurance_rate: f64,
    #[serde(default)]
    pub expected_profit_margin: Option<f64>,
}

fn default_insurance_rate() -> f64 {
    DEFAULT_INSURANCE_RATE
}

impl Default for TradeCalculationInput {
    fn default() -> Self {
        Self {
            id: None,
            product_name: String::new(),
            hs_code: String::new(),
            quantity: 100,
            unit_price: 50.0,
            origin_country: "CHN".to_string(),
            destination_country: "USA".to_string(),
            incoterm: Incoterm::Fob,
            shipping_method: ShippingMethod::Sea,
            insurance_rate: DEFAULT_INSURANCE_RATE,
            expected_profit_margin: Some(DEFAULT_PROFIT_MARGIN),
        }
    }
}

/// A computed estimate. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCalculation {
    pub id: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub product_name: String,
    pub hs_code: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub origin_country: String,
    pub destination_country: String,
    pub incoterm: Incoterm,
    pub shipping_method: ShippingMethod,
    pub insurance_rate: f64,
    pub expected_profit_margin: f64,

    pub fob_value: f64,
    pub freight_cost: f64,
    pub insurance_cost: f64,
    pub customs_duty: f64,
    pub import_tax: f64,
    pub vat_amount: f64,
    pub handling_charges: f64,
    pub total_landed_cost: f64,
    pub cost_per_unit: f64,
}

impl TradeCalculation {
    /// Cost, insurance and freight.
    pub fn cif_value(&self) -> f64 {
        self.fob_value + self.freight_cost + self.insurance_cost
    }

    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin_country, self.destination_country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_method_parses_case_insensitively() {
        assert_eq!("air".parse::<ShippingMethod>(), Ok(ShippingMethod::Air));
        assert_eq!(" LAND ".parse::<ShippingMethod>(), Ok(ShippingMethod::Land));
        assert!("rail".parse::<ShippingMethod>().is_err());
    }

    #[test]
    fn unknown_shipping_method_falls_back_to_sea() {
        assert_eq!(
            ShippingMethod::from_code_or_default("PIPELINE"),
            ShippingMethod::Sea
        );
    }

    #[test]
    fn unknown_shipping_method_in_json_ships_by_sea() {
        let input: TradeCalculationInput = serde_json::from_str(
            r#"{ "originCountry": "CHN", "destinationCountry": "USA", "shippingMethod": "RAIL" }"#,
        )
        .expect("unknown method is tolerated");
        assert_eq!(input.shipping_method, ShippingMethod::Sea);

        let air: ShippingMethod = serde_json::from_str(r#""air""#).expect("lowercase code");
        assert_eq!(air, ShippingMethod::Air);
        assert_eq!(serde_json::to_string(&ShippingMethod::Land).expect("serialize"), r#""LAND""#);
    }

    #[test]
    fn input_defaults_apply_when_fields_are_missing() {
        let input: TradeCalculationInput = serde_json::from_str(
            r#"{ "originCountry": "CHN", "destinationCountry": "USA" }"#,
        )
        .expect("minimal input");

        assert_eq!(input.quantity, 0);
        assert_eq!(input.unit_price, 0.0);
        assert_eq!(input.insurance_rate, DEFAULT_INSURANCE_RATE);
        assert_eq!(input.shipping_method, ShippingMethod::Sea);
        assert_eq!(input.incoterm, Incoterm::Fob);
        assert_eq!(input.expected_profit_margin, None);
    }

    #[test]
    fn calculation_serializes_with_camel_case_and_upper_case_codes() {
        let calc = TradeCalculation {
            id: "abc".into(),
            timestamp: 0,
            product_name: "Shirts".into(),
            hs_code: "6109.10".into(),
            quantity: 1,
            unit_price: 1.0,
            origin_country: "CHN".into(),
            destination_country: "USA".into(),
            incoterm: Incoterm::Ddp,
            shipping_method: ShippingMethod::Air,
            insurance_rate: 0.5,
            expected_profit_margin: 20.0,
            fob_value: 1.0,
            freight_cost: 0.0,
            insurance_cost: 0.0,
            customs_duty: 0.0,
            import_tax: 0.0,
            vat_amount: 0.0,
            handling_charges: 0.0,
            total_landed_cost: 1.0,
            cost_per_unit: 1.0,
        };
        let json = serde_json::to_value(&calc).expect("serialize");
        assert_eq!(json["shippingMethod"], "AIR");
        assert_eq!(json["incoterm"], "DDP");
        assert_eq!(json["totalLandedCost"], 1.0);
        assert_eq!(json["hsCode"], "6109.10");
    }
}
