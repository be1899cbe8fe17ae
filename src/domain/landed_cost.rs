//! Landed-cost estimation: FOB through freight, insurance, duty, tax, VAT and
//! handling to a total and per-unit cost.

use time::OffsetDateTime;
use uuid::Uuid;

use super::entities::{
    CountryRule, HsCodeRule, TradeCalculation, TradeCalculationInput, DEFAULT_PROFIT_MARGIN,
};

/// Base freight as a share of FOB, before the shipping-method multiplier.
const BASE_FREIGHT_RATE: f64 = 0.05;
/// Flat port fee per shipment.
const HANDLING_BASE_FEE: f64 = 150.0;
const HANDLING_PER_UNIT: f64 = 0.1;

/// Computes a landed-cost estimate stamped with the current time.
///
/// Both country rules must already be resolved by the caller. Nothing is
/// validated: negative quantities or rates simply propagate through the math.
pub fn compute_landed_cost(
    input: &TradeCalculationInput,
    origin: &CountryRule,
    destination: &CountryRule,
    hs_rule: Option<&HsCodeRule>,
) -> TradeCalculation {
    compute_landed_cost_at(input, origin, destination, hs_rule, OffsetDateTime::now_utc())
}

pub fn compute_landed_cost_at(
    input: &TradeCalculationInput,
    origin: &CountryRule,
    destination: &CountryRule,
    hs_rule: Option<&HsCodeRule>,
    now: OffsetDateTime,
) -> TradeCalculation {
    let quantity = input.quantity as f64;

    let fob_value = quantity * input.unit_price;
    let freight_cost = fob_value * BASE_FREIGHT_RATE * input.shipping_method.freight_multiplier();
    let insurance_cost = fob_value * (input.insurance_rate / 100.0);
    let cif_value = fob_value + freight_cost + insurance_cost;

    let hs_multiplier = hs_rule.map(|rule| rule.duty_multiplier).unwrap_or(1.0);
    let customs_duty = cif_value * (destination.default_duty_rate / 100.0) * hs_multiplier;
    let import_tax = cif_value * (destination.default_tax_rate / 100.0);
    // VAT base includes duty and import tax.
    let vat_amount = (cif_value + customs_duty + import_tax) * (destination.vat_rate / 100.0);

    let handling_charges = HANDLING_BASE_FEE + quantity * HANDLING_PER_UNIT;

    let total_landed_cost = cif_value + customs_duty + import_tax + vat_amount + handling_charges;
    let cost_per_unit = if input.quantity > 0 {
        total_landed_cost / quantity
    } else {
        0.0
    };

    let expected_profit_margin = input
        .expected_profit_margin
        .filter(|margin| *margin != 0.0 && !margin.is_nan())
        .unwrap_or(DEFAULT_PROFIT_MARGIN);

    tracing::debug!(
        origin = %origin.country_code,
        destination = %destination.country_code,
        hs_code = hs_rule.map(|rule| rule.code.as_str()).unwrap_or("-"),
        method = %input.shipping_method,
        total_landed_cost,
        "computed landed cost"
    );

    TradeCalculation {
        id: input
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        timestamp: (now.unix_timestamp_nanos() / 1_000_000) as i64,
        product_name: input.product_name.clone(),
        hs_code: input.hs_code.clone(),
        quantity: input.quantity,
        unit_price: input.unit_price,
        origin_country: input.origin_country.clone(),
        destination_country: input.destination_country.clone(),
        incoterm: input.incoterm,
        shipping_method: input.shipping_method,
        insurance_rate: input.insurance_rate,
        expected_profit_margin,
        fob_value,
        freight_cost,
        insurance_cost,
        customs_duty,
        import_tax,
        vat_amount,
        handling_charges,
        total_landed_cost,
        cost_per_unit,
    }
}

/// One slice of the landed cost, as shown in the calculator breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct CostSegment {
    pub label: &'static str,
    pub value: f64,
    /// Fraction of the total landed cost, 0 when the total is 0.
    pub share: f64,
    pub color: &'static str,
}

pub fn cost_breakdown(calc: &TradeCalculation) -> Vec<CostSegment> {
    let total = calc.total_landed_cost;
    let segments = [
        ("FOB Value", calc.fob_value, "#2563eb"),
        ("Freight", calc.freight_cost, "#3b82f6"),
        ("Duty & Tax", calc.customs_duty + calc.import_tax, "#ef4444"),
        ("VAT", calc.vat_amount, "#10b981"),
        (
            "Misc/Handling",
            calc.handling_charges + calc.insurance_cost,
            "#f59e0b",
        ),
    ];

    segments
        .into_iter()
        .map(|(label, value, color)| CostSegment {
            label,
            value,
            share: if total == 0.0 { 0.0 } else { value / total },
            color,
        })
        .collect()
}

/// Per-unit selling price that realises the expected profit margin.
pub fn suggested_unit_price(calc: &TradeCalculation) -> f64 {
    calc.cost_per_unit * (1.0 + calc.expected_profit_margin / 100.0)
}
