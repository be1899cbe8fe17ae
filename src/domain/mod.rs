//! Domain logic for landed-cost estimation lives here.

pub mod app_state;
pub mod entities;
pub mod history;
pub mod landed_cost;
pub mod rules;

#[allow(unused_imports)]
pub use app_state::{AppState, PersistedState, Preferences, RuleOrigin};
#[allow(unused_imports)]
pub use entities::{
    CountryRule, HsCodeRule, Incoterm, ShippingMethod, TradeCalculation, TradeCalculationInput,
};
#[allow(unused_imports)]
pub use history::{CalculationHistory, HistorySummary};
#[allow(unused_imports)]
pub use landed_cost::{cost_breakdown, suggested_unit_price, CostSegment};
#[allow(unused_imports)]
pub use rules::{RuleBook, RuleBookError, RuleLookupError};
