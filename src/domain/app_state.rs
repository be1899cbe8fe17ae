use serde::{Deserialize, Serialize};

use super::entities::{
    Incoterm, ShippingMethod, TradeCalculation, TradeCalculationInput, DEFAULT_INSURANCE_RATE,
    DEFAULT_PROFIT_MARGIN,
};
use super::history::CalculationHistory;
use super::rules::RuleBook;

/// Where the active rule tables came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuleOrigin {
    #[default]
    BuiltIn,
    ConfigFile,
}

impl RuleOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            RuleOrigin::BuiltIn => "Built-in defaults",
            RuleOrigin::ConfigFile => "rules.json",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub rules: RuleBook,
    pub rule_origin: RuleOrigin,
    pub history: CalculationHistory,
    pub preferences: Preferences,
    /// Latest unsaved calculator result.
    pub pending: Option<TradeCalculation>,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.preferences = persisted.preferences;
        self.reconcile_preferences();
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            preferences: self.preferences.clone(),
        }
    }

    /// Replaces the rule snapshot. Existing history keeps the figures it was priced with.
    /// Preference countries missing from the new tables are replaced by the first known one.
    pub fn install_rules(&mut self, rules: RuleBook, origin: RuleOrigin) {
        self.rules = rules;
        self.rule_origin = origin;
        self.reconcile_preferences();
    }

    fn reconcile_preferences(&mut self) {
        let prefs = &mut self.preferences;
        prefs.origin_country = self.rules.known_country_or_first(&prefs.origin_country);
        prefs.destination_country = self.rules.known_country_or_first(&prefs.destination_country);
    }

    /// Moves the pending result into history. Returns the saved id.
    pub fn save_pending(&mut self) -> Option<String> {
        let calc = self.pending.take()?;
        let id = calc.id.clone();
        self.history.record(calc);
        Some(id)
    }

    /// Seed for a fresh calculator form.
    pub fn draft_input(&self) -> TradeCalculationInput {
        let prefs = &self.preferences;
        TradeCalculationInput {
            origin_country: self.rules.known_country_or_first(&prefs.origin_country),
            destination_country: self.rules.known_country_or_first(&prefs.destination_country),
            shipping_method: prefs.shipping_method,
            incoterm: prefs.incoterm,
            insurance_rate: prefs.insurance_rate,
            expected_profit_margin: Some(prefs.expected_profit_margin),
            ..TradeCalculationInput::default()
        }
    }
}

/// Defaults applied to new calculations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub origin_country: String,
    pub destination_country: String,
    pub shipping_method: ShippingMethod,
    pub incoterm: Incoterm,
    pub insurance_rate: f64,
    pub expected_profit_margin: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            origin_country: "CHN".to_string(),
            destination_country: "USA".to_string(),
            shipping_method: ShippingMethod::Sea,
            incoterm: Incoterm::Fob,
            insurance_rate: DEFAULT_INSURANCE_RATE,
            expected_profit_margin: DEFAULT_PROFIT_MARGIN,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub preferences: Preferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_pending_moves_result_into_history() {
        let mut state = AppState::default();
        assert_eq!(state.save_pending(), None);

        let calc = state
            .rules
            .calculate(&state.draft_input())
            .expect("defaults resolve against seed rules");
        let id = calc.id.clone();
        state.pending = Some(calc);

        assert_eq!(state.save_pending(), Some(id.clone()));
        assert!(state.pending.is_none());
        assert_eq!(state.history.len(), 1);
        assert!(state.history.get(&id).is_some());
    }

    #[test]
    fn draft_input_follows_preferences() {
        let mut state = AppState::default();
        state.apply_persisted(PersistedState {
            preferences: Preferences {
                origin_country: "IND".into(),
                destination_country: "GBR".into(),
                shipping_method: ShippingMethod::Air,
                incoterm: Incoterm::Ddp,
                insurance_rate: 1.0,
                expected_profit_margin: 35.0,
            },
        });

        let draft = state.draft_input();
        assert_eq!(draft.origin_country, "IND");
        assert_eq!(draft.destination_country, "GBR");
        assert_eq!(draft.shipping_method, ShippingMethod::Air);
        assert_eq!(draft.incoterm, Incoterm::Ddp);
        assert_eq!(draft.insurance_rate, 1.0);
        assert_eq!(draft.expected_profit_margin, Some(35.0));
        assert_eq!(state.to_persisted().preferences, state.preferences);
    }

    #[test]
    fn partial_preferences_fill_from_defaults() {
        let persisted: PersistedState =
            serde_json::from_str(r#"{ "preferences": { "shippingMethod": "LAND" } }"#)
                .expect("parses");

        assert_eq!(persisted.preferences.shipping_method, ShippingMethod::Land);
        assert_eq!(persisted.preferences.origin_country, "CHN");
        assert_eq!(persisted.preferences.insurance_rate, DEFAULT_INSURANCE_RATE);
    }

    fn rules_without(codes: &[&str]) -> RuleBook {
        let mut rules = RuleBook::default();
        rules
            .countries
            .retain(|c| !codes.contains(&c.country_code.as_str()));
        rules
    }

    #[test]
    fn installing_rules_replaces_unknown_preference_countries() {
        let mut state = AppState::default();
        state.install_rules(rules_without(&["CHN"]), RuleOrigin::ConfigFile);

        assert_eq!(state.preferences.origin_country, "USA");
        assert_eq!(state.preferences.destination_country, "USA");
        let draft = state.draft_input();
        assert!(state.rules.calculate(&draft).is_ok());
    }

    #[test]
    fn stale_preferences_are_reconciled_on_load() {
        let mut state = AppState::default();
        state.install_rules(rules_without(&["IND"]), RuleOrigin::ConfigFile);
        state.apply_persisted(PersistedState {
            preferences: Preferences {
                origin_country: "IND".into(),
                destination_country: "GBR".into(),
                ..Preferences::default()
            },
        });

        assert_eq!(state.preferences.origin_country, "USA");
        assert_eq!(state.preferences.destination_country, "GBR");
    }

    #[test]
    fn unknown_method_keeps_the_rest_of_the_preferences() {
        let persisted: PersistedState = serde_json::from_str(
            r#"{ "preferences": { "shippingMethod": "rail", "destinationCountry": "GBR" } }"#,
        )
        .expect("parses");

        assert_eq!(persisted.preferences.shipping_method, ShippingMethod::Sea);
        assert_eq!(persisted.preferences.destination_country, "GBR");
    }
}
