//! Session log of saved calculations.

use std::collections::HashSet;

use super::entities::TradeCalculation;

/// Append-only record of calculations. Entries are never edited or removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculationHistory {
    entries: Vec<TradeCalculation>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistorySummary {
    pub total_calculations: usize,
    pub total_landed_cost: f64,
    pub distinct_hs_codes: usize,
}

impl CalculationHistory {
    pub fn record(&mut self, calculation: TradeCalculation) {
        tracing::info!(
            id = %calculation.id,
            route = %calculation.route_label(),
            total = calculation.total_landed_cost,
            "recorded calculation"
        );
        self.entries.push(calculation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&TradeCalculation> {
        self.entries.iter().find(|c| c.id == id)
    }

    /// Most recently recorded first.
    pub fn latest_first(&self) -> impl Iterator<Item = &TradeCalculation> {
        self.entries.iter().rev()
    }

    pub fn summary(&self) -> HistorySummary {
        let distinct_hs_codes = self
            .entries
            .iter()
            .map(|c| c.hs_code.as_str())
            .collect::<HashSet<_>>()
            .len();

        HistorySummary {
            total_calculations: self.entries.len(),
            total_landed_cost: self.entries.iter().map(|c| c.total_landed_cost).sum(),
            distinct_hs_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::RuleBook;
    use crate::domain::TradeCalculationInput;

    fn calc(id: &str, hs_code: &str, quantity: i64) -> TradeCalculation {
        let input = TradeCalculationInput {
            id: Some(id.to_string()),
            hs_code: hs_code.to_string(),
            quantity,
            ..TradeCalculationInput::default()
        };
        RuleBook::default().calculate(&input).expect("seed rules resolve")
    }

    #[test]
    fn newest_entries_come_first() {
        let mut history = CalculationHistory::default();
        history.record(calc("a", "8517.12", 1));
        history.record(calc("b", "8471.30", 2));
        history.record(calc("c", "", 3));

        let ids: Vec<_> = history.latest_first().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.get("b").map(|c| c.quantity), Some(2));
    }

    #[test]
    fn summary_aggregates_totals_and_codes() {
        let mut history = CalculationHistory::default();
        assert_eq!(history.summary(), HistorySummary::default());

        let first = calc("a", "8517.12", 10);
        let second = calc("b", "8517.12", 20);
        let third = calc("c", "", 30);
        let expected_total =
            first.total_landed_cost + second.total_landed_cost + third.total_landed_cost;
        history.record(first);
        history.record(second);
        history.record(third);

        let summary = history.summary();
        assert_eq!(summary.total_calculations, 3);
        assert_eq!(summary.distinct_hs_codes, 2);
        assert!((summary.total_landed_cost - expected_total).abs() < 1e-9);
    }
}
