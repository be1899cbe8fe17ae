//! Reference rule tables: country duty/tax profiles and HS-code multipliers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{CountryRule, HsCodeRule, TradeCalculation, TradeCalculationInput};
use super::landed_cost::compute_landed_cost;

/// Immutable snapshot of the rule tables a calculation is priced against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBook {
    pub countries: Vec<CountryRule>,
    #[serde(default)]
    pub hs_codes: Vec<HsCodeRule>,
}

/// Rules an input resolved to. Borrowed from the [`RuleBook`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRules<'a> {
    pub origin: &'a CountryRule,
    pub destination: &'a CountryRule,
    pub hs_code: Option<&'a HsCodeRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleLookupError {
    #[error("no country rule for code {0:?}")]
    UnknownCountry(String),
    #[error("no HS code rule for {0:?}")]
    UnknownHsCode(String),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RuleBookError {
    #[error("duplicate country code {0:?}")]
    DuplicateCountry(String),
    #[error("duplicate HS code {0:?}")]
    DuplicateHsCode(String),
    #[error("rule table contains an empty {0} key")]
    EmptyKey(&'static str),
    #[error("invalid {field} for {key:?}: {value}")]
    InvalidRate {
        key: String,
        field: &'static str,
        value: f64,
    },
}

impl RuleBook {
    pub fn country(&self, code: &str) -> Option<&CountryRule> {
        self.countries.iter().find(|c| c.country_code == code)
    }

    pub fn hs_code(&self, code: &str) -> Option<&HsCodeRule> {
        self.hs_codes.iter().find(|h| h.code == code)
    }

    /// `code` if the tables know it, else the first listed country. Unchanged when the table is empty.
    pub fn known_country_or_first(&self, code: &str) -> String {
        match (self.country(code), self.countries.first()) {
            (Some(_), _) | (None, None) => code.to_string(),
            (None, Some(first)) => first.country_code.clone(),
        }
    }

    /// Checks key uniqueness and that every rate is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), RuleBookError> {
        let mut seen = HashSet::new();
        for country in &self.countries {
            if country.country_code.trim().is_empty() {
                return Err(RuleBookError::EmptyKey("country"));
            }
            if !seen.insert(country.country_code.as_str()) {
                return Err(RuleBookError::DuplicateCountry(country.country_code.clone()));
            }
            for (field, value) in [
                ("defaultDutyRate", country.default_duty_rate),
                ("defaultTaxRate", country.default_tax_rate),
                ("vatRate", country.vat_rate),
            ] {
                check_rate(&country.country_code, field, value)?;
            }
        }

        let mut seen = HashSet::new();
        for hs in &self.hs_codes {
            if hs.code.trim().is_empty() {
                return Err(RuleBookError::EmptyKey("HS code"));
            }
            if !seen.insert(hs.code.as_str()) {
                return Err(RuleBookError::DuplicateHsCode(hs.code.clone()));
            }
            check_rate(&hs.code, "dutyMultiplier", hs.duty_multiplier)?;
        }

        Ok(())
    }

    /// Looks up the rules referenced by `input`. An empty HS code means none.
    pub fn resolve(&self, input: &TradeCalculationInput) -> Result<ResolvedRules<'_>, RuleLookupError> {
        let origin = self
            .country(&input.origin_country)
            .ok_or_else(|| RuleLookupError::UnknownCountry(input.origin_country.clone()))?;
        let destination = self
            .country(&input.destination_country)
            .ok_or_else(|| RuleLookupError::UnknownCountry(input.destination_country.clone()))?;

        let hs_code = match input.hs_code.trim() {
            "" => None,
            code => Some(
                self.hs_code(code)
                    .ok_or_else(|| RuleLookupError::UnknownHsCode(code.to_string()))?,
            ),
        };

        Ok(ResolvedRules {
            origin,
            destination,
            hs_code,
        })
    }

    pub fn calculate(&self, input: &TradeCalculationInput) -> Result<TradeCalculation, RuleLookupError> {
        let rules = self.resolve(input)?;
        Ok(compute_landed_cost(
            input,
            rules.origin,
            rules.destination,
            rules.hs_code,
        ))
    }
}

fn check_rate(key: &str, field: &'static str, value: f64) -> Result<(), RuleBookError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RuleBookError::InvalidRate {
            key: key.to_string(),
            field,
            value,
        })
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            countries: default_country_rules(),
            hs_codes: default_hs_codes(),
        }
    }
}

fn country(
    code: &str,
    name: &str,
    duty: f64,
    tax: f64,
    vat: f64,
    currency: &str,
    symbol: &str,
) -> CountryRule {
    CountryRule {
        country_code: code.to_string(),
        country_name: name.to_string(),
        default_duty_rate: duty,
        default_tax_rate: tax,
        vat_rate: vat,
        currency: currency.to_string(),
        currency_symbol: symbol.to_string(),
    }
}

fn hs(code: &str, category: &str, multiplier: f64) -> HsCodeRule {
    HsCodeRule {
        code: code.to_string(),
        category: category.to_string(),
        duty_multiplier: multiplier,
    }
}

pub fn default_country_rules() -> Vec<CountryRule> {
    vec![
        country("USA", "United States", 2.5, 0.0, 0.0, "USD", "$"),
        country("GBR", "United Kingdom", 4.5, 2.0, 20.0, "GBP", "£"),
        country("CHN", "China", 15.0, 13.0, 13.0, "CNY", "¥"),
        country("DEU", "Germany", 5.0, 0.0, 19.0, "EUR", "€"),
        country("IND", "India", 10.0, 12.0, 18.0, "INR", "₹"),
    ]
}

pub fn default_hs_codes() -> Vec<HsCodeRule> {
    vec![
        hs("8517.12", "Mobile Telephones", 1.0),
        hs("8471.30", "Laptops/Portable Computers", 0.8),
        hs("6109.10", "Cotton T-shirts", 1.5),
        hs("3004.90", "Medicaments", 0.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: &str, destination: &str, hs_code: &str) -> TradeCalculationInput {
        TradeCalculationInput {
            hs_code: hs_code.to_string(),
            origin_country: origin.to_string(),
            destination_country: destination.to_string(),
            ..TradeCalculationInput::default()
        }
    }

    #[test]
    fn known_country_or_first_falls_back_to_the_first_row() {
        let book = RuleBook::default();
        assert_eq!(book.known_country_or_first("DEU"), "DEU");
        assert_eq!(book.known_country_or_first("XXX"), "USA");

        let empty = RuleBook {
            countries: Vec::new(),
            hs_codes: Vec::new(),
        };
        assert_eq!(empty.known_country_or_first("XXX"), "XXX");
    }

    #[test]
    fn seed_tables_are_valid() {
        let book = RuleBook::default();
        assert_eq!(book.countries.len(), 5);
        assert_eq!(book.hs_codes.len(), 4);
        assert_eq!(book.validate(), Ok(()));
        assert_eq!(book.country("GBR").map(|c| c.vat_rate), Some(20.0));
        assert_eq!(book.hs_code("8471.30").map(|h| h.duty_multiplier), Some(0.8));
    }

    #[test]
    fn resolve_finds_all_three_rules() {
        let book = RuleBook::default();
        let rules = book.resolve(&request("CHN", "DEU", "6109.10")).expect("resolves");

        assert_eq!(rules.origin.country_code, "CHN");
        assert_eq!(rules.destination.country_code, "DEU");
        assert_eq!(rules.hs_code.map(|h| h.category.as_str()), Some("Cotton T-shirts"));
    }

    #[test]
    fn blank_hs_code_resolves_to_none() {
        let book = RuleBook::default();
        let rules = book.resolve(&request("CHN", "USA", "  ")).expect("resolves");
        assert!(rules.hs_code.is_none());
    }

    #[test]
    fn unknown_codes_are_named_in_the_error() {
        let book = RuleBook::default();

        assert_eq!(
            book.resolve(&request("FRA", "USA", "")).unwrap_err(),
            RuleLookupError::UnknownCountry("FRA".into())
        );
        assert_eq!(
            book.resolve(&request("CHN", "BRA", "")).unwrap_err(),
            RuleLookupError::UnknownCountry("BRA".into())
        );
        assert_eq!(
            book.resolve(&request("CHN", "USA", "0101.21")).unwrap_err(),
            RuleLookupError::UnknownHsCode("0101.21".into())
        );
    }

    #[test]
    fn calculate_uses_destination_rates() {
        let book = RuleBook::default();
        let mut input = request("USA", "CHN", "8517.12");
        input.quantity = 100;
        input.unit_price = 50.0;

        let calc = book.calculate(&input).expect("calculates");
        assert!((calc.customs_duty - 772.5).abs() < 1e-9);
        assert!((calc.import_tax - 669.5).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_duplicates_and_bad_rates() {
        let mut book = RuleBook::default();
        book.countries.push(book.countries[0].clone());
        assert_eq!(
            book.validate(),
            Err(RuleBookError::DuplicateCountry("USA".into()))
        );

        let mut book = RuleBook::default();
        book.hs_codes.push(book.hs_codes[2].clone());
        assert_eq!(
            book.validate(),
            Err(RuleBookError::DuplicateHsCode("6109.10".into()))
        );

        let mut book = RuleBook::default();
        book.countries[1].vat_rate = -1.0;
        assert!(matches!(
            book.validate(),
            Err(RuleBookError::InvalidRate { field: "vatRate", .. })
        ));

        let mut book = RuleBook::default();
        book.hs_codes[0].duty_multiplier = f64::NAN;
        assert!(matches!(
            book.validate(),
            Err(RuleBookError::InvalidRate { field: "dutyMultiplier", .. })
        ));

        let mut book = RuleBook::default();
        book.countries[0].country_code = " ".into();
        assert_eq!(book.validate(), Err(RuleBookError::EmptyKey("country")));
    }

    #[test]
    fn rule_book_reads_camel_case_json() {
        let book: RuleBook = serde_json::from_str(
            r#"{
                "countries": [{
                    "countryCode": "JPN", "countryName": "Japan",
                    "defaultDutyRate": 3.0, "defaultTaxRate": 0.0, "vatRate": 10.0,
                    "currency": "JPY", "currencySymbol": "¥"
                }]
            }"#,
        )
        .expect("parses");

        assert!(book.hs_codes.is_empty());
        assert_eq!(book.country("JPN").map(|c| c.vat_rate), Some(10.0));
    }
}
