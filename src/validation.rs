//! Form input validation ahead of the simulation engine
//!
//! The engine accepts any request; this layer rejects incomplete or
//! malformed user input and produces the message shown to the user.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::simulation::SimulationRequest;

/// Timeframe used when the form leaves it unset
pub const DEFAULT_TIMEFRAME: &str = "12";

/// Longest accepted horizon (100 years)
pub const MAX_TIMEFRAME_MONTHS: u32 = 1200;

/// Rejections surfaced to the user as a notification
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid investment amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid timeframe: {0:?} (expected a whole number of months up to 1200)")]
    InvalidTimeframe(String),
}

/// Raw simulation form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationForm {
    /// Investment amount text; JSON numbers are accepted too
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,

    /// Horizon in months as text ("1", "3", "6", "12")
    #[serde(default = "default_timeframe", deserialize_with = "timeframe_string")]
    pub timeframe: String,

    /// Selected strategy name
    #[serde(default)]
    pub strategy: Option<String>,

    /// Auto-compound checkbox
    #[serde(default)]
    pub compounding: bool,
}

fn default_timeframe() -> String {
    DEFAULT_TIMEFRAME.to_string()
}

impl SimulationForm {
    pub fn new(amount: &str, timeframe: &str, strategy: &str, compounding: bool) -> Self {
        Self {
            amount: Some(amount.to_string()),
            timeframe: timeframe.to_string(),
            strategy: Some(strategy.to_string()),
            compounding,
        }
    }

    /// Validate the form and build a simulation request
    pub fn validate(&self) -> Result<SimulationRequest, InputError> {
        let amount = non_blank(self.amount.as_deref()).ok_or(InputError::MissingFields)?;
        let strategy = non_blank(self.strategy.as_deref()).ok_or(InputError::MissingFields)?;

        let principal = parse_amount(amount)?;
        let months = parse_timeframe(&self.timeframe)?;

        Ok(SimulationRequest::new(principal, strategy, months).with_compounding(self.compounding))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a positive, finite investment amount
pub fn parse_amount(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(InputError::InvalidAmount(trimmed.to_string())),
    }
}

/// Parse a timeframe into a month count no larger than `MAX_TIMEFRAME_MONTHS`
pub fn parse_timeframe(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(months) if months <= MAX_TIMEFRAME_MONTHS => Ok(months),
        _ => Err(InputError::InvalidTimeframe(trimmed.to_string())),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

fn timeframe_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(string_or_number(deserializer)?.unwrap_or_else(default_timeframe))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = SimulationForm::new("1000", "6", "Cetus Finance", false);
        let request = form.validate().unwrap();

        assert_eq!(request.principal, 1000.0);
        assert_eq!(request.months, 6);
        assert_eq!(request.strategy_name, "Cetus Finance");
        assert!(!request.compounding_enabled);
    }

    #[test]
    fn test_missing_fields() {
        let mut form = SimulationForm::new("", "12", "Cetus Finance", true);
        assert_eq!(form.validate(), Err(InputError::MissingFields));

        form.amount = Some("500".to_string());
        form.strategy = None;
        assert_eq!(form.validate(), Err(InputError::MissingFields));

        form.strategy = Some("   ".to_string());
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
    }

    #[test]
    fn test_invalid_amount() {
        for bad in ["abc", "-5", "0", "NaN", "inf"] {
            let form = SimulationForm::new(bad, "12", "BlueMove", true);
            assert!(matches!(form.validate(), Err(InputError::InvalidAmount(_))), "{}", bad);
        }
    }

    #[test]
    fn test_invalid_timeframe() {
        for bad in ["", "twelve", "-3", "1.5"] {
            let form = SimulationForm::new("100", bad, "BlueMove", true);
            assert!(matches!(form.validate(), Err(InputError::InvalidTimeframe(_))), "{:?}", bad);
        }
    }

    #[test]
    fn test_timeframe_ceiling() {
        assert_eq!(parse_timeframe("0"), Ok(0));
        assert_eq!(parse_timeframe("1200"), Ok(MAX_TIMEFRAME_MONTHS));
        assert_eq!(parse_timeframe("1201"), Err(InputError::InvalidTimeframe("1201".to_string())));

        let form = SimulationForm::new("1000", "4294967295", "BlueMove", true);
        assert_eq!(form.validate(), Err(InputError::InvalidTimeframe("4294967295".to_string())));
    }

    #[test]
    fn test_unknown_strategy_passes_through() {
        let form = SimulationForm::new("100", "3", "Some New Farm", true);
        assert_eq!(form.validate().unwrap().strategy_name, "Some New Farm");
    }

    #[test]
    fn test_deserialize_json_form() {
        let form: SimulationForm = serde_json::from_str(
            r#"{"amount": 250.5, "timeframe": 3, "strategy": "BlueMove", "compounding": true}"#,
        )
        .unwrap();
        let request = form.validate().unwrap();
        assert_eq!(request.principal, 250.5);
        assert_eq!(request.months, 3);

        let form: SimulationForm = serde_json::from_str(r#"{"amount": "1000", "strategy": "BlueMove"}"#).unwrap();
        assert_eq!(form.timeframe, DEFAULT_TIMEFRAME);
        assert!(!form.compounding);

        let form: SimulationForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.validate(), Err(InputError::MissingFields));
    }
}
