use serde::Serialize;

use crate::error::LineError;

/// Differences at or below this are treated as balanced.
pub const TOLERANCE: f64 = 1e-5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Amount {
    pub nominal: f64,
    pub currency: String,
}

impl Amount {
    pub fn new(nominal: f64, currency: &str) -> Self {
        Self {
            nominal,
            currency: currency.to_string(),
        }
    }

    pub fn parse(literal: &str, currency: &str) -> Result<Amount, LineError> {
        Ok(Self::new(parse_nominal(literal)?, currency))
    }
}

impl std::ops::Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount {
            nominal: -self.nominal,
            currency: self.currency.clone(),
        }
    }
}

/// Parses a signed decimal literal, refusing anything that is not a finite number.
pub fn parse_nominal(literal: &str) -> Result<f64, LineError> {
    literal
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| LineError::InvalidAmount {
            literal: literal.to_string(),
        })
}

pub fn is_negligible(nominal: f64) -> bool {
    nominal.abs() <= TOLERANCE
}

/// Rounds to cents.
pub fn round2(nominal: f64) -> f64 {
    (nominal * 100.0).round() / 100.0
}
