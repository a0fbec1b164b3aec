use std::collections::BTreeMap;
use std::io;
use std::ops::Bound::{Excluded, Included};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentValueError {
    #[error("failed to read present value config: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse present value config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("present value config must define either constant_rate or annual_increments")]
    MissingRate,
    #[error("present value config defines both constant_rate and annual_increments")]
    AmbiguousRate,
    #[error("invalid rate {rate} for year {year:?}")]
    InvalidRate { year: Option<i32>, rate: f64 },
}

/// Where yearly cost growth comes from. Rates above 1.0 are percentages.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    Constant(f64),
    /// Growth recorded for each year; missing years grow by zero.
    AnnualIncrements(BTreeMap<i32, f64>),
}

/// Brings costs recorded in one year to another year's money.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentValue {
    source: RateSource,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresentValueRecord {
    constant_rate: Option<f64>,
    annual_increments: Option<BTreeMap<i32, f64>>,
}

impl PresentValue {
    pub fn new(source: RateSource) -> Result<Self, PresentValueError> {
        match &source {
            RateSource::Constant(rate) => validate_rate(None, *rate)?,
            RateSource::AnnualIncrements(increments) => {
                for (year, rate) in increments {
                    validate_rate(Some(*year), *rate)?;
                }
            }
        }
        Ok(Self { source })
    }

    pub fn source(&self) -> &RateSource {
        &self.source
    }

    /// Multiplier taking money of `from_year` to `to_year`. Moving backward in
    /// time divides by the forward factor; the same year is exactly 1.
    pub fn factor(&self, from_year: i32, to_year: i32) -> f64 {
        if from_year == to_year {
            return 1.0;
        }
        match &self.source {
            RateSource::Constant(rate) => {
                let years = i64::from(to_year) - i64::from(from_year);
                (1.0 + as_fraction(*rate)).powf(years as f64)
            }
            RateSource::AnnualIncrements(increments) => {
                let (earlier, later) = (from_year.min(to_year), from_year.max(to_year));
                let growth: f64 = increments
                    .range((Excluded(earlier), Included(later)))
                    .map(|(_, rate)| 1.0 + as_fraction(*rate))
                    .product();
                if to_year > from_year { growth } else { 1.0 / growth }
            }
        }
    }

    pub fn present_value(&self, value: f64, from_year: i32, to_year: i32) -> f64 {
        value * self.factor(from_year, to_year)
    }
}

pub async fn load_present_value_from_yaml_file(
    path: &str,
) -> Result<PresentValue, PresentValueError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_present_value_from_yaml_str(&contents)
}

pub fn deserialize_present_value_from_yaml_str(
    input: &str,
) -> Result<PresentValue, PresentValueError> {
    let record: PresentValueRecord = serde_yaml::from_str(input)?;
    let source = match (record.constant_rate, record.annual_increments) {
        (Some(rate), None) => RateSource::Constant(rate),
        (None, Some(increments)) => RateSource::AnnualIncrements(increments),
        (Some(_), Some(_)) => return Err(PresentValueError::AmbiguousRate),
        (None, None) => return Err(PresentValueError::MissingRate),
    };
    PresentValue::new(source)
}

fn as_fraction(rate: f64) -> f64 {
    if rate > 1.0 { rate / 100.0 } else { rate }
}

fn validate_rate(year: Option<i32>, rate: f64) -> Result<(), PresentValueError> {
    if !rate.is_finite() || as_fraction(rate) <= -1.0 {
        return Err(PresentValueError::InvalidRate { year, rate });
    }
    Ok(())
}
