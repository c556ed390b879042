use serde::{Deserialize, Serialize};

use crate::{
    constants::CUSTOM_COMPUTER_LABEL,
    error::{HowMuchCoreError, Result},
};

/// A supercomputer as listed in the reference table.
///
/// `power_kw` is the power drawn during the Top500 linpack run. When
/// `is_calculated` is set the figure was not reported but estimated from
/// Rmax and the median efficiency of the list for `year`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Computer {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "power")]
    pub power_kw: f64,
    pub tflops: f64,
    #[serde(default)]
    pub cores: u64,
    #[serde(rename = "acores", default)]
    pub accelerator_cores: u64,
    pub year: i32,
    #[serde(default)]
    pub is_calculated: bool,
}

impl Computer {
    pub fn new(name: impl Into<String>, power_kw: f64, tflops: f64, year: i32) -> Self {
        Self {
            name: name.into(),
            power_kw,
            tflops,
            cores: 0,
            accelerator_cores: 0,
            year,
            is_calculated: false,
        }
    }

    pub fn with_cores(self, cores: u64, accelerator_cores: u64) -> Self {
        Self {
            cores,
            accelerator_cores,
            ..self
        }
    }

    pub fn calculated(self, is_calculated: bool) -> Self {
        Self {
            is_calculated,
            ..self
        }
    }

    /// Rejects records that would put NaN or infinity into the derived figures.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HowMuchCoreError::EmptyName);
        }
        if self.name == CUSTOM_COMPUTER_LABEL {
            return Err(HowMuchCoreError::ReservedName(self.name.clone()));
        }
        check_positive(&self.name, "power", self.power_kw)?;
        check_positive(&self.name, "tflops", self.tflops)?;
        Ok(())
    }
}

pub(crate) fn check_positive(record: &str, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HowMuchCoreError::NonPositiveValue {
            record: record.to_string(),
            field,
            value,
        })
    }
}
