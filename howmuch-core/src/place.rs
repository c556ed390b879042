use serde::Serialize;

use crate::{
    computer::check_positive,
    constants::HOURS_PER_YEAR,
    error::{HowMuchCoreError, Result},
};

/// Average domestic electricity use of a country or region.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub annual_kwh: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, annual_kwh: f64) -> Self {
        Self {
            name: name.into(),
            annual_kwh,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HowMuchCoreError::EmptyName);
        }
        check_positive(&self.name, "annual_kwh", self.annual_kwh)
    }

    /// Average continuous draw of one home, in kW.
    pub fn avg_power_kw(&self) -> f64 {
        self.annual_kwh / HOURS_PER_YEAR
    }

    /// Whether narrative text should read "the <name>".
    pub fn takes_article(&self) -> bool {
        self.name.starts_with("United")
            || ["Netherlands", "European Union", "World"].contains(&self.name.as_str())
    }

    /// The name as it reads mid-sentence, e.g. "the United Kingdom".
    pub fn display_name(&self) -> String {
        if self.takes_article() {
            format!("the {}", self.name)
        } else {
            self.name.clone()
        }
    }
}
