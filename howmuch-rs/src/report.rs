use howmuch_core::ReferenceData;
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Calculator, Factors},
    error::Result,
    narrative,
    params::Parameters,
};

/// Which blocks of the widget are shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CO2 and flight-equivalent figures.
    pub emissions: bool,
    /// Descriptive sentences and source attribution.
    pub narrative: bool,
    pub factors: Factors,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl ReportConfig {
    pub fn full() -> Self {
        Self {
            emissions: true,
            narrative: true,
            factors: Factors::default(),
        }
    }

    /// Power and homes comparison only.
    pub fn comparison() -> Self {
        Self {
            emissions: false,
            ..Self::full()
        }
    }

    /// Bare figures, no text.
    pub fn minimal() -> Self {
        Self {
            emissions: false,
            narrative: false,
            factors: Factors::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emissions {
    pub energy: String,
    pub co2: String,
    pub flight_distance: String,
    /// Present when the flight is longer than one London to New York trip.
    pub london_new_york_trips: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub computer: String,
    pub burn_rate: String,
    pub homes: String,
    pub job: String,
    pub emissions: Option<String>,
    pub sources: Vec<String>,
}

/// Every display string of the widget for one parameter set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub computer: String,
    pub place: String,
    /// Whole machine, no utilization scaling.
    pub full_power_rate: String,
    pub power_rate: String,
    pub full_homes: String,
    pub homes: String,
    pub domestic_duration: String,
    pub emissions: Option<Emissions>,
    pub narrative: Option<Narrative>,
}

impl Report {
    pub fn build(data: &ReferenceData, params: &Parameters, config: &ReportConfig) -> Result<Self> {
        let calc = Calculator::new(data, params)?.with_factors(config.factors);
        log::debug!(
            "Building report for '{}' in '{}'",
            params.selection().label(),
            params.place()
        );

        let emissions = config.emissions.then(|| Emissions {
            energy: calc.energy_consumed(),
            co2: calc.co2_display(),
            flight_distance: calc.flight_distance(),
            london_new_york_trips: calc.flight_trips(),
        });

        let narrative = config.narrative.then(|| Narrative {
            computer: narrative::computer_description(&calc.machine()),
            burn_rate: narrative::burn_rate(&calc),
            homes: narrative::homes_comparison(&calc),
            job: narrative::job_comparison(&calc),
            emissions: config.emissions.then(|| narrative::emissions(&calc)),
            sources: narrative::sources(&calc, config.emissions),
        });

        Ok(Self {
            computer: params.selection().label().to_string(),
            place: params.place().to_string(),
            full_power_rate: calc.power_rate(false),
            power_rate: calc.power_rate(true),
            full_homes: calc.homes_equivalent(false),
            homes: calc.homes_equivalent(true),
            domestic_duration: calc.domestic_time_equivalent(),
            emissions,
            narrative,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
