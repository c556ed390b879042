use howmuch_core::{
    Computer, Place, ReferenceData,
    constants::{FLIGHT_KG_CO2E_PER_KM, KG_CO2E_PER_KWH, LONDON_NEW_YORK_KM},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    format,
    params::{CustomComputer, Parameters, Selection},
};

/// Conversion factors for the emissions figures. Missing fields fall back to
/// the UK government factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Factors {
    pub kg_co2e_per_kwh: f64,
    pub flight_kg_co2e_per_km: f64,
    pub london_new_york_km: f64,
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            kg_co2e_per_kwh: KG_CO2E_PER_KWH,
            flight_kg_co2e_per_km: FLIGHT_KG_CO2E_PER_KM,
            london_new_york_km: LONDON_NEW_YORK_KM,
        }
    }
}

/// The machine a job runs on, resolved from a `Selection`.
#[derive(Clone, Copy, Debug)]
pub enum Machine<'a> {
    Reference(&'a Computer),
    Custom(&'a CustomComputer),
}

impl Machine<'_> {
    pub fn power_kw(&self) -> f64 {
        match self {
            Machine::Reference(c) => c.power_kw,
            Machine::Custom(c) => c.power_kw(),
        }
    }

    pub fn tflops(&self) -> f64 {
        match self {
            Machine::Reference(c) => c.tflops,
            Machine::Custom(c) => c.tflops(),
        }
    }

    pub fn cores(&self) -> u64 {
        match self {
            Machine::Reference(c) => c.cores,
            Machine::Custom(c) => c.cores(),
        }
    }

    pub fn accelerator_cores(&self) -> u64 {
        match self {
            Machine::Reference(c) => c.accelerator_cores,
            Machine::Custom(c) => c.accelerator_cores(),
        }
    }

    /// TFLOPs per kW is GFLOPs per W.
    pub fn efficiency_gflops_per_watt(&self) -> f64 {
        self.tflops() / self.power_kw()
    }
}

/// Derives every figure of the widget from one parameter set.
///
/// Nothing is cached: build a new `Calculator` after changing the parameters.
#[derive(Clone, Debug)]
pub struct Calculator<'a> {
    params: &'a Parameters,
    machine: Machine<'a>,
    place: &'a Place,
    factors: Factors,
}

impl<'a> Calculator<'a> {
    pub fn new(data: &'a ReferenceData, params: &'a Parameters) -> Result<Self> {
        let machine = match params.selection() {
            Selection::Named(name) => Machine::Reference(data.computer(name)?),
            Selection::Custom(custom) => Machine::Custom(custom),
        };
        let place = data.place(params.place())?;
        Ok(Self {
            params,
            machine,
            place,
            factors: Factors::default(),
        })
    }

    pub fn with_factors(self, factors: Factors) -> Self {
        Self { factors, ..self }
    }

    pub fn params(&self) -> &Parameters {
        self.params
    }

    pub fn machine(&self) -> Machine<'a> {
        self.machine
    }

    pub fn place(&self) -> &'a Place {
        self.place
    }

    pub fn factors(&self) -> &Factors {
        &self.factors
    }

    /// Power drawn including datacenter overhead, in kW. `scaled` applies the
    /// utilization percentage.
    pub fn power_draw_kw(&self, scaled: bool) -> f64 {
        let fraction = if scaled {
            self.params.utilization_percent() / 100.0
        } else {
            1.0
        };
        fraction * self.machine.power_kw() * self.params.pue()
    }

    pub fn place_avg_power_kw(&self) -> f64 {
        self.place.avg_power_kw()
    }

    pub fn place_avg_power_watts(&self) -> f64 {
        1000.0 * self.place_avg_power_kw()
    }

    pub fn num_homes_equivalent(&self, scaled: bool) -> f64 {
        self.power_draw_kw(scaled) / self.place_avg_power_kw()
    }

    pub fn energy_kwh(&self, scaled: bool) -> f64 {
        self.power_draw_kw(scaled) * self.params.duration_hours()
    }

    /// Hours the job's energy would power an average home.
    pub fn domestic_hours(&self) -> f64 {
        self.energy_kwh(true) / self.place_avg_power_kw()
    }

    pub fn co2_kg(&self, scaled: bool) -> f64 {
        self.energy_kwh(scaled) * self.factors.kg_co2e_per_kwh
    }

    pub fn flight_km_equivalent(&self) -> f64 {
        self.co2_kg(true) / self.factors.flight_kg_co2e_per_km
    }

    pub fn flight_multiple_of_lon_ny(&self) -> f64 {
        self.flight_km_equivalent() / self.factors.london_new_york_km
    }

    pub fn active_cores(&self) -> f64 {
        self.params.utilization_percent() * self.machine.cores() as f64 / 100.0
    }

    pub fn active_accelerator_cores(&self) -> f64 {
        self.params.utilization_percent() * self.machine.accelerator_cores() as f64 / 100.0
    }

    pub fn power_rate(&self, scaled: bool) -> String {
        format::power_kw(self.power_draw_kw(scaled))
    }

    pub fn homes_equivalent(&self, scaled: bool) -> String {
        format::homes(self.num_homes_equivalent(scaled))
    }

    pub fn domestic_time_equivalent(&self) -> String {
        format::duration_hours(self.domestic_hours())
    }

    pub fn energy_consumed(&self) -> String {
        format::energy_kwh(self.energy_kwh(true))
    }

    pub fn co2_display(&self) -> String {
        format::co2_kg(self.co2_kg(true))
    }

    pub fn flight_distance(&self) -> String {
        format::distance_km(self.flight_km_equivalent())
    }

    /// `None` unless the flight distance exceeds one London to New York trip.
    pub fn flight_trips(&self) -> Option<String> {
        format::trip_multiple(self.flight_multiple_of_lon_ny())
    }
}
