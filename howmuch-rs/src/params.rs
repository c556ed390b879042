//! The user-adjustable parameter set.
//!
//! Every setter clamps its input into the declared range and hands back a new
//! `Parameters`; out-of-range input is never rejected and never stored.

use std::str::FromStr;

use howmuch_core::{
    ReferenceData,
    constants::{CUSTOM_COMPUTER_LABEL, HOURS_PER_DAY, HOURS_PER_MONTH, HOURS_PER_WEEK, HOURS_PER_YEAR},
};
use serde::{Deserialize, Serialize};

use crate::error::{HowMuchError, Result};

/// Bounds and step of one numeric input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// NaN falls to `min`.
    pub fn clamp(&self, field: &str, value: f64) -> f64 {
        let clamped = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        if clamped != value {
            log::debug!("{field} input {value} clamped to {clamped}");
        }
        clamped
    }
}

pub const PUE_RANGE: InputRange = InputRange::new(1.0, 2.0, 0.1);
pub const UTILIZATION_RANGE: InputRange = InputRange::new(0.1, 100.0, 5.0);
pub const DURATION_COUNT_RANGE: InputRange = InputRange::new(0.1, 100.0, 1.0);
/// Custom computer power, entered in megawatts.
pub const CUSTOM_POWER_MW_RANGE: InputRange = InputRange::new(0.1, 50.0, 0.5);
pub const CUSTOM_TFLOPS_RANGE: InputRange = InputRange::new(1.0, 1_000_000.0, 100.0);
pub const CUSTOM_CORES_RANGE: InputRange = InputRange::new(1.0, 1_000_000.0, 100.0);

/// Bounds of every numeric input, for building the sliders.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InputRanges {
    pub pue: InputRange,
    pub utilization_percent: InputRange,
    pub duration_count: InputRange,
    pub custom_power_mw: InputRange,
    pub custom_tflops: InputRange,
    pub custom_cores: InputRange,
    pub custom_accelerator_cores: InputRange,
}

pub const INPUT_RANGES: InputRanges = InputRanges {
    pue: PUE_RANGE,
    utilization_percent: UTILIZATION_RANGE,
    duration_count: DURATION_COUNT_RANGE,
    custom_power_mw: CUSTOM_POWER_MW_RANGE,
    custom_tflops: CUSTOM_TFLOPS_RANGE,
    custom_cores: CUSTOM_CORES_RANGE,
    custom_accelerator_cores: CUSTOM_CORES_RANGE,
};

pub const DEFAULT_PLACE: &str = "United Kingdom";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 5] = [
        DurationUnit::Hour,
        DurationUnit::Day,
        DurationUnit::Week,
        DurationUnit::Month,
        DurationUnit::Year,
    ];

    pub fn hours(self) -> f64 {
        match self {
            DurationUnit::Hour => 1.0,
            DurationUnit::Day => HOURS_PER_DAY,
            DurationUnit::Week => HOURS_PER_WEEK,
            DurationUnit::Month => HOURS_PER_MONTH,
            DurationUnit::Year => HOURS_PER_YEAR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationUnit::Hour => "hour",
            DurationUnit::Day => "day",
            DurationUnit::Week => "week",
            DurationUnit::Month => "month",
            DurationUnit::Year => "year",
        }
    }

    /// Option label for a job lasting `count` of this unit.
    pub fn label(self, count: f64) -> String {
        if count == 1.0 {
            self.name().to_string()
        } else {
            format!("{}s", self.name())
        }
    }

    /// Position in `ALL`; indices past the end select the last unit.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|u| *u == self).unwrap_or(0)
    }
}

impl FromStr for DurationUnit {
    type Err = HowMuchError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let singular = name.strip_suffix('s').unwrap_or(name.as_str());
        Self::ALL
            .into_iter()
            .find(|unit| unit.name() == singular)
            .ok_or_else(|| HowMuchError::UnknownDurationUnit(s.to_string()))
    }
}

/// The user-editable machine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomComputer {
    power_kw: f64,
    tflops: f64,
    cores: u64,
    accelerator_cores: u64,
}

impl Default for CustomComputer {
    fn default() -> Self {
        Self {
            power_kw: 1000.0,
            tflops: 1000.0,
            cores: 50_000,
            accelerator_cores: 0,
        }
    }
}

impl CustomComputer {
    pub fn power_kw(&self) -> f64 {
        self.power_kw
    }

    pub fn power_mw(&self) -> f64 {
        self.power_kw / 1000.0
    }

    pub fn tflops(&self) -> f64 {
        self.tflops
    }

    pub fn cores(&self) -> u64 {
        self.cores
    }

    pub fn accelerator_cores(&self) -> u64 {
        self.accelerator_cores
    }

    fn set_power_mw(&mut self, megawatts: f64) {
        self.power_kw = 1000.0 * CUSTOM_POWER_MW_RANGE.clamp("custom power", megawatts);
    }

    fn set_tflops(&mut self, tflops: f64) {
        self.tflops = CUSTOM_TFLOPS_RANGE.clamp("custom tflops", tflops);
    }

    fn set_cores(&mut self, cores: f64) {
        self.cores = CUSTOM_CORES_RANGE.clamp("custom cores", cores).round() as u64;
    }

    fn set_accelerator_cores(&mut self, cores: f64) {
        self.accelerator_cores = CUSTOM_CORES_RANGE
            .clamp("custom accelerator cores", cores)
            .round() as u64;
    }
}

/// Which machine the job runs on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Selection {
    /// A record of the reference table, by name.
    Named(String),
    Custom(CustomComputer),
}

impl Selection {
    pub fn label(&self) -> &str {
        match self {
            Selection::Named(name) => name,
            Selection::Custom(_) => CUSTOM_COMPUTER_LABEL,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Selection::Custom(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    selection: Selection,
    // Last edited custom record while a named computer is selected.
    parked_custom: Option<CustomComputer>,
    place: String,
    pue: f64,
    utilization_percent: f64,
    duration_count: f64,
    duration_unit: DurationUnit,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            selection: Selection::Custom(CustomComputer::default()),
            parked_custom: None,
            place: DEFAULT_PLACE.to_string(),
            pue: 1.2,
            utilization_percent: 100.0,
            duration_count: 1.0,
            duration_unit: DurationUnit::Hour,
        }
    }
}

impl Parameters {
    /// Defaults whose place exists in `data`: `DEFAULT_PLACE` when listed,
    /// otherwise the first place by name.
    pub fn for_data(data: &ReferenceData) -> Result<Self> {
        let place = if data.has_place(DEFAULT_PLACE) {
            DEFAULT_PLACE
        } else {
            let first = data.place_names().next().ok_or(HowMuchError::NoPlaces)?;
            log::debug!("'{DEFAULT_PLACE}' not in place table, defaulting to '{first}'");
            first
        };
        Ok(Self {
            place: place.to_string(),
            ..Self::default()
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn pue(&self) -> f64 {
        self.pue
    }

    pub fn utilization_percent(&self) -> f64 {
        self.utilization_percent
    }

    pub fn duration_count(&self) -> f64 {
        self.duration_count
    }

    pub fn duration_unit(&self) -> DurationUnit {
        self.duration_unit
    }

    /// Job length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_count * self.duration_unit.hours()
    }

    pub fn with_pue(self, pue: f64) -> Self {
        Self {
            pue: PUE_RANGE.clamp("pue", pue),
            ..self
        }
    }

    pub fn with_utilization_percent(self, percent: f64) -> Self {
        Self {
            utilization_percent: UTILIZATION_RANGE.clamp("utilization", percent),
            ..self
        }
    }

    pub fn with_duration_count(self, count: f64) -> Self {
        Self {
            duration_count: DURATION_COUNT_RANGE.clamp("duration count", count),
            ..self
        }
    }

    pub fn with_duration_unit(self, duration_unit: DurationUnit) -> Self {
        Self {
            duration_unit,
            ..self
        }
    }

    /// Selects a computer by its option label. The custom label selects the
    /// custom computer; any other name must exist in `data`.
    pub fn with_computer(self, data: &ReferenceData, name: &str) -> Result<Self> {
        if name == CUSTOM_COMPUTER_LABEL {
            return Ok(self.with_custom_computer());
        }
        // fails with UnknownComputer
        data.computer(name)?;
        log::debug!("Selected computer '{name}'");

        let Self {
            selection,
            parked_custom,
            ..
        } = &self;
        let parked_custom = match selection {
            Selection::Custom(custom) => Some(custom.clone()),
            Selection::Named(_) => parked_custom.clone(),
        };
        Ok(Self {
            selection: Selection::Named(name.to_string()),
            parked_custom,
            ..self
        })
    }

    /// Switches to the custom computer, restoring its last edited figures.
    pub fn with_custom_computer(mut self) -> Self {
        if let Selection::Named(_) = self.selection {
            log::debug!("Selected the custom computer");
            let custom = self.parked_custom.take().unwrap_or_default();
            self.selection = Selection::Custom(custom);
        }
        self
    }

    pub fn with_place(self, data: &ReferenceData, name: &str) -> Result<Self> {
        data.place(name)?;
        log::debug!("Selected place '{name}'");
        Ok(Self {
            place: name.to_string(),
            ..self
        })
    }

    pub fn with_custom_power_mw(mut self, megawatts: f64) -> Self {
        self.custom_mut().set_power_mw(megawatts);
        self
    }

    pub fn with_custom_tflops(mut self, tflops: f64) -> Self {
        self.custom_mut().set_tflops(tflops);
        self
    }

    pub fn with_custom_cores(mut self, cores: f64) -> Self {
        self.custom_mut().set_cores(cores);
        self
    }

    pub fn with_custom_accelerator_cores(mut self, cores: f64) -> Self {
        self.custom_mut().set_accelerator_cores(cores);
        self
    }

    /// The custom record, whether or not it is the active selection.
    pub fn custom_computer(&self) -> Option<&CustomComputer> {
        match &self.selection {
            Selection::Custom(custom) => Some(custom),
            Selection::Named(_) => self.parked_custom.as_ref(),
        }
    }

    fn custom_mut(&mut self) -> &mut CustomComputer {
        match &mut self.selection {
            Selection::Custom(custom) => custom,
            Selection::Named(_) => self.parked_custom.get_or_insert_with(CustomComputer::default),
        }
    }
}

/// Computer option labels: the custom computer first, then the reference
/// table in name order.
pub fn computer_options(data: &ReferenceData) -> Vec<String> {
    std::iter::once(CUSTOM_COMPUTER_LABEL)
        .chain(data.computer_names())
        .map(str::to_string)
        .collect()
}

pub fn place_options(data: &ReferenceData) -> Vec<String> {
    data.place_names().map(str::to_string).collect()
}

/// Duration unit labels, pluralised for `count`.
pub fn duration_options(count: f64) -> Vec<String> {
    DurationUnit::ALL.iter().map(|unit| unit.label(count)).collect()
}

#[cfg(test)]
mod tests {
    use howmuch_core::{Computer, HowMuchCoreError, Place};

    use super::*;

    fn data() -> ReferenceData {
        ReferenceData::new(
            vec![
                Computer::new("Summit", 10_096.0, 148_600.0, 2018),
                Computer::new("Archer", 3306.2, 1642.5, 2014),
            ],
            vec![
                Place::new("United Kingdom", 4000.0),
                Place::new("France", 5900.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let params = Parameters::default();
        assert!(params.selection().is_custom());
        assert_eq!(params.place(), "United Kingdom");
        assert_eq!(params.pue(), 1.2);
        assert_eq!(params.utilization_percent(), 100.0);
        assert_eq!(params.duration_count(), 1.0);
        assert_eq!(params.duration_unit(), DurationUnit::Hour);

        let custom = params.custom_computer().unwrap();
        assert_eq!(custom.power_kw(), 1000.0);
        assert_eq!(custom.tflops(), 1000.0);
        assert_eq!(custom.cores(), 50_000);
        assert_eq!(custom.accelerator_cores(), 0);
    }

    #[test]
    fn test_for_data_picks_a_listed_place() {
        let params = Parameters::for_data(&data()).unwrap();
        assert_eq!(params.place(), DEFAULT_PLACE);

        let elsewhere = ReferenceData::new(
            vec![],
            vec![Place::new("Spain", 3800.0), Place::new("France", 5000.0)],
        )
        .unwrap();
        let params = Parameters::for_data(&elsewhere).unwrap();
        assert_eq!(params.place(), "France");
        assert!(params.selection().is_custom());

        let empty = ReferenceData::new(vec![], vec![]).unwrap();
        assert!(matches!(
            Parameters::for_data(&empty),
            Err(HowMuchError::NoPlaces)
        ));
    }

    #[test]
    fn test_numeric_setters_clamp() {
        let params = Parameters::default()
            .with_pue(0.5)
            .with_utilization_percent(250.0)
            .with_duration_count(0.0);
        assert_eq!(params.pue(), 1.0);
        assert_eq!(params.utilization_percent(), 100.0);
        assert_eq!(params.duration_count(), 0.1);

        let params = params
            .with_pue(3.0)
            .with_utilization_percent(0.01)
            .with_duration_count(1e9);
        assert_eq!(params.pue(), 2.0);
        assert_eq!(params.utilization_percent(), 0.1);
        assert_eq!(params.duration_count(), 100.0);

        let params = params.with_pue(1.45).with_utilization_percent(37.5);
        assert_eq!(params.pue(), 1.45);
        assert_eq!(params.utilization_percent(), 37.5);
    }

    #[test]
    fn test_nan_falls_to_minimum() {
        let params = Parameters::default()
            .with_pue(f64::NAN)
            .with_custom_tflops(f64::NAN);
        assert_eq!(params.pue(), 1.0);
        assert_eq!(params.custom_computer().unwrap().tflops(), 1.0);
    }

    #[test]
    fn test_custom_power_clamped_and_stored_in_kw() {
        let params = Parameters::default().with_custom_power_mw(0.05);
        assert_eq!(params.custom_computer().unwrap().power_kw(), 100.0);

        let params = params.with_custom_power_mw(75.0);
        assert_eq!(params.custom_computer().unwrap().power_kw(), 50_000.0);

        let params = params.with_custom_power_mw(2.5);
        assert_eq!(params.custom_computer().unwrap().power_mw(), 2.5);
    }

    #[test]
    fn test_custom_core_counts_clamped() {
        let params = Parameters::default()
            .with_custom_cores(0.0)
            .with_custom_accelerator_cores(5e6)
            .with_custom_tflops(250.0);
        let custom = params.custom_computer().unwrap();
        assert_eq!(custom.cores(), 1);
        assert_eq!(custom.accelerator_cores(), 1_000_000);
        assert_eq!(custom.tflops(), 250.0);
    }

    #[test]
    fn test_switching_keeps_custom_record() {
        let data = data();
        let params = Parameters::default()
            .with_custom_power_mw(3.0)
            .with_computer(&data, "Summit")
            .unwrap();
        assert_eq!(params.selection(), &Selection::Named("Summit".to_string()));
        assert_eq!(params.custom_computer().unwrap().power_kw(), 3000.0);

        let params = params
            .with_computer(&data, CUSTOM_COMPUTER_LABEL)
            .unwrap();
        assert!(params.selection().is_custom());
        assert_eq!(params.custom_computer().unwrap().power_kw(), 3000.0);
    }

    #[test]
    fn test_custom_edits_while_named_are_kept() {
        let data = data();
        let params = Parameters::default()
            .with_computer(&data, "Archer")
            .unwrap()
            .with_custom_tflops(5000.0)
            .with_custom_computer();
        assert_eq!(params.custom_computer().unwrap().tflops(), 5000.0);
    }

    #[test]
    fn test_unknown_selection_is_an_error() {
        let data = data();
        let params = Parameters::default();
        assert!(matches!(
            params.clone().with_computer(&data, "Fugaku"),
            Err(HowMuchError::Core(HowMuchCoreError::UnknownComputer(_)))
        ));
        assert!(matches!(
            params.clone().with_place(&data, "Atlantis"),
            Err(HowMuchError::Core(HowMuchCoreError::UnknownPlace(_)))
        ));
        let params = params.with_place(&data, "France").unwrap();
        assert_eq!(params.place(), "France");
    }

    #[test]
    fn test_duration_units() {
        let hours: Vec<f64> = DurationUnit::ALL.iter().map(|u| u.hours()).collect();
        assert_eq!(hours, [1.0, 24.0, 168.0, 720.0, 8760.0]);

        assert_eq!(DurationUnit::from_index(2), DurationUnit::Week);
        assert_eq!(DurationUnit::from_index(42), DurationUnit::Year);
        assert_eq!(DurationUnit::Month.index(), 3);

        assert_eq!("day".parse::<DurationUnit>().unwrap(), DurationUnit::Day);
        assert_eq!("Weeks".parse::<DurationUnit>().unwrap(), DurationUnit::Week);
        assert!("fortnight".parse::<DurationUnit>().is_err());

        let params = Parameters::default()
            .with_duration_count(2.0)
            .with_duration_unit(DurationUnit::Week);
        assert_eq!(params.duration_hours(), 336.0);
    }

    #[test]
    fn test_option_lists() {
        let data = data();
        assert_eq!(
            computer_options(&data),
            [CUSTOM_COMPUTER_LABEL, "Archer", "Summit"]
        );
        assert_eq!(place_options(&data), ["France", "United Kingdom"]);
        assert_eq!(duration_options(1.0)[0], "hour");
        assert_eq!(duration_options(2.0)[4], "years");
    }
}
