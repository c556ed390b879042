use howmuch_core::ReferenceData;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::{
    error::Result,
    params::{self, DurationUnit, Parameters},
    report::{Report, ReportConfig},
};

/// The calculator as the page sees it: reference data, the current
/// parameters and which blocks to show. Every setter clamps; every read
/// recomputes.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct Widget {
    data: ReferenceData,
    params: Parameters,
    config: ReportConfig,
}

#[cfg_attr(feature = "wasm", wasm_bindgen)]
impl Widget {
    #[cfg_attr(feature = "wasm", wasm_bindgen(constructor))]
    pub fn new(computers_json: &str, places_json: &str) -> Result<Widget> {
        let data = ReferenceData::from_json(computers_json, places_json)?;
        Self::from_data(data)
    }

    /// Replaces the block flags and factors, e.g. `{"emissions": false}`.
    pub fn set_config_json(&mut self, json: &str) -> Result<()> {
        self.config = serde_json::from_str(json)?;
        Ok(())
    }

    pub fn set_show_emissions(&mut self, show: bool) {
        self.config.emissions = show;
    }

    pub fn set_show_narrative(&mut self, show: bool) {
        self.config.narrative = show;
    }

    pub fn select_computer(&mut self, name: &str) -> Result<()> {
        self.params = self.current_params().with_computer(&self.data, name)?;
        Ok(())
    }

    pub fn select_place(&mut self, name: &str) -> Result<()> {
        self.params = self.current_params().with_place(&self.data, name)?;
        Ok(())
    }

    pub fn set_pue(&mut self, pue: f64) {
        self.params = self.current_params().with_pue(pue);
    }

    pub fn set_utilization_percent(&mut self, percent: f64) {
        self.params = self.current_params().with_utilization_percent(percent);
    }

    pub fn set_duration_count(&mut self, count: f64) {
        self.params = self.current_params().with_duration_count(count);
    }

    pub fn set_duration_unit(&mut self, unit: &str) -> Result<()> {
        let unit: DurationUnit = unit.parse()?;
        self.params = self.current_params().with_duration_unit(unit);
        Ok(())
    }

    /// Index into `duration_options`.
    pub fn set_duration_index(&mut self, index: usize) {
        self.params = self
            .current_params()
            .with_duration_unit(DurationUnit::from_index(index));
    }

    pub fn set_custom_power_mw(&mut self, megawatts: f64) {
        self.params = self.current_params().with_custom_power_mw(megawatts);
    }

    pub fn set_custom_tflops(&mut self, tflops: f64) {
        self.params = self.current_params().with_custom_tflops(tflops);
    }

    pub fn set_custom_cores(&mut self, cores: f64) {
        self.params = self.current_params().with_custom_cores(cores);
    }

    pub fn set_custom_accelerator_cores(&mut self, cores: f64) {
        self.params = self.current_params().with_custom_accelerator_cores(cores);
    }

    pub fn computer(&self) -> String {
        self.params.selection().label().to_string()
    }

    pub fn is_custom_computer(&self) -> bool {
        self.params.selection().is_custom()
    }

    pub fn place(&self) -> String {
        self.params.place().to_string()
    }

    pub fn pue(&self) -> f64 {
        self.params.pue()
    }

    pub fn utilization_percent(&self) -> f64 {
        self.params.utilization_percent()
    }

    pub fn duration_count(&self) -> f64 {
        self.params.duration_count()
    }

    pub fn duration_index(&self) -> usize {
        self.params.duration_unit().index()
    }

    pub fn computer_options(&self) -> Vec<String> {
        params::computer_options(&self.data)
    }

    pub fn place_options(&self) -> Vec<String> {
        params::place_options(&self.data)
    }

    pub fn duration_options(&self) -> Vec<String> {
        params::duration_options(self.params.duration_count())
    }

    /// Min, max and step of every numeric input, keyed by setter name.
    pub fn input_ranges_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&params::INPUT_RANGES)?)
    }

    pub fn report_json(&self) -> Result<String> {
        self.report()?.to_json()
    }
}

impl Widget {
    /// Fails when the place table is empty.
    pub fn from_data(data: ReferenceData) -> Result<Self> {
        let params = Parameters::for_data(&data)?;
        Ok(Self {
            data,
            params,
            config: ReportConfig::default(),
        })
    }

    pub fn with_config(self, config: ReportConfig) -> Self {
        Self { config, ..self }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn report(&self) -> Result<Report> {
        Report::build(&self.data, &self.params, &self.config)
    }

    // A failed selection returns before assigning, so the current parameters
    // stay in place.
    fn current_params(&self) -> Parameters {
        self.params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPUTERS: &str = r#"{
        "Reported": {"power": 2000, "tflops": 30000, "cores": 64000, "acores": 1000, "year": 2021}
    }"#;
    const PLACES: &str = r#"{"United Kingdom": 4000, "Spain": 3800}"#;

    #[test]
    fn test_widget_flow() {
        let mut widget = Widget::new(COMPUTERS, PLACES).unwrap();
        assert!(widget.is_custom_computer());
        assert_eq!(widget.computer_options(), ["A custom supercomputer", "Reported"]);

        widget.select_computer("Reported").unwrap();
        widget.select_place("Spain").unwrap();
        widget.set_pue(5.0);
        widget.set_utilization_percent(50.0);
        widget.set_duration_unit("weeks").unwrap();
        widget.set_duration_count(2.0);

        assert_eq!(widget.computer(), "Reported");
        assert_eq!(widget.place(), "Spain");
        assert_eq!(widget.pue(), 2.0);
        assert_eq!(widget.duration_index(), 2);
        assert_eq!(widget.duration_options()[2], "weeks");

        let report = widget.report().unwrap();
        assert_eq!(report.full_power_rate, "4 megawatts");
        assert_eq!(report.power_rate, "2 megawatts");
    }

    #[test]
    fn test_failed_selection_keeps_state() {
        let mut widget = Widget::new(COMPUTERS, PLACES).unwrap();
        widget.set_pue(1.5);
        assert!(widget.select_place("Atlantis").is_err());
        assert!(widget.select_computer("Nope").is_err());
        assert!(widget.set_duration_unit("fortnight").is_err());
        assert_eq!(widget.place(), "United Kingdom");
        assert_eq!(widget.pue(), 1.5);
        assert!(widget.is_custom_computer());
    }

    #[test]
    fn test_config_switches_blocks() {
        let mut widget = Widget::new(COMPUTERS, PLACES).unwrap();
        widget.set_show_emissions(false);
        assert!(widget.report().unwrap().emissions.is_none());

        widget.set_config_json(r#"{"emissions": true, "narrative": false}"#).unwrap();
        let report = widget.report().unwrap();
        assert!(report.emissions.is_some());
        assert!(report.narrative.is_none());

        assert!(widget.set_config_json("not json").is_err());
    }

    #[test]
    fn test_default_place_follows_place_table() {
        let widget = Widget::new("{}", r#"{"France": 5000}"#).unwrap();
        assert_eq!(widget.place(), "France");
        assert_eq!(widget.place_options(), ["France"]);
        assert_eq!(widget.report().unwrap().place, "France");

        assert!(matches!(
            Widget::new(COMPUTERS, "{}"),
            Err(crate::HowMuchError::NoPlaces)
        ));
    }

    #[test]
    fn test_input_ranges() {
        let widget = Widget::new(COMPUTERS, PLACES).unwrap();
        let ranges: serde_json::Value =
            serde_json::from_str(&widget.input_ranges_json().unwrap()).unwrap();
        assert_eq!(ranges["pue"]["min"], 1.0);
        assert_eq!(ranges["pue"]["max"], 2.0);
        assert_eq!(ranges["pue"]["step"], 0.1);
        assert_eq!(ranges["custom_power_mw"]["step"], 0.5);
        assert_eq!(ranges["utilization_percent"]["min"], 0.1);
    }

    #[test]
    fn test_bad_reference_data_fails_fast() {
        let zero = r#"{"Zero": {"power": 0, "tflops": 1, "year": 2020}}"#;
        assert!(Widget::new(zero, PLACES).is_err());
    }
}
