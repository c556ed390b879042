//! Fixed conversion constants.

pub const HOURS_PER_DAY: f64 = 24.0;
pub const HOURS_PER_WEEK: f64 = 24.0 * 7.0;
/// A "month" is a flat 30 days.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;
pub const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// UK government greenhouse gas conversion factor for grid electricity,
/// kg CO2e per kWh.
pub const KG_CO2E_PER_KWH: f64 = 0.2556;

/// Long-haul economy flight, kg CO2e per passenger km including radiative
/// forcing.
pub const FLIGHT_KG_CO2E_PER_KM: f64 = 0.14981;

/// Great-circle distance London to New York.
pub const LONDON_NEW_YORK_KM: f64 = 5567.0;

/// Display label of the user-editable computer.
pub const CUSTOM_COMPUTER_LABEL: &str = "A custom supercomputer";
