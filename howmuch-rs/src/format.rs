//! Unit selection and human-readable rendering of the derived figures.

use howmuch_core::constants::{HOURS_PER_DAY, HOURS_PER_MONTH, HOURS_PER_WEEK, HOURS_PER_YEAR};
use serde::Serialize;

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    // + 0.0 turns -0.0 into 0.0
    (value * factor).round() / factor + 0.0
}

/// `round_to` rendered with exactly `places` decimals.
pub fn round(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, round_to(value, places))
}

/// Like `round` but drops trailing zeros ("1.200" -> "1.2", "100.000" -> "100").
pub fn round_trimmed(value: f64, places: u32) -> String {
    let fixed = round(value, places);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

fn plural(rounded: f64) -> &'static str {
    if rounded == 1.0 { "" } else { "s" }
}

/// "1.2 megawatts" above 1000 kW, "950 kilowatts" otherwise.
pub fn power_kw(kw: f64) -> String {
    let (value, unit) = if kw > 1000.0 {
        (kw / 1000.0, "megawatt")
    } else {
        (kw, "kilowatt")
    };
    let rounded = round_to(value, 3);
    format!("{} {unit}{}", round_trimmed(value, 3), plural(rounded))
}

/// Same thresholds as `power_kw`, for energy.
pub fn energy_kwh(kwh: f64) -> String {
    let (value, unit) = if kwh > 1000.0 {
        (kwh / 1000.0, "megawatt hour")
    } else {
        (kwh, "kilowatt hour")
    };
    let rounded = round_to(value, 3);
    format!("{} {unit}{}", round_trimmed(value, 3), plural(rounded))
}

/// Whole homes; "home" up to and including one.
pub fn homes(count: f64) -> String {
    let label = if count <= 1.0 { "home" } else { "homes" };
    format!("{} {label}", round(count, 0))
}

/// A number of hours in the largest unit it exceeds, to one decimal.
pub fn duration_hours(hours: f64) -> String {
    let (value, unit) = if hours > HOURS_PER_YEAR {
        (hours / HOURS_PER_YEAR, "year")
    } else if hours > HOURS_PER_MONTH {
        (hours / HOURS_PER_MONTH, "month")
    } else if hours > HOURS_PER_WEEK {
        (hours / HOURS_PER_WEEK, "week")
    } else if hours > HOURS_PER_DAY {
        (hours / HOURS_PER_DAY, "day")
    } else {
        (hours, "hour")
    };
    let value = round(value, 1);
    let s = if value == "1.0" { "" } else { "s" };
    format!("{value} {unit}{s}")
}

/// Display band of a CO2e mass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Co2Band {
    /// under 1 kg
    Grams,
    /// 1 kg up to 10 kg
    SmallKilograms,
    /// 10 kg up to 2 t
    Kilograms,
    /// over 2 t up to 100 t
    Tonnes,
    /// over 100 t
    LargeTonnes,
}

impl Co2Band {
    pub fn of(kg: f64) -> Self {
        if kg < 1.0 {
            Co2Band::Grams
        } else if kg < 10.0 {
            Co2Band::SmallKilograms
        } else if kg > 100_000.0 {
            Co2Band::LargeTonnes
        } else if kg > 2000.0 {
            Co2Band::Tonnes
        } else {
            Co2Band::Kilograms
        }
    }

    /// Multiplier from kg to the display unit.
    pub fn scale(self) -> f64 {
        match self {
            Co2Band::Grams => 1000.0,
            Co2Band::SmallKilograms | Co2Band::Kilograms => 1.0,
            Co2Band::Tonnes | Co2Band::LargeTonnes => 0.001,
        }
    }

    pub fn places(self) -> u32 {
        match self {
            Co2Band::Grams => 3,
            Co2Band::SmallKilograms | Co2Band::Tonnes => 1,
            Co2Band::Kilograms | Co2Band::LargeTonnes => 0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Co2Band::Grams => "grams",
            Co2Band::SmallKilograms | Co2Band::Kilograms => "kg",
            Co2Band::Tonnes | Co2Band::LargeTonnes => "tonnes",
        }
    }
}

/// CO2e mass, e.g. "7.4 tonnes".
pub fn co2_kg(kg: f64) -> String {
    let band = Co2Band::of(kg);
    format!("{} {}", round(kg * band.scale(), band.places()), band.unit())
}

pub fn distance_km(km: f64) -> String {
    format!("{} km", round(km, 0))
}

/// "3.2 times", or `None` when the multiple is not above one.
pub fn trip_multiple(multiple: f64) -> Option<String> {
    if multiple > 1.0 {
        let places = if multiple > 20.0 { 0 } else { 1 };
        Some(format!("{} times", round(multiple, places)))
    } else {
        None
    }
}
