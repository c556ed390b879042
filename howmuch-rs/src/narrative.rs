//! Explanatory sentences around the figures.

use crate::{
    engine::{Calculator, Machine},
    format::{round, round_trimmed},
};

/// What is known about the selected machine's power draw.
pub fn computer_description(machine: &Machine) -> String {
    let megawatts = round_trimmed(machine.power_kw() / 1000.0, 3);
    let tflops = round_trimmed(machine.tflops(), 3);
    let efficiency = round(machine.efficiency_gflops_per_watt(), 1);

    match machine {
        Machine::Reference(computer) if computer.is_calculated => format!(
            "is estimated to consume {megawatts} megawatts (based on the average efficiency \
             of {efficiency} GFLOPs / Watt for {}, and a reported RMax speed of {tflops} TFLOPs).",
            computer.year
        ),
        Machine::Reference(_) => format!(
            "is reported to consume {megawatts} megawatts to achieve a reported RMax speed \
             of {tflops} TFLOPs (an efficiency of {efficiency} GFLOPs / Watt)."
        ),
        Machine::Custom(custom) => {
            let unit = if custom.power_kw() == 1000.0 {
                "megawatt"
            } else {
                "megawatts"
            };
            format!(
                "consumes {megawatts} {unit}, and runs at an Rmax speed of {tflops} TFLOPs. \
                 This is an efficiency of {efficiency} GFLOPs/Watt. It contains {} cores \
                 and {} accelerator cores.",
                custom.cores(),
                custom.accelerator_cores()
            )
        }
    }
}

pub fn burn_rate(calc: &Calculator) -> String {
    format!(
        "Assuming a PUE of {} it will burn electricity at a rate of {}.",
        round_trimmed(calc.params().pue(), 2),
        calc.power_rate(false)
    )
}

pub fn homes_comparison(calc: &Calculator) -> String {
    format!(
        "Compared to the average domestic electricity consumption in {}, this is the same \
         as powering {}.",
        calc.place().display_name(),
        calc.homes_equivalent(false)
    )
}

pub fn job_comparison(calc: &Calculator) -> String {
    let params = calc.params();
    format!(
        "The electricity consumed to run a job for {} {} that uses {}% of this supercomputer \
         (so {} cores and {} accelerator cores, consuming {} - equivalent to {}) would power \
         an average home in {} for {}.",
        round_trimmed(params.duration_count(), 2),
        params.duration_unit().label(params.duration_count()),
        round_trimmed(params.utilization_percent(), 2),
        round(calc.active_cores(), 0),
        round(calc.active_accelerator_cores(), 0),
        calc.power_rate(true),
        calc.homes_equivalent(true),
        calc.place().display_name(),
        calc.domestic_time_equivalent()
    )
}

pub fn emissions(calc: &Calculator) -> String {
    let trips = calc
        .flight_trips()
        .map(|times| format!(", or {times} the distance from London to New York"))
        .unwrap_or_default();
    format!(
        "This job consumes {}, emitting {} of CO2e. That is the same as flying {} in \
         economy class{trips}.",
        calc.energy_consumed(),
        calc.co2_display(),
        calc.flight_distance()
    )
}

/// Source attribution, one entry per line of the sources list.
pub fn sources(calc: &Calculator, emissions: bool) -> Vec<String> {
    let place = calc.place();
    let mut lines = vec![
        format!(
            "The total electricity consumption of the average home in {} is {} kWh per year, \
             which is an average of {} Watts.",
            place.display_name(),
            round_trimmed(place.annual_kwh, 3),
            round(calc.place_avg_power_watts(), 0)
        ),
        "Supercomputer power information taken from the Top500 (https://top500.org).".to_string(),
        "Average domestic power consumption taken from World Energy Council household \
         electricity use figures, and for the UK from OVO Energy guides."
            .to_string(),
    ];
    if emissions {
        let factors = calc.factors();
        lines.push(format!(
            "Emissions use the UK government greenhouse gas conversion factors: {} kg CO2e per \
             kWh of grid electricity, and {} kg CO2e per passenger km of a long-haul economy \
             flight (including radiative forcing). London to New York is {} km.",
            factors.kg_co2e_per_kwh, factors.flight_kg_co2e_per_km, factors.london_new_york_km
        ));
    }
    lines.push(
        "The PUE (power usage effectiveness) relates the electricity consumed by a data \
         center to the electricity consumed by its computers. It is always greater than 1.0; \
         the average is about 1.6 to 2.0, while 1.2 represents a very efficient data center."
            .to_string(),
    );
    lines.push(
        "Estimated power consumptions use the median computational efficiency of the Top500 \
         for the year the supercomputer was last published, multiplied by its reported Rmax. \
         Figures are for the linpack run of the Top500 submission and are for illustration \
         only."
            .to_string(),
    );
    lines
}
