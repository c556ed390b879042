use howmuch_rs::{DurationUnit, ReportConfig, Widget};

type ExampleError = Box<dyn std::error::Error>;

const COMPUTERS: &str = r#"{
    "ARCHER2": {"power": 3220, "tflops": 19538, "cores": 750080, "year": 2021},
    "Frontier": {"power": 22703, "tflops": 1102000, "cores": 8730112, "acores": 8138240, "year": 2022},
    "Old Iron": {"power": 1900, "tflops": 1500, "cores": 90000, "year": 2012, "is_calculated": true}
}"#;

const PLACES: &str = r#"{
    "United Kingdom": 4000,
    "United States": 10700,
    "Germany": 3100,
    "World": 3500
}"#;

fn main() -> Result<(), ExampleError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting native HowMuch report example...");

    let mut widget = Widget::new(COMPUTERS, PLACES)?;
    log::info!("Computers: {:?}", widget.computer_options());
    log::info!("Places: {:?}", widget.place_options());

    // --- 1. Default custom machine ---
    let report = widget.report()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // --- 2. A week on half of Frontier in the United States ---
    widget.select_computer("Frontier")?;
    widget.select_place("United States")?;
    widget.set_utilization_percent(50.0);
    widget.set_duration_unit(DurationUnit::Week.name())?;

    let report = widget.report()?;
    println!("{} draws {}", report.computer, report.power_rate);
    println!("That is the same as powering {} in {}", report.homes, report.place);
    println!("An average home would run for {}", report.domestic_duration);
    if let Some(emissions) = &report.emissions {
        println!("{} emits {} of CO2e", emissions.energy, emissions.co2);
        if let Some(trips) = &emissions.london_new_york_trips {
            println!("Flying {} ({trips} London to New York)", emissions.flight_distance);
        }
    }

    // --- 3. Comparison only, as a small embed would show it ---
    let widget = widget.with_config(ReportConfig::comparison());
    log::info!("Comparison report: {}", widget.report_json()?);

    Ok(())
}
