mod narrative;

pub mod engine;
pub mod error;
pub mod format;
pub mod params;
pub mod report;
pub mod widget;

pub use engine::{Calculator, Factors, Machine};
pub use error::HowMuchError;
pub use howmuch_core::{Computer, Place, ReferenceData};
pub use params::{CustomComputer, DurationUnit, Parameters, Selection};
pub use report::{Report, ReportConfig};
pub use widget::Widget;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

// --- WASM Setup ---
// Initialize logging and panic hook for WASM
cfg_if::cfg_if! {
    if #[cfg(all(feature = "wasm", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn wasm_init() {
            // Only run this initialization once.
            static START: std::sync::Once = std::sync::Once::new();
            START.call_once(|| {
                // Use `wasm_logger` for Rust logs -> console.log
                wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
                // Redirect panics to console.error
                std::panic::set_hook(Box::new(console_error_panic_hook::hook));
                log::info!("HowMuch WASM module initialized.");
            });
        }
    }
}

/// Formats a job's power draw for display, e.g. `1200.0` -> "1.2 megawatts".
#[cfg_attr(feature = "wasm", wasm_bindgen)]
pub fn human_power(kw: f64) -> String {
    format::power_kw(kw)
}
