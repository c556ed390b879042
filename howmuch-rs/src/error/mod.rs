use derive_more::From;

use howmuch_core::error::HowMuchCoreError;

pub type Result<T> = core::result::Result<T, HowMuchError>;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[derive(Debug, From)]
pub enum HowMuchError {
    // -- Externals
    #[from]
    Core(HowMuchCoreError),

    #[from]
    Json(serde_json::Error),

    UnknownDurationUnit(String),
    NoPlaces,
}

// region:    --- Error Boilerplate

impl core::fmt::Display for HowMuchError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for HowMuchError {}

// endregion: --- Error Boilerplate

// Convert custom error to JsValue for WASM boundary
#[cfg(feature = "wasm")]
impl From<HowMuchError> for JsValue {
    fn from(err: HowMuchError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
