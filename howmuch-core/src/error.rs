use thiserror::Error;

pub type Result<T> = core::result::Result<T, HowMuchCoreError>;

#[derive(Error, Debug)]
pub enum HowMuchCoreError {
    #[error("Malformed reference data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Reference record '{record}' has invalid {field}: {value} (must be finite and > 0)")]
    NonPositiveValue {
        record: String,
        field: &'static str,
        value: f64,
    },

    #[error("Reference record has an empty name")]
    EmptyName,

    #[error("Reference record name is reserved for the custom computer: {0}")]
    ReservedName(String),

    #[error("Duplicate reference record name: {0}")]
    DuplicateName(String),

    #[error("Unknown computer: {0}")]
    UnknownComputer(String),

    #[error("Unknown place: {0}")]
    UnknownPlace(String),
}

#[cfg(feature = "wasm")]
impl From<HowMuchCoreError> for wasm_bindgen::JsValue {
    fn from(err: HowMuchCoreError) -> Self {
        Self::from_str(&err.to_string())
    }
}
