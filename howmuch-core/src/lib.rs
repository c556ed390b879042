//! # HowMuch Core Library
//!
//! Reference data for the supercomputer electricity calculator: the computer
//! and place tables, their load-time validation, and the fixed conversion
//! constants.

pub mod computer;
pub mod constants;
pub mod error;
pub mod place;
pub mod reference_data;

pub use computer::Computer;
pub use error::HowMuchCoreError;
pub use place::Place;
pub use reference_data::ReferenceData;
