//! Date handling and logging helpers shared across the crate

pub mod date_utils;
pub mod logging;
