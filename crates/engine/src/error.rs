//! Errors the conversation engine can report.
//!
//! Every variant is recoverable from the operator's point of view: state is
//! never advanced on error, so resending a corrected input retries the same
//! step.

use std::fmt;

use thiserror::Error;

/// The input field a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TripMeter,
    Odometer,
    Battery,
    DistanceToEmpty,
    Energy,
    BatteryAfter,
    DistanceToEmptyAfter,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::TripMeter => "trip meter reading",
            Field::Odometer => "odometer reading",
            Field::Battery => "battery percentage",
            Field::DistanceToEmpty => "distance to empty",
            Field::Energy => "energy meter reading",
            Field::BatteryAfter => "battery percentage after charging",
            Field::DistanceToEmptyAfter => "distance to empty after charging",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0} expects a decimal value")]
    InvalidDecimal(Field),
    #[error("{0} expects a whole number")]
    InvalidInteger(Field),
    #[error("energy readings only apply to home charging")]
    EnergyNotHome,
    #[error("no active charging session")]
    NoActiveSession,
    #[error("the log entry has not been published yet")]
    RecordUnavailable,
    #[error("command not applicable: {0}")]
    Inapplicable(&'static str),
}
