//! Inbound events and the outbound effects they plan.

use crate::session::{ChargeType, Location, RecordHandle};

/// One inbound step of the conversation, already stripped of transport
/// details by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Explicit reset; discards any prior session.
    Start,
    /// Free-text input for whatever field is pending.
    Text(String),
    /// A discrete button choice.
    Chose(Choice),
    /// The operator asked to record an energy meter reading.
    EnergyRequested,
    /// The operator asked to finalize the charging session.
    CompleteRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Location(Location),
    ChargeType(ChargeType),
}

/// Outbound calls the caller executes in order. State is only committed once
/// every effect succeeded, so a transport failure leaves the step retryable.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Message to the operator.
    Prompt { text: String },
    /// Message to the operator with a fixed set of buttons.
    Choose {
        text: String,
        options: Vec<(String, Choice)>,
    },
    /// Publish a new log record to the channel. The caller attaches the
    /// resulting handle to the planned session before committing.
    Publish { text: String },
    /// Overwrite the previously published record.
    Edit { record: RecordHandle, text: String },
}

impl Effect {
    pub(crate) fn prompt(text: impl Into<String>) -> Self {
        Effect::Prompt { text: text.into() }
    }

    pub(crate) fn choose(text: impl Into<String>, options: &[(&str, Choice)]) -> Self {
        Effect::Choose {
            text: text.into(),
            options: options
                .iter()
                .map(|(label, choice)| ((*label).to_string(), *choice))
                .collect(),
        }
    }
}
