//! Rendering of the published log record.
//!
//! The record text is an observable contract: it is what ends up in the log
//! channel, so the line layout and the timestamp format are pinned by tests.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Kolkata;

use crate::session::{AfterCharge, ChargingSession, Location, TripEntry};

/// Formats a timestamp in Indian Standard Time, e.g. `06-08-2026 10:15 AM`.
pub(crate) fn format_ist(at: DateTime<Utc>) -> String {
    at.with_timezone(&Kolkata)
        .format("%d-%m-%Y %I:%M %p")
        .to_string()
}

/// The record published when the charging session starts.
pub(crate) fn initial(charge: &ChargingSession) -> String {
    format!(
        "🚗 EV Log Entry\n\n{}\n{}\n{}\n\nDate & Time Before Starting the Charge: {}",
        base_lines(&charge.base),
        charge.location,
        charge.charge_type,
        format_ist(charge.started_at),
    )
}

/// The record text the published message is edited to at finalization.
/// `after` carries the partial-charge readings and is `None` for a full
/// charge. The energy line appears only for home charging with a recorded
/// reading.
pub(crate) fn finished(
    charge: &ChargingSession,
    after: Option<&AfterCharge>,
    ended_at: DateTime<Utc>,
) -> String {
    let energy_line = match (charge.location, charge.energy) {
        (Location::Home, Some(value)) => format!("Energy Meter Reading: {value:.1}\n"),
        _ => String::new(),
    };
    let after_lines = after
        .map(|after| {
            format!(
                "\nBattery Percentage After Charging: {}\nDistance To Empty After Charging: {}",
                after.battery_percent, after.distance_to_empty_km
            )
        })
        .unwrap_or_default();

    format!(
        "🚗 EV Log Entry\n\n{}\n{}\n{}{}{}\n\nDate & Time Before Starting the Charge: {}\nDate & Time After Stopping the Charge: {}",
        base_lines(&charge.base),
        charge.location,
        energy_line,
        charge.charge_type,
        after_lines,
        format_ist(charge.started_at),
        format_ist(ended_at),
    )
}

fn base_lines(trip: &TripEntry) -> String {
    format!(
        "Trip Meter: {:.1} km\nOdometer: {} km\nBattery: {} %\nDistance To Empty: {} km",
        trip.trip_meter_km, trip.odometer_km, trip.battery_percent, trip.distance_to_empty_km
    )
}
