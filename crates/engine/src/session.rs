//! Per-operator conversation state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Opaque reference to the published log message, handed over by the
/// transport after a `Publish` effect and used later to edit it in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHandle(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Home,
    Outside,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Home => write!(f, "Home Charging"),
            Location::Outside => write!(f, "Outside Charging"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChargeType {
    Full,
    Partial,
}

impl std::fmt::Display for ChargeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargeType::Full => write!(f, "Full Charge"),
            ChargeType::Partial => write!(f, "Partial Charge"),
        }
    }
}

/// Vehicle readings taken before plugging in, collected in fixed order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripEntry {
    /// Trip meter reading, kept at one decimal place.
    pub trip_meter_km: f64,
    pub odometer_km: u32,
    pub battery_percent: u32,
    pub distance_to_empty_km: u32,
}

/// Readings taken after a partial charge, threaded straight into the final
/// record rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AfterCharge {
    pub battery_percent: u32,
    pub distance_to_empty_km: u32,
}

/// A charging session in progress. Only constructed once both the location
/// and the charge type are chosen, so a half-configured session cannot exist.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargingSession {
    pub base: TripEntry,
    pub location: Location,
    pub charge_type: ChargeType,
    pub started_at: DateTime<Utc>,
    pub record: Option<RecordHandle>,
    /// Energy meter reading (one decimal place); home charging only.
    pub energy: Option<f64>,
}

/// The input-collection mode. Fields validated so far ride along in the
/// variant, so a half-filled entry cannot outlive its mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
    #[default]
    Idle,
    CollectingTrip,
    CollectingOdo {
        trip_meter_km: f64,
    },
    CollectingBattery {
        trip_meter_km: f64,
        odometer_km: u32,
    },
    CollectingDte {
        trip_meter_km: f64,
        odometer_km: u32,
        battery_percent: u32,
    },
    AwaitingLocation {
        trip: TripEntry,
    },
    AwaitingChargeType {
        trip: TripEntry,
        location: Location,
        started_at: DateTime<Utc>,
    },
    CollectingEnergy,
    CollectingBatteryAfter,
    CollectingDteAfter {
        battery_after_percent: u32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub mode: Mode,
    pub charge: Option<ChargingSession>,
}

impl Session {
    /// A just-reset session, waiting for the first trip reading.
    pub fn fresh() -> Self {
        Session {
            mode: Mode::CollectingTrip,
            charge: None,
        }
    }

    /// Attaches the handle of the just-published record. Called by the
    /// transport between executing a `Publish` effect and committing.
    pub fn attach_record(&mut self, record: RecordHandle) {
        if let Some(charge) = self.charge.as_mut() {
            charge.record = Some(record);
        }
    }
}

/// Conversation state keyed by the operator's messaging identity.
///
/// Sessions are created only by an explicit reset; an event for an unknown
/// identity is the caller's error to report, never a silent initialization.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<u64, Session>,
}

impl SessionStore {
    pub fn get(&self, user: u64) -> Option<&Session> {
        self.sessions.get(&user)
    }

    pub fn put(&mut self, user: u64, session: Session) {
        self.sessions.insert(user, session);
    }

    /// Discards any in-progress state for `user` and starts a fresh entry.
    pub fn reset(&mut self, user: u64) -> &Session {
        self.sessions.insert(user, Session::fresh());
        &self.sessions[&user]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reset_discards_everything_and_restarts_collection() {
        let mut store = SessionStore::default();
        store.put(
            1,
            Session {
                mode: Mode::CollectingEnergy,
                charge: Some(ChargingSession {
                    base: TripEntry {
                        trip_meter_km: 12.3,
                        odometer_km: 45_000,
                        battery_percent: 80,
                        distance_to_empty_km: 210,
                    },
                    location: Location::Home,
                    charge_type: ChargeType::Partial,
                    started_at: Utc.with_ymd_and_hms(2026, 8, 6, 4, 45, 0).unwrap(),
                    record: Some(RecordHandle(9)),
                    energy: Some(5.5),
                }),
            },
        );

        let session = store.reset(1);
        assert_eq!(session.mode, Mode::CollectingTrip);
        assert!(session.charge.is_none());
    }

    #[test]
    fn unknown_user_is_not_created_implicitly() {
        let store = SessionStore::default();
        assert!(store.get(99).is_none());
    }
}
