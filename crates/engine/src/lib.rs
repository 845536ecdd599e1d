//! Conversation engine for the EV charge logger.
//!
//! The engine is a deterministic state machine: one inbound [`Event`] is
//! planned into a new [`Session`] plus a list of outbound [`Effect`]s, and
//! the caller commits the session only after every effect succeeded. The
//! engine itself performs no I/O and knows nothing about the transport.

use chrono::{DateTime, Utc};

pub use error::{EngineError, Field};
pub use events::{Choice, Effect, Event};
pub use session::{
    AfterCharge, ChargeType, ChargingSession, Location, Mode, RecordHandle, Session, SessionStore,
    TripEntry,
};

mod error;
mod events;
mod parsing;
mod record;
mod session;

type ResultEngine<T> = Result<T, EngineError>;

/// Wall clock, injected so transitions can be replayed in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The planned reaction to one event: the session as it will look once the
/// effects succeed, and the outbound calls to make, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub session: Session,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Default)]
pub struct Engine {
    sessions: SessionStore,
}

impl Engine {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// Plans the reaction to `event` without touching stored state.
    ///
    /// The caller executes the returned effects and, once every call
    /// succeeded, stores the new session with [`Engine::commit`]. Dropping
    /// the outcome on a transport failure leaves the stored session
    /// unchanged, so the same step can simply be retried.
    ///
    /// Only [`Event::Start`] may arrive for an identity without a session;
    /// anything else is [`EngineError::NoActiveSession`].
    pub fn plan<C: Clock>(&self, user: u64, event: &Event, clock: &C) -> ResultEngine<Outcome> {
        match self.sessions.get(user) {
            Some(session) => step(session, event, clock),
            None if matches!(event, Event::Start) => step(&Session::default(), event, clock),
            None => Err(EngineError::NoActiveSession),
        }
    }

    pub fn commit(&mut self, user: u64, session: Session) {
        self.sessions.put(user, session);
    }

    pub fn session(&self, user: u64) -> Option<&Session> {
        self.sessions.get(user)
    }
}

fn step<C: Clock>(current: &Session, event: &Event, clock: &C) -> ResultEngine<Outcome> {
    let mut session = current.clone();

    let effects = match (&current.mode, event) {
        (_, Event::Start) => {
            session = Session::fresh();
            vec![Effect::prompt("🚗 EV Logger Started\n\nEnter Trip Meter Reading:")]
        }

        (Mode::CollectingTrip, Event::Text(text)) => {
            let trip_meter_km = parsing::decimal_1dp(text)
                .map_err(|_| EngineError::InvalidDecimal(Field::TripMeter))?;
            session.mode = Mode::CollectingOdo { trip_meter_km };
            vec![Effect::prompt("Enter Odometer Reading:")]
        }
        (Mode::CollectingOdo { trip_meter_km }, Event::Text(text)) => {
            let odometer_km = parsing::whole_number(text)
                .map_err(|_| EngineError::InvalidInteger(Field::Odometer))?;
            session.mode = Mode::CollectingBattery {
                trip_meter_km: *trip_meter_km,
                odometer_km,
            };
            vec![Effect::prompt("Enter Battery Percentage:")]
        }
        (
            Mode::CollectingBattery {
                trip_meter_km,
                odometer_km,
            },
            Event::Text(text),
        ) => {
            let battery_percent = parsing::whole_number(text)
                .map_err(|_| EngineError::InvalidInteger(Field::Battery))?;
            session.mode = Mode::CollectingDte {
                trip_meter_km: *trip_meter_km,
                odometer_km: *odometer_km,
                battery_percent,
            };
            vec![Effect::prompt("Enter Distance To Empty:")]
        }
        (
            Mode::CollectingDte {
                trip_meter_km,
                odometer_km,
                battery_percent,
            },
            Event::Text(text),
        ) => {
            let distance_to_empty_km = parsing::whole_number(text)
                .map_err(|_| EngineError::InvalidInteger(Field::DistanceToEmpty))?;
            session.mode = Mode::AwaitingLocation {
                trip: TripEntry {
                    trip_meter_km: *trip_meter_km,
                    odometer_km: *odometer_km,
                    battery_percent: *battery_percent,
                    distance_to_empty_km,
                },
            };
            vec![Effect::choose(
                "Select Charging Type:",
                &[
                    ("🏠 Home Charging", Choice::Location(Location::Home)),
                    ("⚡ Outside Charging", Choice::Location(Location::Outside)),
                ],
            )]
        }

        (Mode::AwaitingLocation { trip }, Event::Chose(Choice::Location(location))) => {
            session.mode = Mode::AwaitingChargeType {
                trip: *trip,
                location: *location,
                started_at: clock.now(),
            };
            vec![Effect::choose(
                "Is this Full Charge or Partial Charge?",
                &[
                    ("✅ Full Charge", Choice::ChargeType(ChargeType::Full)),
                    ("⚡ Partial Charge", Choice::ChargeType(ChargeType::Partial)),
                ],
            )]
        }
        (
            Mode::AwaitingChargeType {
                trip,
                location,
                started_at,
            },
            Event::Chose(Choice::ChargeType(charge_type)),
        ) => {
            let charge = ChargingSession {
                base: *trip,
                location: *location,
                charge_type: *charge_type,
                started_at: *started_at,
                record: None,
                energy: None,
            };
            let text = record::initial(&charge);
            session.mode = Mode::Idle;
            session.charge = Some(charge);
            vec![
                Effect::Publish { text },
                Effect::prompt("✅ Charging session started!"),
            ]
        }

        (Mode::Idle, Event::EnergyRequested) => {
            let charge = session.charge.as_ref().ok_or(EngineError::NoActiveSession)?;
            if charge.location != Location::Home {
                return Err(EngineError::EnergyNotHome);
            }
            session.mode = Mode::CollectingEnergy;
            vec![Effect::prompt("Enter Energy Meter Reading:")]
        }
        (Mode::CollectingEnergy, Event::Text(text)) => {
            let energy =
                parsing::decimal_1dp(text).map_err(|_| EngineError::InvalidDecimal(Field::Energy))?;
            let charge = session.charge.as_mut().ok_or(EngineError::NoActiveSession)?;
            charge.energy = Some(energy);
            match charge.charge_type {
                ChargeType::Full => return finalize(&session, None, clock),
                ChargeType::Partial => {
                    session.mode = Mode::CollectingBatteryAfter;
                    vec![Effect::prompt("Enter Battery Percentage After Charging:")]
                }
            }
        }

        (Mode::Idle, Event::CompleteRequested) => {
            let charge = session.charge.as_ref().ok_or(EngineError::NoActiveSession)?;
            match charge.charge_type {
                ChargeType::Full => return finalize(&session, None, clock),
                ChargeType::Partial => {
                    session.mode = Mode::CollectingBatteryAfter;
                    vec![Effect::prompt("Enter Battery Percentage After Charging:")]
                }
            }
        }
        (Mode::CollectingBatteryAfter, Event::Text(text)) => {
            let battery_after_percent = parsing::whole_number(text)
                .map_err(|_| EngineError::InvalidInteger(Field::BatteryAfter))?;
            session.mode = Mode::CollectingDteAfter {
                battery_after_percent,
            };
            vec![Effect::prompt("Enter Distance To Empty After Charging:")]
        }
        (Mode::CollectingDteAfter { battery_after_percent }, Event::Text(text)) => {
            let distance_to_empty_km = parsing::whole_number(text)
                .map_err(|_| EngineError::InvalidInteger(Field::DistanceToEmptyAfter))?;
            let after = AfterCharge {
                battery_percent: *battery_after_percent,
                distance_to_empty_km,
            };
            return finalize(&session, Some(after), clock);
        }

        (Mode::Idle, Event::Text(_)) => {
            return Err(if current.charge.is_some() {
                EngineError::Inapplicable("the session is waiting for /energy or /complete")
            } else {
                EngineError::NoActiveSession
            });
        }
        (Mode::AwaitingLocation { .. } | Mode::AwaitingChargeType { .. }, Event::Text(_)) => {
            return Err(EngineError::Inapplicable("pick one of the buttons"));
        }
        (_, Event::Chose(_)) => {
            return Err(EngineError::Inapplicable("no choice is pending"));
        }
        (_, Event::EnergyRequested | Event::CompleteRequested) => {
            return Err(EngineError::Inapplicable("finish the current entry first"));
        }
    };

    Ok(Outcome { session, effects })
}

/// Builds the final record edit and the cleared session. Both finalization
/// triggers (the complete command and the post-energy full-charge path) land
/// here, and the cleared session guarantees the record is finalized at most
/// once.
fn finalize<C: Clock>(
    session: &Session,
    after: Option<AfterCharge>,
    clock: &C,
) -> ResultEngine<Outcome> {
    let charge = session.charge.as_ref().ok_or(EngineError::NoActiveSession)?;
    let record = charge.record.ok_or(EngineError::RecordUnavailable)?;
    let text = record::finished(charge, after.as_ref(), clock.now());

    Ok(Outcome {
        session: Session::default(),
        effects: vec![
            Effect::Edit { record, text },
            Effect::prompt("✅ Charging session completed!"),
        ],
    })
}
