use crate::error::ScheduleError;
use crate::flight::Flight;
use crate::time::Time;

pub const MAX_MANUAL_FLIGHTS: usize = 100;
pub const MIN_RECOMMENDED_TURNAROUND: u64 = 30;
pub const MAX_RECOMMENDED_TURNAROUND: u64 = 720;

/// Turnarounds outside the recommended range need operator confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turnaround {
    Normal,
    Short(u64),
    Long(u64),
}

impl Turnaround {
    pub fn classify(arrival: Time, departure: Time) -> Turnaround {
        let minutes = departure.0.saturating_sub(arrival.0);
        if minutes < MIN_RECOMMENDED_TURNAROUND {
            Turnaround::Short(minutes)
        } else if minutes > MAX_RECOMMENDED_TURNAROUND {
            Turnaround::Long(minutes)
        } else {
            Turnaround::Normal
        }
    }

    pub fn needs_confirmation(&self) -> bool {
        !matches!(self, Turnaround::Normal)
    }

    pub fn warning(&self) -> Option<String> {
        match self {
            Turnaround::Normal => None,
            Turnaround::Short(m) => Some(format!(
                "Very short turnaround time ({} minutes). Minimum recommended: {} minutes.",
                m, MIN_RECOMMENDED_TURNAROUND
            )),
            Turnaround::Long(m) => Some(format!(
                "Very long turnaround time ({} hours). Maximum recommended: {} hours.",
                m / 60,
                MAX_RECOMMENDED_TURNAROUND / 60
            )),
        }
    }
}

/// Validates one manually entered flight. Times use `HHMM` or `HH:MM`.
pub fn parse_flight(
    flight_id: &str,
    arrival: &str,
    departure: &str,
) -> Result<(Flight, Turnaround), ScheduleError> {
    let flight_id = flight_id.trim();
    if flight_id.is_empty() {
        return Err(ScheduleError::EmptyFlightId);
    }
    let arrival: Time = arrival.parse()?;
    let departure: Time = departure.parse()?;

    let flight = Flight::new(flight_id, arrival, departure);
    if !flight.has_valid_interval() {
        return Err(ScheduleError::InvalidInterval {
            flight: flight.id,
            arrival,
            departure,
        });
    }
    Ok((flight, Turnaround::classify(arrival, departure)))
}

pub fn ensure_room(batch_len: usize) -> Result<(), ScheduleError> {
    if batch_len >= MAX_MANUAL_FLIGHTS {
        return Err(ScheduleError::BatchFull(MAX_MANUAL_FLIGHTS));
    }
    Ok(())
}
