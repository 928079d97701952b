use crate::flight::FlightId;
use crate::time::Time;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("flight {flight} departs at {departure}, which is not after its arrival at {arrival}")]
    InvalidInterval {
        flight: FlightId,
        arrival: Time,
        departure: Time,
    },
    #[error("invalid time '{0}': use HHMM or HH:MM with hours 00-23 and minutes 00-59")]
    InvalidTime(String),
    #[error("flight number cannot be empty")]
    EmptyFlightId,
    #[error("no flights to schedule")]
    NoFlights,
    #[error("unknown dataset {0}, expected 1-{1}")]
    UnknownDataset(usize, usize),
    #[error("batch already holds the maximum of {0} flights")]
    BatchFull(usize),
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}
