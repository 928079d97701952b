use crate::gate::GateId;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type FlightId = Arc<str>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "gate")]
pub enum GateAssignment {
    /// Not yet seen by a run.
    #[default]
    Pending,
    Assigned(GateId),
    /// No gate could be opened or reused within the capacity limit.
    Unassigned,
}

impl GateAssignment {
    pub fn gate(&self) -> Option<GateId> {
        match self {
            GateAssignment::Assigned(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, GateAssignment::Unassigned)
    }
}

impl std::fmt::Display for GateAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateAssignment::Pending => write!(f, "-"),
            GateAssignment::Assigned(id) => write!(f, "{}", id),
            GateAssignment::Unassigned => write!(f, "UNASSIGNED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub arrival: Time,
    pub departure: Time,
    #[serde(default)]
    pub gate: GateAssignment,
}

impl Flight {
    pub fn new(id: impl Into<FlightId>, arrival: Time, departure: Time) -> Flight {
        Flight {
            id: id.into(),
            arrival,
            departure,
            gate: GateAssignment::Pending,
        }
    }

    /// Minutes spent at the gate, excluding servicing.
    pub fn turnaround(&self) -> u64 {
        self.departure.0.saturating_sub(self.arrival.0)
    }

    /// Instant the hosting gate may take the next flight.
    pub fn ready_at(&self, servicing_buffer: u64) -> Time {
        self.departure.saturating_add(servicing_buffer)
    }

    pub fn has_valid_interval(&self) -> bool {
        self.departure > self.arrival
    }
}
