use crate::flight::Flight;
use crate::time::Time;
use serde::{Deserialize, Serialize};

/// Sequential, 1-based gate number in the order gates were opened.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(pub usize);

impl std::fmt::Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gate {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gate {
    pub id: GateId,
    pub next_available: Time,
    /// `(arrival, departure)` of hosted flights, oldest first.
    pub occupancy: Vec<(Time, Time)>,
}

impl Gate {
    pub(crate) fn open(id: GateId, at: Time) -> Gate {
        Gate {
            id,
            next_available: at,
            occupancy: vec![],
        }
    }

    pub(crate) fn host(&mut self, flight: &Flight, servicing_buffer: u64) {
        self.occupancy.push((flight.arrival, flight.departure));
        self.next_available = flight.ready_at(servicing_buffer);
    }

    pub fn flights_hosted(&self) -> usize {
        self.occupancy.len()
    }

    /// Minutes with a flight parked at the gate.
    pub fn busy_minutes(&self) -> u64 {
        self.occupancy.iter().map(|(arr, dep)| *dep - *arr).sum()
    }

    /// Post-departure servicing periods, one per hosted flight.
    pub fn servicing_windows(&self, servicing_buffer: u64) -> Vec<(Time, Time)> {
        self.occupancy
            .iter()
            .map(|(_, dep)| (*dep, dep.saturating_add(servicing_buffer)))
            .collect()
    }

    /// Earliest arrival at or after `from` that fits `turnaround` minutes plus
    /// servicing between the flights already hosted here.
    pub fn earliest_fit(&self, from: Time, turnaround: u64, servicing_buffer: u64) -> Time {
        let mut start = from;
        for (arr, dep) in &self.occupancy {
            let end = start.saturating_add(turnaround).saturating_add(servicing_buffer);
            if !Time::is_overlapping(&(start, end), &(*arr, dep.saturating_add(servicing_buffer))) {
                if end <= *arr {
                    break;
                }
                continue;
            }
            start = dep.saturating_add(servicing_buffer);
        }
        start
    }
}
