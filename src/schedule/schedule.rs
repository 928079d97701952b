use crate::error::ScheduleError;
use crate::flight::{Flight, GateAssignment};
use crate::gate::{Gate, GateId};
use crate::schedule::demand::peak_demand;
use crate::schedule::engine::{AssignConfig, assign_gates};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

/// A batch of flights together with the gates of its latest run.
pub struct Schedule {
    pub flights: Vec<Flight>,
    pub gates: Vec<Gate>,
    pub config: AssignConfig,
    stale: bool,
}

impl Schedule {
    pub fn new(flights: Vec<Flight>, config: AssignConfig) -> Schedule {
        Schedule {
            flights,
            gates: vec![],
            config,
            stale: true,
        }
    }

    /// Reads a JSON scenario. Settings missing from the file fall back to
    /// [`AssignConfig::default`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ScheduleError> {
        #[derive(Deserialize)]
        struct RawData {
            servicing_buffer: Option<u64>,
            max_gates: Option<NonZeroUsize>,
            flights: Vec<Flight>,
        }
        let raw: RawData = serde_json::from_str(data)?;

        let mut config = AssignConfig::default();
        if let Some(buffer) = raw.servicing_buffer {
            config.servicing_buffer = buffer;
        }
        config.max_gates = raw.max_gates;

        let mut flights = raw.flights;
        flights.iter_mut().for_each(|f| f.gate = GateAssignment::Pending);
        debug!(
            flights = flights.len(),
            buffer = config.servicing_buffer,
            max_gates = ?config.max_gates,
            "Scenario loaded"
        );
        Ok(Schedule::new(flights, config))
    }

    /// Runs a fresh batch: previous gates and outcomes are discarded first.
    pub fn assign(&mut self) -> Result<(), ScheduleError> {
        self.gates.clear();
        self.flights
            .iter_mut()
            .for_each(|f| f.gate = GateAssignment::Pending);
        self.stale = true;
        debug!(flights = self.flights.len(), "Starting fresh batch");

        self.gates = assign_gates(&mut self.flights, &self.config)?;
        self.stale = false;

        self.assert_invariants();
        Ok(())
    }

    pub fn add_flight(&mut self, flight: Flight) {
        self.flights.push(flight);
        self.stale = true;
    }

    pub fn replace_flights(&mut self, flights: Vec<Flight>) {
        self.flights = flights;
        self.gates.clear();
        self.stale = true;
    }

    pub fn set_config(&mut self, config: AssignConfig) {
        self.config = config;
        self.stale = true;
    }

    /// True when flights or settings changed since the last run.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        id.0.checked_sub(1).and_then(|idx| self.gates.get(idx))
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Flight> {
        self.flights.iter().filter(|f| f.gate.is_unassigned())
    }

    pub fn assigned_count(&self) -> usize {
        self.flights.iter().filter(|f| f.gate.gate().is_some()).count()
    }

    pub fn peak_demand(&self) -> usize {
        peak_demand(&self.flights, self.config.servicing_buffer)
    }

    /// Gate count meets the overlap lower bound. Only guaranteed without a
    /// capacity limit.
    pub fn is_minimal(&self) -> bool {
        !self.stale && self.gates.len() == self.peak_demand()
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        let buffer = self.config.servicing_buffer;

        debug_assert!(
            self.flights
                .iter()
                .all(|f| f.gate != GateAssignment::Pending),
            "Every flight must have an outcome after a run"
        );

        debug_assert!(
            self.flights.iter().all(|f| match f.gate.gate() {
                Some(GateId(n)) => n >= 1 && n <= self.gates.len(),
                None => true,
            }),
            "Assigned gate id out of range"
        );

        debug_assert!(
            self.gates.iter().all(|g| g
                .occupancy
                .windows(2)
                .all(|w| w[1].0 >= w[0].1.saturating_add(buffer))),
            "Gate double-booked within servicing buffer"
        );

        if let Some(limit) = self.config.max_gates {
            debug_assert!(
                self.gates.len() <= limit.get(),
                "Gate capacity limit exceeded"
            );
        } else {
            debug_assert!(
                self.flights.iter().all(|f| !f.gate.is_unassigned()),
                "Unassigned flight without a capacity limit"
            );
        }
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
