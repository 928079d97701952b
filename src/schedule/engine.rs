use crate::error::ScheduleError;
use crate::flight::{Flight, GateAssignment};
use crate::gate::{Gate, GateId};
use crate::time::Time;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

pub const DEFAULT_SERVICING_BUFFER: u64 = 20;

/// How the engine finds the gate that frees up first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Selection {
    /// Min-heap keyed on `(next_available, gate id)`.
    #[default]
    Heap,
    /// Scan of every open gate with the same key.
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignConfig {
    pub servicing_buffer: u64,
    pub max_gates: Option<NonZeroUsize>,
    pub selection: Selection,
}

impl Default for AssignConfig {
    fn default() -> Self {
        AssignConfig {
            servicing_buffer: DEFAULT_SERVICING_BUFFER,
            max_gates: None,
            selection: Selection::default(),
        }
    }
}

impl AssignConfig {
    fn can_open(&self, open: usize) -> bool {
        self.max_gates.is_none_or(|limit| open < limit.get())
    }
}

trait GatePool {
    /// Takes the gate with the smallest `(next_available, id)` if it is free by `at`.
    fn take_free(&mut self, gates: &[Gate], at: Time) -> Option<usize>;

    fn release(&mut self, gates: &[Gate], idx: usize);
}

#[derive(Default)]
struct EarliestHeap {
    heap: BinaryHeap<Reverse<(Time, GateId, usize)>>,
}

impl GatePool for EarliestHeap {
    fn take_free(&mut self, _gates: &[Gate], at: Time) -> Option<usize> {
        let free = self
            .heap
            .peek()
            .is_some_and(|Reverse((free_at, _, _))| *free_at <= at);
        if !free {
            return None;
        }
        self.heap.pop().map(|Reverse((_, _, idx))| idx)
    }

    fn release(&mut self, gates: &[Gate], idx: usize) {
        let gate = &gates[idx];
        self.heap.push(Reverse((gate.next_available, gate.id, idx)));
    }
}

struct LinearScan;

impl GatePool for LinearScan {
    fn take_free(&mut self, gates: &[Gate], at: Time) -> Option<usize> {
        gates
            .iter()
            .enumerate()
            .min_by_key(|(_, g)| (g.next_available, g.id))
            .filter(|(_, g)| g.next_available <= at)
            .map(|(idx, _)| idx)
    }

    fn release(&mut self, _gates: &[Gate], _idx: usize) {}
}

/// Runs one greedy batch over `flights`.
///
/// Flights are stably sorted by arrival, so flights sharing an arrival keep
/// their input order. Every flight's `gate` field is overwritten with the
/// outcome of this run; the returned gates are in opening order.
pub fn assign_gates(
    flights: &mut [Flight],
    config: &AssignConfig,
) -> Result<Vec<Gate>, ScheduleError> {
    if let Some(bad) = flights.iter().find(|f| !f.has_valid_interval()) {
        return Err(ScheduleError::InvalidInterval {
            flight: bad.id.clone(),
            arrival: bad.arrival,
            departure: bad.departure,
        });
    }

    flights.sort_by_key(|f| f.arrival);
    let gates = match config.selection {
        Selection::Heap => run(flights, config, &mut EarliestHeap::default()),
        Selection::Linear => run(flights, config, &mut LinearScan),
    };

    info!(
        flights = flights.len(),
        gates = gates.len(),
        unassigned = flights.iter().filter(|f| f.gate.is_unassigned()).count(),
        buffer = config.servicing_buffer,
        "Gate assignment complete"
    );
    Ok(gates)
}

fn run<P: GatePool>(flights: &mut [Flight], config: &AssignConfig, pool: &mut P) -> Vec<Gate> {
    let mut gates: Vec<Gate> = Vec::new();

    for flight in flights.iter_mut() {
        let slot = match pool.take_free(&gates, flight.arrival) {
            Some(idx) => Some(idx),
            None if config.can_open(gates.len()) => {
                gates.push(Gate::open(GateId(gates.len() + 1), flight.arrival));
                Some(gates.len() - 1)
            }
            None => None,
        };

        match slot {
            Some(idx) => {
                gates[idx].host(flight, config.servicing_buffer);
                pool.release(&gates, idx);
                flight.gate = GateAssignment::Assigned(gates[idx].id);
                debug!(flight = %flight.id, gate = %gates[idx].id, free_at = %gates[idx].next_available, "Placed");
            }
            None => {
                flight.gate = GateAssignment::Unassigned;
                warn!(flight = %flight.id, arrival = %flight.arrival, "No gate within capacity limit");
            }
        }
    }
    gates
}
