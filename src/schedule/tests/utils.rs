use crate::flight::{Flight, FlightId};
use crate::gate::GateId;
use crate::schedule::engine::{AssignConfig, Selection};
use crate::schedule::schedule::Schedule;
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub fn id(s: &str) -> FlightId {
    Arc::from(s)
}

pub fn add_flight(flights: &mut Vec<Flight>, flight_id: &str, arrival: u64, departure: u64) {
    flights.push(Flight::new(id(flight_id), Time(arrival), Time(departure)));
}

pub fn config(servicing_buffer: u64, max_gates: Option<usize>) -> AssignConfig {
    AssignConfig {
        servicing_buffer,
        max_gates: max_gates.and_then(NonZeroUsize::new),
        selection: Selection::Heap,
    }
}

pub fn gate_of(schedule: &Schedule, flight_id: &str) -> Option<GateId> {
    schedule
        .flights
        .iter()
        .find(|f| &*f.id == flight_id)
        .and_then(|f| f.gate.gate())
}

pub fn arb_flight() -> impl Strategy<Value = Flight> {
    (
        prop_oneof![Just("FL_1"), Just("FL_2"), Just("FL_3")],
        0..1500u64,
        1..300u64,
    )
        .prop_map(|(fid, arr, dur)| Flight::new(id(fid), Time(arr), Time(arr) + dur))
}

pub fn arb_selection() -> impl Strategy<Value = Selection> {
    prop_oneof![Just(Selection::Heap), Just(Selection::Linear)]
}
