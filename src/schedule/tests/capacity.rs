use crate::flight::GateAssignment::{Assigned, Unassigned};
use crate::gate::GateId;
use crate::schedule::schedule::Schedule;
use crate::schedule::tests::utils::{add_flight, config, gate_of};

#[test]
fn test_limit_leaves_overflow_unassigned() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "FLIGHT_1", 900, 1030);
    add_flight(&mut flights, "FLIGHT_2", 905, 1030);
    add_flight(&mut flights, "FLIGHT_3", 910, 1030);
    add_flight(&mut flights, "FLIGHT_4", 915, 1030);
    add_flight(&mut flights, "FLIGHT_5", 920, 1030);

    let mut schedule = Schedule::new(flights, config(20, Some(3)));
    schedule.assign().unwrap();

    assert_eq!(3, schedule.gates.len());
    assert_eq!(3, schedule.assigned_count());
    let unassigned: Vec<&str> = schedule.unassigned().map(|f| &*f.id).collect();
    assert_eq!(vec!["FLIGHT_4", "FLIGHT_5"], unassigned);
}

#[test]
fn test_unassigned_flight_touches_no_gate() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "FLIGHT_1", 800, 1000);
    add_flight(&mut flights, "FLIGHT_2", 900, 950);

    let mut schedule = Schedule::new(flights, config(20, Some(1)));
    schedule.assign().unwrap();

    assert_eq!(1, schedule.gates.len());
    assert_eq!(Assigned(GateId(1)), schedule.flights[0].gate);
    assert_eq!(Unassigned, schedule.flights[1].gate);
    assert_eq!(1, schedule.gates[0].flights_hosted());
    assert_eq!(1020, schedule.gates[0].next_available.0);
}

#[test]
fn test_processing_continues_after_overflow() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "FLIGHT_1", 800, 900);
    add_flight(&mut flights, "FLIGHT_2", 810, 900);
    add_flight(&mut flights, "FLIGHT_3", 920, 1000);

    let mut schedule = Schedule::new(flights, config(20, Some(1)));
    schedule.assign().unwrap();

    assert_eq!(Some(GateId(1)), gate_of(&schedule, "FLIGHT_1"));
    assert_eq!(None, gate_of(&schedule, "FLIGHT_2"));
    assert_eq!(Some(GateId(1)), gate_of(&schedule, "FLIGHT_3"));
}

#[test]
fn test_limit_above_demand_changes_nothing() {
    let mut flights = Vec::new();
    add_flight(&mut flights, "FLIGHT_1", 800, 900);
    add_flight(&mut flights, "FLIGHT_2", 850, 950);

    let mut limited = Schedule::new(flights.clone(), config(20, Some(10)));
    limited.assign().unwrap();
    let mut unlimited = Schedule::new(flights, config(20, None));
    unlimited.assign().unwrap();

    assert_eq!(unlimited.gates, limited.gates);
    assert_eq!(0, limited.unassigned().count());
}
