use crate::error::ScheduleError;
use crate::flight::{Flight, FlightId, GateAssignment};
use crate::gate::{Gate, GateId};
use crate::schedule::Schedule;
use crate::time::Time;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub flights: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub gates_opened: usize,
    pub peak_demand: usize,
    pub minimal: bool,
    pub servicing_buffer: u64,
    pub max_gates: Option<usize>,
}

impl Summary {
    pub fn of(schedule: &Schedule) -> Summary {
        Summary {
            flights: schedule.flights.len(),
            assigned: schedule.assigned_count(),
            unassigned: schedule.unassigned().count(),
            gates_opened: schedule.gates.len(),
            peak_demand: schedule.peak_demand(),
            minimal: schedule.is_minimal(),
            servicing_buffer: schedule.config.servicing_buffer,
            max_gates: schedule.config.max_gates.map(|n| n.get()),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Gates opened: {} (peak demand {})", self.gates_opened, self.peak_demand)?;
        writeln!(
            f,
            "Flights: {} assigned, {} unassigned of {}",
            self.assigned, self.unassigned, self.flights
        )?;
        let limit = self
            .max_gates
            .map_or("unlimited".to_string(), |n| n.to_string());
        write!(
            f,
            "Servicing buffer: {} min, gate limit: {}",
            self.servicing_buffer, limit
        )
    }
}

/// Where an unassigned flight would fit if it arrived later.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub flight: FlightId,
    pub arrival: Time,
    pub suggested_arrival: Option<Time>,
    pub delay_minutes: Option<u64>,
    pub gate: Option<GateId>,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.suggested_arrival, self.delay_minutes, self.gate) {
            (Some(at), Some(delay), Some(gate)) => write!(
                f,
                "{}: delay by {} min to arrive {} at {}, or divert",
                self.flight, delay, at, gate
            ),
            _ => write!(f, "{}: divert, no opened gate can take it", self.flight),
        }
    }
}

pub fn recommendations(schedule: &Schedule) -> Vec<Recommendation> {
    let buffer = schedule.config.servicing_buffer;
    schedule
        .unassigned()
        .map(|flight| {
            let best = schedule
                .gates
                .iter()
                .map(|g| (g.earliest_fit(flight.arrival, flight.turnaround(), buffer), g.id))
                .min();
            Recommendation {
                flight: flight.id.clone(),
                arrival: flight.arrival,
                suggested_arrival: best.map(|(at, _)| at),
                delay_minutes: best.map(|(at, _)| at - flight.arrival),
                gate: best.map(|(_, id)| id),
            }
        })
        .collect()
}

#[derive(Tabled)]
struct FlightRow {
    #[tabled(rename = "Flight")]
    flight: String,
    #[tabled(rename = "Arrival")]
    arrival: String,
    #[tabled(rename = "Departure")]
    departure: String,
    #[tabled(rename = "Gate")]
    gate: String,
}

impl From<&Flight> for FlightRow {
    fn from(flight: &Flight) -> Self {
        let gate = match flight.gate {
            GateAssignment::Unassigned => flight.gate.to_string().red().bold().to_string(),
            other => other.to_string(),
        };
        FlightRow {
            flight: flight.id.to_string(),
            arrival: flight.arrival.to_string(),
            departure: flight.departure.to_string(),
            gate,
        }
    }
}

#[derive(Tabled)]
struct GateRow {
    #[tabled(rename = "Gate")]
    gate: String,
    #[tabled(rename = "Flights")]
    flights: usize,
    #[tabled(rename = "Busy (min)")]
    busy: u64,
    #[tabled(rename = "First arrival")]
    first_arrival: String,
    #[tabled(rename = "Free from")]
    free_from: String,
}

impl From<&Gate> for GateRow {
    fn from(gate: &Gate) -> Self {
        GateRow {
            gate: gate.id.to_string(),
            flights: gate.flights_hosted(),
            busy: gate.busy_minutes(),
            first_arrival: gate
                .occupancy
                .first()
                .map_or("-".to_string(), |(arr, _)| arr.to_string()),
            free_from: gate.next_available.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

pub fn flight_table<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> String {
    styled(Table::new(flights.into_iter().map(FlightRow::from)))
}

pub fn gate_table(gates: &[Gate]) -> String {
    styled(Table::new(gates.iter().map(GateRow::from)))
}

/// Post-departure servicing periods of every gate.
pub fn servicing_report(schedule: &Schedule) -> String {
    let buffer = schedule.config.servicing_buffer;
    schedule
        .gates
        .iter()
        .map(|gate| {
            let windows: String = gate
                .servicing_windows(buffer)
                .iter()
                .map(|(from, to)| format!("  {} - {} (after flight departure)\n", from, to))
                .collect();
            format!("{} servicing periods:\n{}", gate.id, windows)
        })
        .collect()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    flights: &'a [Flight],
    gates: &'a [Gate],
    recommendations: Vec<Recommendation>,
}

pub fn to_json(schedule: &Schedule) -> Result<String, ScheduleError> {
    let report = JsonReport {
        summary: Summary::of(schedule),
        flights: &schedule.flights,
        gates: &schedule.gates,
        recommendations: recommendations(schedule),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::AssignConfig;
    use std::num::NonZeroUsize;

    fn limited(flights: &[(&str, u64, u64)], limit: usize) -> Schedule {
        let config = AssignConfig {
            max_gates: NonZeroUsize::new(limit),
            ..AssignConfig::default()
        };
        let flights = flights
            .iter()
            .map(|(id, arr, dep)| Flight::new(*id, Time(*arr), Time(*dep)))
            .collect();
        let mut schedule = Schedule::new(flights, config);
        schedule.assign().unwrap();
        schedule
    }

    #[test]
    fn test_summary_counts() {
        let schedule = limited(&[("A", 800, 900), ("B", 810, 900), ("C", 820, 900)], 2);
        let summary = Summary::of(&schedule);

        assert_eq!(3, summary.flights);
        assert_eq!(2, summary.assigned);
        assert_eq!(1, summary.unassigned);
        assert_eq!(2, summary.gates_opened);
        assert_eq!(3, summary.peak_demand);
        assert!(!summary.minimal);
        assert_eq!(Some(2), summary.max_gates);
    }

    #[test]
    fn test_recommendation_suggests_earliest_gate() {
        let schedule = limited(&[("A", 800, 900), ("B", 810, 950), ("C", 820, 880)], 2);
        let recs = recommendations(&schedule);

        assert_eq!(1, recs.len());
        assert_eq!("C", &*recs[0].flight);
        // gate 1 frees at 920
        assert_eq!(Some(Time(920)), recs[0].suggested_arrival);
        assert_eq!(Some(100), recs[0].delay_minutes);
        assert_eq!(Some(GateId(1)), recs[0].gate);
        assert!(recs[0].to_string().contains("delay by 100 min"));
    }

    #[test]
    fn test_servicing_report_lists_every_window() {
        let schedule = limited(&[("A", 500, 630), ("B", 700, 760)], 1);
        let report = servicing_report(&schedule);

        assert!(report.contains("Gate 1 servicing periods:"));
        assert!(report.contains("DAY1 10:30 - DAY1 10:50"));
        assert!(report.contains("DAY1 12:40 - DAY1 13:00"));
    }

    #[test]
    fn test_servicing_report_exact_layout() {
        let schedule = limited(&[("A", 500, 630), ("B", 700, 760), ("C", 710, 800)], 2);
        let expected = "\
Gate 1 servicing periods:
  DAY1 10:30 - DAY1 10:50 (after flight departure)
  DAY1 12:40 - DAY1 13:00 (after flight departure)
Gate 2 servicing periods:
  DAY1 13:20 - DAY1 13:40 (after flight departure)
";
        assert_eq!(expected, servicing_report(&schedule));
        assert!(servicing_report(&limited(&[], 1)).is_empty());
    }

    #[test]
    fn test_json_report_shape() {
        let schedule = limited(&[("A", 800, 900), ("B", 810, 900)], 1);
        let json: serde_json::Value = serde_json::from_str(&to_json(&schedule).unwrap()).unwrap();

        assert_eq!(1, json["summary"]["gates_opened"]);
        assert_eq!("assigned", json["flights"][0]["gate"]["status"]);
        assert_eq!(1, json["flights"][0]["gate"]["gate"]);
        assert_eq!("unassigned", json["flights"][1]["gate"]["status"]);
        assert_eq!("B", json["recommendations"][0]["flight"]);
    }

    #[test]
    fn test_tables_render_rows() {
        let schedule = limited(&[("A", 800, 900), ("B", 810, 900)], 1);

        let flights = flight_table(&schedule.flights);
        assert!(flights.contains("Flight"));
        assert!(flights.contains("Gate 1"));
        assert!(flights.contains("UNASSIGNED"));

        let gates = gate_table(&schedule.gates);
        assert!(gates.contains("Busy (min)"));
        assert!(gates.contains("DAY1 15:20"));
    }
}
