use crate::flight::Flight;

/// Largest number of `[arrival, departure + buffer)` windows covering one
/// instant. No valid assignment can use fewer gates.
pub fn peak_demand(flights: &[Flight], servicing_buffer: u64) -> usize {
    // (instant, delta); at equal instants -1 sorts before +1 so a gate freed
    // exactly at an arrival is counted as reusable
    let mut events: Vec<(u64, i64)> = flights
        .iter()
        .flat_map(|f| [(f.arrival.0, 1), (f.ready_at(servicing_buffer).0, -1)])
        .collect();
    events.sort_unstable();

    let mut depth: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        depth += delta;
        peak = peak.max(depth);
    }
    peak as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Time;

    fn flight(arr: u64, dep: u64) -> Flight {
        Flight::new("F", Time(arr), Time(dep))
    }

    #[test]
    fn test_touching_windows_do_not_stack() {
        let flights = vec![flight(800, 900), flight(920, 1020)];
        assert_eq!(1, peak_demand(&flights, 20));
        assert_eq!(2, peak_demand(&flights, 21));
    }

    #[test]
    fn test_nested_windows() {
        let flights = vec![flight(0, 100), flight(10, 20), flight(30, 40), flight(35, 38)];
        assert_eq!(3, peak_demand(&flights, 0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(0, peak_demand(&[], 20));
    }
}
