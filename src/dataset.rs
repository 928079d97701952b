use crate::error::ScheduleError;
use crate::flight::Flight;
use crate::time::Time;

pub struct Dataset {
    pub name: &'static str,
    pub flights: Vec<Flight>,
}

static REFERENCE: [(&str, &[(&str, u64, u64)]); 5] = [
    (
        "Provided dataset (20 flights)",
        &[
            ("EWA101", 500, 630),
            ("EWA102", 530, 700),
            ("EWA103", 600, 730),
            ("EWA104", 645, 830),
            ("EWA105", 700, 900),
            ("EWA106", 730, 930),
            ("EWA107", 800, 1000),
            ("EWA108", 900, 1030),
            ("EWA109", 945, 1130),
            ("EWA110", 1000, 1200),
            ("EWA111", 1100, 1230),
            ("EWA112", 1145, 1315),
            ("EWA113", 1200, 1345),
            ("EWA114", 1300, 1430),
            ("EWA115", 1400, 1530),
            ("EWA116", 1430, 1600),
            ("EWA117", 1500, 1700),
            ("EWA118", 1600, 1745),
            ("EWA119", 1700, 1900),
            ("EWA120", 1800, 2000),
        ],
    ),
    (
        "Non-overlapping flights (3 flights, optimal: 1 gate)",
        &[
            ("EWB201", 800, 930),
            ("EWB202", 1000, 1130),
            ("EWB203", 1200, 1330),
        ],
    ),
    (
        "All overlapping (4 flights, optimal: 4 gates)",
        &[
            ("EWC301", 900, 1030),
            ("EWC302", 915, 1045),
            ("EWC303", 930, 1100),
            ("EWC304", 945, 1115),
        ],
    ),
    (
        "Mixed with servicing reuse (5 flights, optimal: 2 gates)",
        &[
            ("EWD401", 800, 900),
            ("EWD402", 920, 1020),
            ("EWD403", 800, 1000),
            ("EWD404", 1020, 1120),
            ("EWD405", 1140, 1240),
        ],
    ),
    (
        "Realistic large schedule (15 flights)",
        &[
            ("EWE501", 600, 720),
            ("EWE502", 630, 750),
            ("EWE503", 700, 820),
            ("EWE504", 730, 850),
            ("EWE505", 800, 920),
            ("EWE506", 830, 950),
            ("EWE507", 900, 1020),
            ("EWE508", 930, 1050),
            ("EWE509", 1000, 1120),
            ("EWE510", 1030, 1150),
            ("EWE511", 1100, 1220),
            ("EWE512", 1130, 1250),
            ("EWE513", 1200, 1320),
            ("EWE514", 1230, 1350),
            ("EWE515", 1300, 1420),
        ],
    ),
];

pub fn count() -> usize {
    REFERENCE.len()
}

pub fn names() -> impl Iterator<Item = (usize, &'static str)> {
    REFERENCE
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (i + 1, *name))
}

/// Built-in reference schedule, numbered from 1.
pub fn builtin(number: usize) -> Result<Dataset, ScheduleError> {
    let &(name, rows) = number
        .checked_sub(1)
        .and_then(|i| REFERENCE.get(i))
        .ok_or(ScheduleError::UnknownDataset(number, count()))?;

    Ok(Dataset {
        name,
        flights: rows
            .iter()
            .map(|(id, arr, dep)| Flight::new(*id, Time(*arr), Time(*dep)))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{AssignConfig, Schedule};

    fn gates_needed(number: usize) -> usize {
        let mut schedule = Schedule::new(builtin(number).unwrap().flights, AssignConfig::default());
        schedule.assign().unwrap();
        assert!(schedule.is_minimal());
        schedule.gates.len()
    }

    #[test]
    fn test_reference_gate_counts() {
        assert_eq!(4, gates_needed(1));
        assert_eq!(1, gates_needed(2));
        assert_eq!(4, gates_needed(3));
        assert_eq!(2, gates_needed(4));
        assert_eq!(4, gates_needed(5));
    }

    #[test]
    fn test_unknown_dataset() {
        assert!(matches!(builtin(0), Err(ScheduleError::UnknownDataset(0, 5))));
        assert!(matches!(builtin(6), Err(ScheduleError::UnknownDataset(6, 5))));
    }

    #[test]
    fn test_names_are_numbered_from_one() {
        let listed: Vec<usize> = names().map(|(n, _)| n).collect();
        assert_eq!(vec![1, 2, 3, 4, 5], listed);
    }

    #[test]
    fn test_capacity_limit_on_overlapping_set() {
        let config = AssignConfig {
            max_gates: std::num::NonZeroUsize::new(3),
            ..AssignConfig::default()
        };
        let mut flights = builtin(3).unwrap().flights;
        flights.push(Flight::new("EWC305", Time(950), Time(1100)));
        let mut schedule = Schedule::new(flights, config);
        schedule.assign().unwrap();

        assert_eq!(3, schedule.gates.len());
        assert_eq!(3, schedule.assigned_count());
        assert_eq!(2, schedule.unassigned().count());
    }
}
