use crate::error::ScheduleError;
use crate::flight::Flight;
use crate::gate::GateId;
use crate::report::Summary;
use crate::schedule::{Schedule, Selection};
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing_subscriber::EnvFilter;

mod dataset;
mod error;
mod flight;
mod gate;
mod input;
mod report;
mod schedule;
mod time;

#[derive(Parser)]
#[command(version, about = "Assign flights to the fewest gates with a servicing buffer")]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Use built-in reference dataset N instead of the scenario file
    #[arg(short, long, value_name = "N")]
    dataset: Option<usize>,

    /// Servicing minutes after each departure before a gate is reusable
    #[arg(short, long, value_name = "MINUTES")]
    buffer: Option<u64>,

    /// Never open more than N gates
    #[arg(short, long, value_name = "N")]
    max_gates: Option<NonZeroUsize>,

    /// How the earliest free gate is found
    #[arg(long, value_enum, default_value_t = Selection::Heap)]
    selection: Selection,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Open the gate tower shell after the first run
    #[arg(short, long)]
    interactive: bool,

    /// List the built-in datasets and exit
    #[arg(long)]
    list_datasets: bool,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

type Shell = Editor<CompleteHelper, DefaultHistory>;

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn enable_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn paginate(content: String) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(e) => {
            tracing::warn!("No pager available: {}", e);
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn show(content: String, rows: usize) {
    if rows > 20 {
        paginate(content);
    } else {
        println!("{}", content);
    }
}

/// Builds the first batch and describes where it came from.
fn load(args: &Args) -> Result<(Schedule, String), ScheduleError> {
    let (mut schedule, source) = match args.dataset {
        Some(number) => {
            let set = dataset::builtin(number)?;
            let source = format!("dataset {}: {}", number, set.name);
            (Schedule::new(set.flights, Default::default()), source)
        }
        None => (
            Schedule::load_from_file(&args.scenario)?,
            args.scenario.display().to_string(),
        ),
    };

    let mut config = schedule.config;
    if let Some(buffer) = args.buffer {
        config.servicing_buffer = buffer;
    }
    if args.max_gates.is_some() {
        config.max_gates = args.max_gates;
    }
    config.selection = args.selection;
    schedule.set_config(config);
    Ok((schedule, source))
}

fn print_results(schedule: &Schedule) {
    println!("{}", Summary::of(schedule));
    if schedule.is_minimal() {
        println!("Minimum gates required: {}", schedule.gates.len());
    }

    println!("\n--- Flight Assignments ---");
    show(report::flight_table(&schedule.flights), schedule.flights.len());

    println!("\n--- Gate Utilization ---");
    println!("{}", report::gate_table(&schedule.gates));

    println!("\n--- Gate Servicing Periods ---");
    print!("{}", report::servicing_report(schedule));

    print_recommendations(schedule);
}

fn print_recommendations(schedule: &Schedule) {
    let recs = report::recommendations(schedule);
    if !recs.is_empty() {
        println!("\n--- Unassigned Flights ---");
        recs.iter().for_each(|r| println!("  {}", r));
    }
}

fn confirm(rl: &mut Shell, prompt: &str) -> bool {
    matches!(rl.readline(prompt), Ok(answer) if answer.trim().eq_ignore_ascii_case("y"))
}

fn warn_if_stale(schedule: &Schedule) {
    if schedule.is_stale() {
        println!("Schedule changed since the last run. Use 'assign' to refresh.");
    }
}

fn add_flight(rl: &mut Shell, schedule: &mut Schedule, parts: &[&str]) -> Result<(), ScheduleError> {
    input::ensure_room(schedule.flights.len())?;
    let (flight, turnaround) = input::parse_flight(parts[0], parts[1], parts[2])?;
    if let Some(warning) = turnaround.warning() {
        println!("Warning: {}", warning);
        if turnaround.needs_confirmation() && !confirm(rl, "Continue? (y/n): ") {
            println!("Flight {} discarded.", flight.id);
            return Ok(());
        }
    }
    println!("Flight {} added successfully.", flight.id);
    schedule.add_flight(flight);
    Ok(())
}

/// Returns `false` once the operator asks to leave.
fn run_command(rl: &mut Shell, schedule: &mut Schedule, parts: &[&str]) -> Result<bool, ScheduleError> {
    match parts[0] {
        "ls" => {
            warn_if_stale(schedule);
            let sub = parts.get(1).copied().unwrap_or("a");
            let filtered: Vec<&Flight> = schedule
                .flights
                .iter()
                .filter(|f| match sub {
                    "u" | "unassigned" => f.gate.is_unassigned(),
                    "s" | "assigned" => f.gate.gate().is_some(),
                    _ => true, // 'ls' or 'ls a'
                })
                .collect();
            if filtered.is_empty() {
                println!("No matching flights found.");
            } else {
                show(report::flight_table(filtered.iter().copied()), filtered.len());
            }
        }
        "gates" => {
            warn_if_stale(schedule);
            println!("{}", report::gate_table(&schedule.gates));
        }
        "gate" => match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => match schedule.gate(GateId(n)) {
                Some(gate) => {
                    warn_if_stale(schedule);
                    let hosted = schedule.flights.iter().filter(|f| f.gate.gate() == Some(gate.id));
                    println!("{}", report::flight_table(hosted));
                    for (from, to) in gate.servicing_windows(schedule.config.servicing_buffer) {
                        println!("  servicing {} - {}", from, to);
                    }
                }
                None => println!("Gate {} was not opened.", n),
            },
            None => println!("Usage: gate <number>"),
        },
        "summary" => {
            warn_if_stale(schedule);
            println!("{}", Summary::of(schedule));
            print_recommendations(schedule);
        }
        "datasets" => dataset::names().for_each(|(n, name)| println!("  {}. {}", n, name)),
        "dataset" => match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => {
                let set = dataset::builtin(n)?;
                println!("Loaded dataset {}: {}", n, set.name);
                schedule.replace_flights(set.flights);
            }
            None => println!("Usage: dataset <1-{}>", dataset::count()),
        },
        "load" => match parts.get(1) {
            Some(path) => {
                let loaded = Schedule::load_from_file(path)?;
                let mut config = loaded.config;
                config.selection = schedule.config.selection;
                schedule.replace_flights(loaded.flights);
                schedule.set_config(config);
                println!("Loaded {} flights from {}", schedule.flights.len(), path);
            }
            None => println!("Usage: load <file>"),
        },
        "add" => {
            if parts.len() == 4 {
                add_flight(rl, schedule, &parts[1..])?;
            } else {
                println!("Usage: add <flight> <arrival HHMM> <departure HHMM>");
            }
        }
        "clear" => {
            schedule.replace_flights(vec![]);
            println!("All flights removed.");
        }
        "buffer" => match parts.get(1).and_then(|m| m.parse::<u64>().ok()) {
            Some(minutes) => {
                let mut config = schedule.config;
                config.servicing_buffer = minutes;
                schedule.set_config(config);
                println!("Servicing buffer set to {} minutes.", minutes);
            }
            None => println!("Usage: buffer <minutes>"),
        },
        "limit" => match parts.get(1).copied() {
            Some("none") => {
                let mut config = schedule.config;
                config.max_gates = None;
                schedule.set_config(config);
                println!("Gate limit removed.");
            }
            Some(n) => match n.parse::<NonZeroUsize>() {
                Ok(limit) => {
                    let mut config = schedule.config;
                    config.max_gates = Some(limit);
                    schedule.set_config(config);
                    println!("Gate limit set to {}.", limit);
                }
                Err(_) => println!("Gate limit must be a positive number or 'none'."),
            },
            None => println!("Usage: limit <n|none>"),
        },
        "assign" => {
            if schedule.flights.is_empty() {
                return Err(ScheduleError::NoFlights);
            }
            schedule.assign()?;
            println!("{}", Summary::of(schedule));
            print_recommendations(schedule);
        }
        "help" | "?" => {
            println!("\nAvailable Commands:");
            println!("  ls [filter]          - List flights: a - all, s - assigned, u - unassigned");
            println!("  gates                - Show gate utilization");
            println!("  gate <n>             - Show flights and servicing periods of gate <n>");
            println!("  summary              - Show run summary and recommendations");
            println!("  datasets             - List built-in datasets");
            println!("  dataset <n>          - Replace flights with built-in dataset <n>");
            println!("  load <file>          - Replace flights and settings from a JSON scenario");
            println!("  add <id> <arr> <dep> - Add a flight, times as HHMM or HH:MM");
            println!("  clear                - Remove all flights");
            println!("  buffer <m>           - Set servicing buffer to <m> minutes");
            println!("  limit <n|none>       - Cap the number of gates, or remove the cap");
            println!("  assign               - Run gate assignment on the current flights");
            println!("  help / ?             - Show this help menu");
            println!("  exit / quit          - Leave the tower\n");
        }
        "exit" | "quit" => return Ok(false),
        other => println!("Unknown command: {}", other),
    }
    Ok(true)
}

fn shell(schedule: &mut Schedule) -> Result<(), Box<dyn std::error::Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "ls", "gates", "gate", "summary", "datasets", "dataset", "load", "add", "clear",
            "buffer", "limit", "assign", "help", "exit",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    };

    let mut rl: Shell = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match run_command(&mut rl, schedule, &parts) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    enable_tracing(args.verbose);

    if args.list_datasets {
        dataset::names().for_each(|(n, name)| println!("{}. {}", n, name));
        return Ok(());
    }

    let (mut schedule, source) = load(&args)?;
    if schedule.flights.is_empty() && !args.interactive {
        return Err(ScheduleError::NoFlights.into());
    }

    if args.json {
        schedule.assign()?;
        println!("{}", report::to_json(&schedule)?);
    } else {
        println!("Tower online. Loaded flights from {}", source);
        if !schedule.flights.is_empty() {
            println!("Processing {} flights...\n", schedule.flights.len());
            schedule.assign()?;
            print_results(&schedule);
        }
    }

    if args.interactive {
        shell(&mut schedule)?;
    }
    Ok(())
}
