use airline::codec::{self, Format};
use airline::logging::init_logging;
use airline::{AircraftVariant, CargoAircraft, Fleet, FleetError, PassengerPlane, Plane, PlaneKind};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tabled::Tabled;
use tabled::settings::Style;

#[derive(Parser)]
struct Args {
    /// Fleet file to load at startup
    #[arg(short, long, value_name = "FILE")]
    fleet: Option<PathBuf>,

    /// File format, inferred from the extension when omitted
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct PlaneRow {
    #[tabled(rename = "#")]
    index: usize,
    kind: PlaneKind,
    variant: AircraftVariant,
    number: String,
    payload: String,
    #[tabled(rename = "empty kg")]
    empty_weight: String,
    #[tabled(rename = "takeoff kg")]
    takeoff_weight: String,
}

impl PlaneRow {
    fn new(index: usize, plane: &Plane) -> PlaneRow {
        let payload = match plane {
            Plane::Passenger(p) => format!("{} pax", p.passenger_count),
            Plane::Cargo(c) => format!("{} kg", c.cargo_weight),
        };
        PlaneRow {
            index,
            kind: plane.kind(),
            variant: plane.variant(),
            number: plane.number().to_string(),
            payload,
            empty_weight: fmt_weight(plane.empty_weight()),
            takeoff_weight: fmt_weight(plane.takeoff_weight()),
        }
    }
}

fn fmt_weight(weight: Result<f64, FleetError>) -> String {
    match weight {
        Ok(kg) => kg.to_string(),
        Err(_) => "?".to_string(),
    }
}

fn paginate(content: &str) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = pager else {
        println!("{}", content);
        return;
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

fn resolve_format(path: &Path, explicit: Option<&str>) -> Result<Format, String> {
    match explicit {
        Some(name) => name.parse(),
        None => Format::from_path(path).ok_or_else(|| {
            format!("cannot infer format of {}, pass xml or json", path.display())
        }),
    }
}

fn parse_plane(parts: &[&str]) -> Result<Plane, String> {
    let [kind, variant, number, payload] = parts else {
        return Err("Usage: add <p|c> <variant> <number> <passengers|cargo_kg>".to_string());
    };
    let variant = variant.parse::<AircraftVariant>().map_err(|e| e.to_string())?;
    match *kind {
        "p" | "passenger" => {
            let count = payload
                .parse::<u32>()
                .map_err(|_| format!("invalid passenger count '{}'", payload))?;
            Ok(PassengerPlane::new(variant, *number, count).into())
        }
        "c" | "cargo" => {
            let weight = payload
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or_else(|| format!("invalid cargo weight '{}'", payload))?;
            Ok(CargoAircraft::new(variant, *number, weight).into())
        }
        other => Err(format!("unknown plane kind '{}', expected p or c", other)),
    }
}

fn report(err: impl std::fmt::Display) {
    println!("{} {}", "error:".red().bold(), err);
}

fn list(fleet: &Fleet, filter: &str) {
    let rows: Vec<PlaneRow> = fleet
        .planes()
        .iter()
        .enumerate()
        .filter(|(_, p)| match filter {
            "p" | "passenger" => p.kind() == PlaneKind::Passenger,
            "c" | "cargo" => p.kind() == PlaneKind::Cargo,
            _ => true, // 'ls' or 'ls a'
        })
        .map(|(i, p)| PlaneRow::new(i + 1, p))
        .collect();

    if rows.is_empty() {
        println!("No matching planes found.");
        return;
    }

    let mut table = tabled::Table::new(&rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(&table.to_string());
    } else {
        println!("{}", table);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut fleet = match &args.fleet {
        Some(path) => {
            let format = match args.format {
                Some(format) => format,
                None => resolve_format(path, None)?,
            };
            let fleet = codec::load(path, format)?;
            println!("Loaded {} planes from {}", fleet.len(), path.display());
            fleet
        }
        None => Fleet::new(),
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["add", "ls", "sort", "avg", "total", "save", "load", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "add" => match parse_plane(&parts[1..]) {
                        Ok(plane) => {
                            let number = plane.number().to_string();
                            match fleet.add(plane) {
                                Ok(()) => println!("Added {}.", number),
                                Err(e) => report(e),
                            }
                        }
                        Err(msg) => report(msg),
                    },
                    "ls" => list(&fleet, parts.get(1).copied().unwrap_or("a")),
                    "sort" => match fleet.sort_by_weight() {
                        Ok(()) => println!("Fleet sorted by takeoff weight."),
                        Err(e) => report(e),
                    },
                    "avg" => match fleet.average_weight() {
                        Ok(Some(avg)) => println!("Average takeoff weight: {:.1} kg", avg),
                        Ok(None) => println!("Fleet is empty."),
                        Err(e) => report(e),
                    },
                    "total" => match fleet.total_weight() {
                        Ok(total) => println!("Total takeoff weight: {:.1} kg", total),
                        Err(e) => report(e),
                    },
                    cmd @ ("save" | "load") => {
                        let Some(path) = parts.get(1).map(PathBuf::from) else {
                            println!("Usage: {} <file> [xml|json]", cmd);
                            continue;
                        };
                        let format = match resolve_format(&path, parts.get(2).copied()) {
                            Ok(format) => format,
                            Err(msg) => {
                                report(msg);
                                continue;
                            }
                        };
                        if cmd == "save" {
                            match codec::save(&fleet, &path, format) {
                                Ok(()) => println!("Saved {} planes to {}.", fleet.len(), path.display()),
                                Err(e) => report(e),
                            }
                        } else {
                            match codec::load(&path, format) {
                                Ok(loaded) => {
                                    fleet = loaded;
                                    println!("Loaded {} planes from {}.", fleet.len(), path.display());
                                }
                                Err(e) => report(e),
                            }
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  add p <variant> <number> <pax>  - Add a passenger plane");
                        println!("  add c <variant> <number> <kg>   - Add a cargo aircraft");
                        println!("  ls [p|c]                        - List all planes, or only passenger / cargo ones");
                        println!("  sort                            - Sort the fleet by takeoff weight");
                        println!("  avg                             - Show the average takeoff weight");
                        println!("  total                           - Show the total takeoff weight");
                        println!("  save <file> [xml|json]          - Save the fleet, format inferred from the extension");
                        println!("  load <file> [xml|json]          - Replace the fleet with the file contents");
                        println!("  help / ?                        - Show this help menu");
                        println!("  exit / quit                     - Exit\n");
                        println!("Variants: {}", AircraftVariant::ALL.map(|v| v.name()).join(", "));
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
