use std::{io::Read, process::ExitCode};

use enfa2dfa::prelude::*;

use owo_colors::OwoColorize;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("enfa-convert")
        .about("reads an epsilon NFA as a transition table and converts it into a minimal DFA")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("file containing the transition table, stdin is read if absent"),
        )
        .arg(
            Arg::new("stage")
                .short('s')
                .long("stage")
                .value_parser(["all", "closures", "nfa", "dfa", "minimal"])
                .default_value("all")
                .help("which stage of the conversion to print"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn read_input(matches: &ArgMatches) -> std::io::Result<String> {
    match matches.get_one::<String>("input") {
        Some(path) => {
            debug!("reading transition table from {path}");
            std::fs::read_to_string(path)
        }
        None => {
            debug!("reading transition table from stdin");
            let mut input = String::new();
            std::io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Renders the stages selected by `stage` as pairs of heading and table, in pipeline order.
fn render_stages(
    enfa: &EpsilonNfa,
    conversion: &Conversion,
    stage: &str,
) -> Vec<(&'static str, String)> {
    let all = stage == "all";
    let mut out = vec![];
    if all {
        out.push(("Input automaton", enfa.show()));
    }
    if all || stage == "closures" {
        out.push(("Epsilon closures", conversion.nfa().closure_table()));
    }
    if all || stage == "nfa" {
        out.push(("Without epsilon transitions", conversion.nfa().show()));
    }
    if all || stage == "dfa" {
        out.push(("Subset construction", conversion.dfa().show()));
    }
    if all || stage == "minimal" {
        out.push(("Minimized", conversion.minimal().show()));
    }
    out
}

/// Parses `input`, converts it and renders the selected stages.
fn run(input: &str, stage: &str) -> Result<Vec<(&'static str, String)>, TableParseError> {
    let enfa = parse_table(input)?;

    let start = std::time::Instant::now();
    let conversion = enfa.convert();
    info!(
        "conversion of {} states took {}µs",
        enfa.states().len(),
        start.elapsed().as_micros()
    );

    Ok(render_stages(&enfa, &conversion, stage))
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let input = match read_input(&matches) {
        Ok(input) => input,
        Err(e) => {
            error!("could not read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stage = matches
        .get_one::<String>("stage")
        .map(String::as_str)
        .unwrap_or("all");

    match run(&input, stage) {
        Ok(stages) => {
            for (title, table) in stages {
                println!("{}", title.bold());
                println!("{table}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("invalid automaton: {e}");
            ExitCode::FAILURE
        }
    }
}
