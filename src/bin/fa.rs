use std::process::ExitCode;

use finite_automata::prelude::*;
use itertools::Itertools;
use owo_colors::OwoColorize;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgMatches, Command};

type Result<T> = std::result::Result<T, AutomatonError<char>>;

fn words_arg() -> Arg {
    Arg::new("words")
        .num_args(0..)
        .allow_hyphen_values(true)
        .help("words to evaluate, if none are given they are read from stdin until EOF or -1")
}

fn cli() -> clap::Command {
    Command::new("fa")
    .about("Runs small example finite automata on words")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("dfa")
        .about("evaluates words on a DFA that accepts words over 0 and 1 containing 011")
        .arg(words_arg())
    )
    .subcommand(
        Command::new("enfa")
        .about("prints the epsilon closures of an ε-NFA over a, b and c and evaluates words on it")
        .arg(words_arg())
    )
    .subcommand(
        Command::new("nfa2dfa")
        .about("applies the subset construction to an NFA accepting words over 0 and 1 that contain 0x0")
        .arg(
            Arg::new("max-states")
            .long("max-states")
            .value_parser(clap::value_parser!(usize))
            .help("aborts the construction once more composite states are discovered")
        )
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
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// The words given on the command line, or otherwise the whitespace separated words on stdin up to
/// the first `-1`.
fn words(matches: &ArgMatches) -> Box<dyn Iterator<Item = String> + '_> {
    match matches.get_many::<String>("words") {
        Some(words) => Box::new(words.cloned()),
        None => {
            debug!("reading words from stdin");
            Box::new(
                std::io::stdin()
                    .lines()
                    .map_while(|line| line.ok())
                    .flat_map(|line| line.split_whitespace().map(str::to_string).collect_vec())
                    .take_while(|word| word != "-1"),
            )
        }
    }
}

fn report(verdict: Result<bool>) {
    match verdict {
        Ok(true) => println!("Status: {}\n", "Accepted".green()),
        Ok(false) => println!("Status: {}\n", "Rejected".red()),
        Err(e) => println!("{} {e}\n", "Error:".red().bold()),
    }
}

fn contains_011() -> Result<DFA<char>> {
    DFA::builder()
        .with_states(4)
        .with_alphabet(['0', '1'])
        .with_initial(0)
        .with_accepting([3])
        .with_edges([
            (0, '0', 1),
            (0, '1', 0),
            (1, '0', 1),
            (1, '1', 2),
            (2, '0', 1),
            (2, '1', 3),
            (3, '0', 3),
            (3, '1', 3),
        ])
        .into_dfa()
}

fn silent_abc() -> Result<ENFA<char>> {
    ENFA::builder()
        .with_states(3)
        .with_alphabet(['a', 'b', 'c'])
        .with_epsilon('ε')
        .with_initial(0)
        .with_accepting([2])
        .with_edges([
            (0, 'a', 0),
            (0, 'b', 1),
            (0, 'c', 2),
            (1, 'ε', 0),
            (1, 'a', 1),
            (1, 'b', 2),
            (2, 'ε', 1),
            (2, 'a', 2),
            (2, 'c', 1),
        ])
        .into_enfa()
}

fn zero_any_zero() -> Result<NFA<char>> {
    NFA::builder()
        .with_states(4)
        .with_alphabet(['0', '1'])
        .with_initial(0)
        .with_accepting([3])
        .with_edges([
            (0, '0', 0),
            (0, '0', 1),
            (0, '1', 0),
            (1, '0', 2),
            (1, '1', 2),
            (2, '0', 3),
            (3, '0', 3),
            (3, '1', 3),
        ])
        .into_nfa()
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("dfa", sub_matches)) => {
            let dfa = contains_011()?;
            println!("{}\n", dfa.transition_table());
            for word in words(sub_matches) {
                trace!("evaluating {word}");
                report(dfa.run(word.as_str()).map(|run| {
                    println!("Transitions:{}", run.show());
                    run.is_accepting()
                }));
            }
        }
        Some(("enfa", sub_matches)) => {
            let enfa = silent_abc()?;
            println!("{}\n", enfa.transition_table());
            println!("{}\n", enfa.closures().show());
            for word in words(sub_matches) {
                trace!("evaluating {word}");
                report(enfa.evaluate(word.as_str()));
            }
        }
        Some(("nfa2dfa", sub_matches)) => {
            let nfa = zero_any_zero()?;
            println!("NFA:\n{}\n", nfa.transition_table());

            let options = SubsetOptions {
                max_states: sub_matches.get_one::<usize>("max-states").copied(),
            };
            let start = std::time::Instant::now();
            let dfa = nfa.subset_construction_with(nfa.initial_states().clone(), options)?;
            info!(
                "subset construction took {}µs",
                start.elapsed().as_micros()
            );
            println!("DFA:\n{}", dfa.transition_table());
        }
        _ => unreachable!(),
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
