use std::{
    io::{self, BufRead},
    process,
};

use clap::Parser;
use thompson_re::{compile_with_flags, RegexFlags, Simulator};

const EXIT_NO_MATCH: i32 = 1;
const EXIT_PARSE_ERROR: i32 = 2;

/// Decides whether each TEXT is entirely matched by PATTERN.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Pattern to compile.
    pattern: String,

    /// Texts to match. Lines of stdin are matched when none are given.
    texts: Vec<String>,

    /// Print the compiled automaton as Graphviz DOT.
    #[arg(long)]
    dot: bool,

    /// Log the compiled automaton (shown with RUST_LOG=debug).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let flags = if args.debug {
        RegexFlags::DEBUG
    } else {
        RegexFlags::NO_FLAG
    };

    let nfa = match compile_with_flags(&args.pattern, flags) {
        Ok(nfa) => nfa,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_PARSE_ERROR);
        }
    };

    if args.dot {
        println!("{}", nfa.to_dot());
    }

    let mut simulator = Simulator::new(&nfa);
    let mut all_matched = true;
    let mut report = |text: &str| {
        let matched = simulator.is_match(text);
        all_matched &= matched;
        println!("{}", matched);
    };

    if args.texts.is_empty() {
        for line in io::stdin().lock().lines() {
            report(line?.as_str());
        }
    } else {
        args.texts.iter().for_each(|text| report(text.as_str()));
    }

    if !all_matched {
        process::exit(EXIT_NO_MATCH);
    }
    Ok(())
}
