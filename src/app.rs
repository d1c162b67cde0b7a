// src/app.rs
use crate::config;
use crate::core::engine::SelectionEngine;
use crate::core::names::{self, NameSource};
use crate::core::planner::RandomPlanner;
use crate::core::timing::FrameClock;
use crate::renderer::TerminalRenderer;
use crate::state::RaffleSession;
use log::info;
use std::error::Error;
use std::fs;

const USAGE: &str = "\
Usage: spinwheel [OPTIONS]

Options:
  --names <FILE>        File with one participant name per line
  --sheet <LINK>        Google Sheet link (or bare spreadsheet id)
  --extractions <N>     Number of winners to draw (default: 1)
  --help                Show this help

Provide either --names or --sheet. If both are given, --names wins.";

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub names_file: Option<String>,
    pub sheet: Option<String>,
    pub extractions: usize,
}

pub fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut opts = Options {
        extractions: 1,
        ..Options::default()
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--names" => {
                opts.names_file =
                    Some(args.next().ok_or("--names requires a file path")?);
            }
            "--sheet" => {
                opts.sheet = Some(args.next().ok_or("--sheet requires a link")?);
            }
            "--extractions" => {
                let raw = args.next().ok_or("--extractions requires a number")?;
                opts.extractions = raw
                    .parse()
                    .map_err(|_| format!("invalid extraction count: '{}'", raw))?;
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown option: '{}'\n\n{}", other, USAGE)),
        }
    }

    if opts.names_file.is_none() && opts.sheet.is_none() {
        return Err(format!(
            "please enter names (--names) or provide a Google Sheet link (--sheet)\n\n{}",
            USAGE
        ));
    }
    Ok(opts)
}

pub fn run(opts: Options) -> Result<(), Box<dyn Error>> {
    config::load();

    let source = match (&opts.names_file, &opts.sheet) {
        (Some(path), _) => NameSource::Manual(fs::read_to_string(path)?),
        (None, Some(link)) => NameSource::Sheet(link.clone()),
        (None, None) => unreachable!("parse_args requires a source"),
    };

    // Either ingestion failure aborts here: no spin ever starts.
    let roster = names::fetch_names(&source)?;
    info!(
        "Starting raffle: {} name(s), {} extraction(s).",
        roster.len(),
        opts.extractions
    );

    let mut session = RaffleSession::new(roster);
    let mut engine = SelectionEngine::new();
    let mut planner = RandomPlanner::new(rand::rng());
    let mut renderer = TerminalRenderer::new();
    let mut clock = FrameClock::new();

    engine.run_raffle(
        &mut session,
        opts.extractions,
        &mut planner,
        &mut renderer,
        &mut clock,
    )?;

    println!("\n");
    for winner in &session.winners {
        println!("{}. {} - Congratulations!", winner.draw_index, winner.name);
    }
    if session.winners.len() < opts.extractions {
        println!(
            "Stopped after {} extraction(s): all names have been selected.",
            session.winners.len()
        );
    }
    Ok(())
}
