use clap::Parser;
use search_stepper::presenter::{AnySession, SampleGraphs, Variant};
use search_stepper::scheduler::{AutoPlay, PlayOutcome};
use search_stepper::session::Stepper;
use std::process;
use std::time::Duration;

/// Run a search to the end and report the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    variant: Variant,

    /// Print every step and pause between steps at the variant's pace.
    #[arg(long, global = true)]
    animate: bool,

    /// Delay between steps in milliseconds (implies printing every step).
    #[arg(short, long, global = true)]
    interval_ms: Option<u64>,

    /// Stop after this many steps.
    #[arg(short, long, global = true)]
    max_steps: Option<u32>,

    /// Print every step as a JSON object, one per line (Hint: redirect stdout)
    #[arg(short, long, global = true, default_value_t = false)]
    json: bool,
}

fn emit(session: &AnySession<'_>, json: bool, verbose: bool) {
    if json {
        match serde_json::to_string(session) {
            Ok(line) => println!("{}", line),
            Err(err) => log::error!("Cannot serialize step {}: {}", session.steps(), err),
        }
    } else if verbose {
        println!("{}\n", session);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let graphs = SampleGraphs::new();
    let mut session = match args.variant.build(&graphs) {
        Ok(session) => session,
        Err(err) => {
            log::error!("Cannot start search: {}", err);
            process::exit(1);
        }
    };

    let verbose = args.animate || args.interval_ms.is_some();
    let interval = match (args.interval_ms, args.animate) {
        (Some(ms), _) => Duration::from_millis(ms),
        (None, true) => session.default_interval(),
        (None, false) => Duration::ZERO,
    };

    let player = AutoPlay::new(interval).with_max_steps(args.max_steps);
    let handler_pause = player.pause_handle();
    if let Err(err) = ctrlc::set_handler(move || handler_pause.pause()) {
        log::warn!("Cannot install Ctrl-C handler: {}", err);
    }

    emit(&session, args.json, verbose);
    let outcome = player.run(&mut session, |s| emit(s, args.json, verbose));

    match outcome {
        PlayOutcome::Paused => log::info!("Interrupted after {} steps", session.steps()),
        PlayOutcome::StepLimit => log::info!("Stopped after {} steps", session.steps()),
        PlayOutcome::Finished(_) => {}
    }
    if !args.json {
        if !verbose {
            println!("{}\n", session);
        }
        println!("Result: {}", session.summary());
    }
}
