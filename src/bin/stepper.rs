use clap::Parser;
use search_stepper::presenter::{SampleGraphs, Variant};
use search_stepper::scheduler::{AutoPlay, PlayOutcome};
use search_stepper::session::Stepper;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

/// Step through a search interactively.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    variant: Variant,

    /// Delay between automatic steps, in milliseconds. Defaults to the
    /// variant's own pace.
    #[arg(short, long, global = true)]
    interval_ms: Option<u64>,
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

    let interval = args
        .interval_ms
        .map_or_else(|| session.default_interval(), Duration::from_millis);
    let player = AutoPlay::new(interval);
    let pause = player.pause_handle();
    let handler_pause = pause.clone();
    // Ctrl-C pauses auto-play, and quits when pressed at the prompt.
    let handler = move || {
        if !handler_pause.interrupt() {
            println!("\nBye!");
            process::exit(0);
        }
    };
    if let Err(err) = ctrlc::set_handler(handler) {
        log::warn!("Cannot install Ctrl-C handler, playback cannot be paused: {}", err);
    }

    let mut rng = rand::thread_rng();
    loop {
        println!("---------------------");
        println!("{}", session);
        if session.is_terminal() {
            println!("Result: {}", session.summary());
        }

        print!("[Enter] step, 'p' play, 'r' reset, 's' shuffle, 'q' quit: ");
        if io::stdout().flush().is_err() {
            log::warn!("Cannot flush stdout");
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                println!("Error reading input ({}). Please try again.", err);
                continue;
            }
        }

        match input.trim() {
            "" | "n" => {
                if session.is_terminal() {
                    println!("Search is over. Press 'r' to reset.");
                } else {
                    session.step();
                }
            }
            "p" => {
                pause.resume();
                println!("Playing every {:?}. Ctrl-C pauses.", player.interval());
                let outcome = player.run(&mut session, |s| {
                    println!("---------------------");
                    println!("{}", s);
                });
                match outcome {
                    PlayOutcome::Paused | PlayOutcome::StepLimit => println!("Paused."),
                    PlayOutcome::Finished(status) => println!("Finished: {:?}", status),
                }
            }
            "r" => session.reset(),
            "s" => {
                if !session.shuffle(&mut rng) {
                    println!("Only the 8-puzzle can be shuffled.");
                }
            }
            "q" => {
                println!("Bye!");
                break;
            }
            other => println!("Unknown command '{}'.", other),
        }
    }
}
