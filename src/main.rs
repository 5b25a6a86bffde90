/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use elevator_bank::config::{self, Config};
use elevator_bank::control::Command;
use elevator_bank::driver::{EventReporter, TickDriver};
use elevator_bank::shared::CarEvent;
use elevator_bank::{unwrap_or_exit, ElevatorBank};

/* Arguments */
#[derive(Parser, Debug)]
#[clap(name = "elevator_bank", about = "Simulate a bank of elevators from the console")]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides driver.tick_interval_ms; 0 disables the clock so only `tick` advances it
    #[clap(long)]
    tick_ms: Option<u64>,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = if args.config.exists() {
        unwrap_or_exit!(config::load_config(&args.config))
    } else {
        warn!(
            "No configuration at {}, using defaults",
            args.config.display()
        );
        Config::default()
    };
    if let Some(tick_ms) = args.tick_ms {
        config.driver.tick_interval_ms = tick_ms;
    }

    // Initialize channels
    let (event_tx, event_rx) = cbc::unbounded::<CarEvent>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Create the bank
    let bank = Arc::new(unwrap_or_exit!(ElevatorBank::from_config(&config, event_tx)));

    // Start the event reporter
    let reporter = EventReporter::new(event_rx);
    let reporter_thread = unwrap_or_exit!(Builder::new()
        .name("event_reporter".into())
        .spawn(move || reporter.run()));

    // Start the tick driver
    let driver_thread = if config.driver.tick_interval_ms > 0 {
        let driver = TickDriver::new(
            Arc::clone(&bank),
            Duration::from_millis(config.driver.tick_interval_ms),
            terminate_rx,
        );
        let handle = unwrap_or_exit!(Builder::new()
            .name("tick_driver".into())
            .spawn(move || {
                // Invariant violations are fatal
                unwrap_or_exit!(driver.run());
            }));
        Some(handle)
    } else {
        None
    };

    info!("Ready. Commands: call <floor> | press <car> <floor> | service <car> | tick [n] | status | quit");
    run_console(&bank);

    // Shut down
    let _ = terminate_tx.send(());
    if let Some(handle) = driver_thread {
        let _ = handle.join();
    }
    drop(bank);
    match reporter_thread.join() {
        Ok(reported) => info!("Reported {} car events", reported),
        Err(_) => error!("Event reporter panicked"),
    }
}

fn run_console(bank: &ElevatorBank) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            Command::Call(floor) => match bank.call_elevator_with_rule(floor) {
                Ok((car, rule)) => println!("car {} answering floor {} ({:?})", car, floor, rule),
                Err(e) => println!("{}", e),
            },
            Command::Press(car, floor) => {
                if let Err(e) = bank.press_car_button(car, floor) {
                    println!("{}", e);
                }
            }
            Command::Service(car) => {
                if let Err(e) = bank.service_car(car) {
                    println!("{}", e);
                }
            }
            Command::Tick(count) => {
                for _ in 0..count {
                    unwrap_or_exit!(bank.tick());
                }
            }
            Command::Status => match serde_json::to_string_pretty(&bank.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize status: {}", e),
            },
            Command::Quit => return,
        }
    }
}
