use std::io::{self, BufRead, Write};
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};

mod actions;
mod commands;
mod config;
mod logger;
mod middleware;
mod reducer;
mod state;
mod store;

use config::CounterConfig;
use middleware::QuitMiddleware;
use state::CounterState;

fn main() -> Result<()> {
    let (config, config_warning) = CounterConfig::load();
    logger::init(&config.log_level)?;

    log::info!("Starting redux-counter");
    if let Some(warning) = config_warning {
        log::warn!("{}", warning);
    }
    log::debug!("Config: {:?}", config);

    let quit = QuitMiddleware::new();
    let running = quit.running();
    let store = store::create_store(&config, quit);

    let _printer = store.subscribe(|old: Option<&CounterState>, new: &CounterState| match old {
        Some(old) if old.value != new.value => println!("{} -> {}", old.value, new.value),
        Some(_) => {}
        None => println!("counter = {}", new.value),
    });
    let _parity = store.subscribe_with_selector(
        CounterState::is_even,
        |old: Option<&bool>, even: &bool| {
            if old.is_some_and(|old| old != even) {
                println!("  now {}", if *even { "even" } else { "odd" });
            }
        },
    );

    println!("commands: + | - | add <n> | reset | quit");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while running.load(Ordering::SeqCst) {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match commands::parse_command(&line) {
            Ok(Some(action)) => store.dispatch(action),
            Ok(None) => {}
            Err(e) => eprintln!("{:#}", e),
        }
    }

    log::info!(
        "Exiting redux-counter at {} after {} change(s)",
        store.state().value,
        store.state().changes
    );
    Ok(())
}
