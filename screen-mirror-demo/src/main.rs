mod commands;
mod host;
mod mirror_state;

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use commands::{parse_command, HELP};
use host::{Flow, Host, HostEvent, HostOptions};

fn main() -> ExitCode {
    env_logger::init();

    let options = HostOptions::from_env();
    log::info!(
        "Starting screen-mirror demo v{} ({} dpi, view {})",
        env!("CARGO_PKG_VERSION"),
        options.density_dpi,
        options.surface
    );

    let (tx, rx) = mpsc::channel();
    let mut host = match Host::new(options, tx.clone()) {
        Ok(host) => host,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", HELP);

    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if tx.send(HostEvent::Command(command)).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }
            let _ = tx.send(HostEvent::InputClosed);
        })
        .expect("failed to spawn stdin reader thread");

    for event in rx {
        if host.handle(event) == Flow::Exit {
            break;
        }
    }

    log::info!(
        "Screen-mirror demo exiting in state {} after {} platform events",
        host.controller().state().name(),
        host.platform().journal().len()
    );
    ExitCode::SUCCESS
}
