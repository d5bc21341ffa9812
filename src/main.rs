use std::collections::BTreeMap;
use std::env;
use std::process;

use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use thicket::cli::{build_command, execute, verbosity_from_args};
use thicket::exitcode;
use thicket::settings::Settings;
use thicket::tree;

fn main() {
    // The subcommand set is only known after scanning the root directory, so
    // the verbosity count is taken from raw argv before clap can run.
    let verbosity = verbosity_from_args(env::args().skip(1));
    setup_logging(verbosity);

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("{}", format!("Error: {}", e).red());
        process::exit(exitcode::CONFIG);
    });

    let nodes = if settings.root_dir.is_dir() {
        tree::build(&settings.root_dir).unwrap_or_else(|e| {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(exitcode::IOERR);
        })
    } else {
        tracing::info!("No command root at {}", settings.root_dir.display());
        BTreeMap::new()
    };

    let mut cmd = build_command(&nodes);
    let matches = cmd.clone().get_matches();

    match execute(&mut cmd, &matches, &nodes) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
