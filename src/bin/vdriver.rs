//! vdriver CLI
//!
//! Loads a driver configuration and inspects it, or replays a command script
//! against a single in-memory driver instance.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vdriver::protocol::{decode_script, encode_response, Response};
use vdriver::{FakeDriver, StorageDriver};

/// vdriver CLI
#[derive(Parser, Debug)]
#[command(name = "vdriver")]
#[command(about = "In-memory storage driver for orchestrator testing")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered driver types
    Drivers,

    /// Load a configuration and print its pools
    Inspect {
        /// Driver configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Replay a JSON-lines command script against a fresh driver
    Replay {
        /// Driver configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Command script, one JSON command per line
        #[arg(short, long)]
        script: PathBuf,

        /// Stop at the first failing command
        #[arg(long)]
        fail_fast: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vdriver=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let outcome = match args.command {
        Commands::Drivers => {
            let registry = vdriver::DriverRegistry::with_builtin();
            for name in registry.names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Inspect { config } => inspect(config),
        Commands::Replay {
            config,
            script,
            fail_fast,
        } => replay(config, script, fail_fast),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn load(config: &Path) -> vdriver::Result<FakeDriver> {
    tracing::info!("vdriver v{}", vdriver::VERSION);
    tracing::info!("Config file: {}", config.display());

    let bytes = std::fs::read(config)?;
    let driver = FakeDriver::new();
    driver.initialize(&bytes)?;
    driver.validate()?;
    Ok(driver)
}

fn inspect(config: PathBuf) -> vdriver::Result<()> {
    let driver = load(&config)?;
    print_pools(&driver)
}

fn replay(config: PathBuf, script: PathBuf, fail_fast: bool) -> vdriver::Result<()> {
    let driver = load(&config)?;
    let commands = decode_script(BufReader::new(File::open(&script)?))?;
    tracing::info!("Replaying {} commands from {}", commands.len(), script.display());

    let mut failures = 0usize;
    for command in commands {
        let op = command.operation();
        let result = driver.execute(command);
        println!("{}", encode_response(&Response::from_result(op, &result))?);

        if let Err(e) = result {
            failures += 1;
            tracing::warn!("{} failed: {}", op, e);
            if fail_fast {
                return Err(e);
            }
        }
    }

    tracing::info!("Replay finished with {} failed commands", failures);
    print_pools(&driver)
}

fn print_pools(driver: &FakeDriver) -> vdriver::Result<()> {
    let report = serde_json::json!({
        "instanceName": driver.config().map(|c| c.instance_name).unwrap_or_default(),
        "serialNumbers": driver.serial_numbers(),
        "pools": driver.pools(),
        "destroyedVolumes": driver.destroyed_volumes(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
