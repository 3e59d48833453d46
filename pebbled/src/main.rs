//! # Pebble Host Daemon
//!
//! Main entry point for the Pebble host runtime.

use pebbled::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // logs go to stderr so the final screen on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });
    let print_screen = config.print_screen;

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }

    if print_screen {
        for line in runtime.screen_text() {
            println!("{}", line);
        }
    }
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    // a config file sets the base; other flags override it in any order
    let config_path = args
        .iter()
        .position(|arg| arg == "--config" || arg == "-c")
        .map(|i| {
            args.get(i + 1)
                .ok_or_else(|| "Missing value for --config".to_string())
        })
        .transpose()?;

    let mut config = match config_path {
        Some(path) => HostRuntimeConfig::load(Path::new(path)).map_err(|e| e.to_string())?,
        None => HostRuntimeConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                config.script = Some(PathBuf::from(&args[i]));
            }
            "--max-steps" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                config.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--hostname" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --hostname".to_string());
                }
                config.hostname = args[i].clone();
            }
            "--no-screen" => {
                config.print_screen = false;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      JSON configuration file");
    eprintln!("  -s, --script <FILE>      Key script to run (default: read lines from stdin)");
    eprintln!("  --max-steps <N>          Maximum keys to process (0 = unlimited)");
    eprintln!("  --hostname <NAME>        Name shown in the shell prompt");
    eprintln!("  --no-screen              Do not print the final screen");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/hello_editor.keys", program);
    eprintln!("  echo 'mkdir docs' | {} --max-steps 100", program);
}
