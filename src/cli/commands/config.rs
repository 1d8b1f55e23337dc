//! Config command handler

use crate::args::ConfigSubcommand;
use skyebridge::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            persist(config.set(&key, &value), config, &format!("Set {key} = {value}"));
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let outcome = config.unset(&key, defaults);
            persist(outcome, config, &format!("Reset {key} to default"));
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

/// Print one value, or the whole configuration when `key` is `None`
fn show(config: &Config, key: Option<&str>) {
    let Some(key) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        return;
    };
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => {
            eprintln!("✗ Unknown config key: '{key}'");
            std::process::exit(1);
        }
    }
}

/// Save `config` after a successful change and report it
fn persist(outcome: Result<(), String>, config: &Config, done: &str) {
    if let Err(e) = outcome {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    println!("✓ {done}");
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
