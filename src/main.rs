//! Tile Platformer headless runner
//!
//! Plays every level of a pack with the player standing still and logs how
//! each one ends.
//!
//! Usage: `tile-platformer [levels.json] [settings.json]`

use std::process::ExitCode;

use tile_platformer::sim::{LevelParser, Outcome, run_level};
use tile_platformer::{LevelPack, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let pack = match args.next() {
        Some(path) => match LevelPack::load(&path) {
            Ok(pack) => pack,
            Err(e) => {
                log::error!("Failed to load level pack {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No level pack given, using built-in levels");
            LevelPack::builtin()
        }
    };
    let settings = args.next().map(Settings::load).unwrap_or_default();
    if let Err(e) = settings.validate() {
        log::error!("Invalid settings: {}", e);
        return ExitCode::FAILURE;
    }

    let mut parser = LevelParser::new(settings.seed);
    for index in 0..pack.len() {
        let mut level = match pack.level(index, &mut parser) {
            Ok(Some(level)) => level,
            Ok(None) => break,
            Err(e) => {
                log::error!("Level {} is malformed: {}", index + 1, e);
                return ExitCode::FAILURE;
            }
        };

        match run_level(&mut level, &settings) {
            Ok(report) => {
                let outcome = match report.outcome {
                    Some(Outcome::Won) => "won",
                    Some(Outcome::Lost) => "lost",
                    None => "unresolved",
                };
                log::info!(
                    "Level {}: {} after {} frames ({:.2}s)",
                    index + 1,
                    outcome,
                    report.frames,
                    report.elapsed
                );
                println!("level {}: {}", index + 1, outcome);
            }
            Err(e) => {
                log::error!("Level {} failed: {}", index + 1, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
