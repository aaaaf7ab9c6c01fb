//! `shake-trace`: run a shake scenario and print the listener offset per
//! frame as CSV.
//!
//! ```text
//! shake-trace scenario.toml > offsets.csv
//! shake-trace --schema
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use std::io::{self, Write};
use std::path::Path;

use glam::Vec3;
use quake::error::ShakeError;
use quake::options::ShakeOptions;
use quake::shake::ShakeRegistry;
use serde::Deserialize;

/// A scenario file: shake options plus a `[trace]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    #[serde(flatten)]
    options: ShakeOptions,
    trace: Trace,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Trace {
    /// Query point, usually the camera position.
    listener: Vec3,
    /// Simulation step in seconds.
    dt: f32,
    /// Number of frames to simulate.
    frames: u32,
    /// Presets to start, and when.
    spawn: Vec<Spawn>,
}

impl Default for Trace {
    fn default() -> Self {
        Self {
            listener: Vec3::ZERO,
            dt: 1.0 / 60.0,
            frames: 120,
            spawn: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Spawn {
    preset: String,
    #[serde(default)]
    frame: u32,
}

fn load_scenario(path: &Path) -> Result<Scenario, ShakeError> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ShakeError::OptionsParse(e.to_string()))
}

fn run(scenario: &Scenario, out: &mut impl Write) -> Result<(), ShakeError> {
    let trace = &scenario.trace;
    let mut registry = ShakeRegistry::with_options(&scenario.options.registry);

    writeln!(out, "frame,x,y,z")?;
    for frame in 0..trace.frames {
        for spawn in trace.spawn.iter().filter(|s| s.frame == frame) {
            let Some(params) = scenario.options.preset(&spawn.preset) else {
                log::warn!("Unknown preset '{}' at frame {frame}", spawn.preset);
                continue;
            };
            let handle = registry.create(params)?;
            log::debug!("frame {frame}: spawned '{}' as {handle:?}", spawn.preset);
        }

        registry.tick(trace.dt);
        let offset = if registry.has_active_sources() {
            registry.sample_at(trace.listener)
        } else {
            Vec3::ZERO
        };
        writeln!(out, "{frame},{},{},{}", offset.x, offset.y, offset.z)?;
    }
    log::info!(
        "Traced {} frames, {} sources still playing",
        trace.frames,
        registry.active_count()
    );
    Ok(())
}

fn print_schema() -> Result<(), ShakeError> {
    let schema = serde_json::to_string_pretty(&ShakeOptions::json_schema())
        .map_err(|e| ShakeError::OptionsParse(e.to_string()))?;
    writeln!(io::stdout().lock(), "{schema}")?;
    Ok(())
}

fn main() {
    env_logger::init();

    let Some(arg) = std::env::args().nth(1) else {
        log::error!("Usage: shake-trace <scenario.toml> | --schema");
        std::process::exit(1);
    };

    let result = if arg == "--schema" {
        print_schema()
    } else {
        load_scenario(Path::new(&arg))
            .and_then(|scenario| run(&scenario, &mut io::stdout().lock()))
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
[registry]
seed = 3

[presets.boom]
magnitude = 2.0
roughness = 12.0
lifetime = 0.5

[trace]
listener = [0.0, 0.0, 0.0]
dt = 0.1
frames = 10

[[trace.spawn]]
preset = "boom"
frame = 2

[[trace.spawn]]
preset = "missing"
"#;

    #[test]
    fn traces_one_row_per_frame() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        assert_eq!(scenario.options.registry.seed, Some(3));
        let mut out = Vec::new();
        run(&scenario, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0], "frame,x,y,z");
        // nothing plays before the spawn frame
        assert_eq!(rows[1], "0,0,0,0");
        assert_eq!(rows[2], "1,0,0,0");
        // the boom is felt while it plays
        assert!(
            rows[3..8].iter().any(|row| !row.ends_with(",0,0,0")),
            "{rows:?}"
        );
        // the 0.5s shake is over by the last frame
        assert_eq!(rows[10], "9,0,0,0");
    }
}
