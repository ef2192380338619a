// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planform - plan-to-frame structural import.
//!
//! # Commands
//!
//! - `planform import` - build walls, beams and slabs from floor-plan drawings
//! - `planform notes` - print the wall thickness table for a zone and height
//! - `planform schedule` - validate a configuration and print its grade schedule

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use planform_import::{
    load_drawing, CadEntity, ImportConfig, ImportReport, Importer, ModelSink, RecordingSink,
    ReversedWindingRetry,
};
use planform_sections::{available_wall_thicknesses, thickness_preview, Catalog, SeismicZone};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod config;

use config::Settings;

#[derive(Parser)]
#[command(name = "planform", version, about = "Plan-to-frame structural import")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import drawings into a recorded structural model
    Import {
        /// Building configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
        /// Section names defined in the host model, one per line
        #[arg(short, long)]
        sections: PathBuf,
        /// Write the recorded model as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Retry rejected areas once with reversed winding
        #[arg(long)]
        retry_reversed: bool,
    },
    /// Print the wall thickness table for design notes
    Notes {
        /// Seismic zone, e.g. "Zone III"
        #[arg(short, long)]
        zone: String,
        /// Number of typical floors
        #[arg(short, long)]
        floors: u32,
    },
    /// Validate a configuration and print its grade schedule
    Schedule {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    settings.init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Import {
            config,
            sections,
            output,
            json,
            retry_reversed,
        } => run_import(&settings, &config, &sections, output.as_deref(), json, retry_reversed),
        Command::Notes { zone, floors } => print_notes(&zone, floors),
        Command::Schedule { config } => print_schedule(&settings, &config),
    }
}

fn load_config(settings: &Settings, path: &Path) -> Result<ImportConfig> {
    let mut config = ImportConfig::from_path(path)?;
    if let Some(units) = settings.units {
        tracing::info!(%units, "Drawing unit overridden from environment");
        config.units = units;
    }
    Ok(config)
}

fn load_sections(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read section list {}", path.display()))?;
    let names = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));
    Ok(Catalog::load(names)?)
}

fn run_import(
    settings: &Settings,
    config_path: &Path,
    sections_path: &Path,
    output: Option<&Path>,
    json: bool,
    retry_reversed: bool,
) -> Result<()> {
    let config = load_config(settings, config_path)?;
    let catalog = Arc::new(load_sections(sections_path)?);

    let mut drawings = Vec::with_capacity(config.floor_types.len());
    for ft in &config.floor_types {
        let Some(path) = ft.drawing.as_deref() else {
            bail!("floor type {:?} has no drawing", ft.name);
        };
        let entities = load_drawing(path)?;
        tracing::info!(floor_type = %ft.name, entities = entities.len(), "Loaded drawing");
        drawings.push(entities);
    }

    let importer = Importer::new(config, catalog)?;
    let mut recorder = RecordingSink::new();
    let report = if retry_reversed {
        let mut sink = ReversedWindingRetry::new(&mut recorder);
        import_into(&importer, &drawings, &mut sink)?
    } else {
        import_into(&importer, &drawings, &mut recorder)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
        for failure in &report.failures {
            println!("  ! {} / {}: {}", failure.story, failure.layer, failure.reason);
        }
    }

    if let Some(path) = output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &recorder)?;
        tracing::info!(path = %path.display(), "Wrote model");
    }
    Ok(())
}

fn import_into<S: ModelSink>(
    importer: &Importer,
    drawings: &[Vec<CadEntity>],
    sink: &mut S,
) -> Result<ImportReport> {
    Ok(importer.run(drawings, sink)?)
}

fn print_notes(zone: &str, floors: u32) -> Result<()> {
    let zone: SeismicZone = zone.parse()?;
    println!("Wall thicknesses (mm), {zone}, {floors} floors");
    for row in thickness_preview(zone, floors)? {
        let mut line = format!("  {:<18} {:>4}", row.wall_type.label(), row.normal);
        if let Some(short) = row.short {
            line.push_str(&format!("  short walls (<1.8 m) {short}"));
        }
        if let Some(floating) = row.floating {
            line.push_str(&format!("  with floating columns {floating}"));
        }
        println!("{line}");
    }
    let all: Vec<String> = available_wall_thicknesses(zone, floors)?
        .iter()
        .map(u32::to_string)
        .collect();
    println!("Sections to define: {}", all.join(", "));
    Ok(())
}

fn print_schedule(settings: &Settings, config_path: &Path) -> Result<()> {
    let config = load_config(settings, config_path)?;
    let schedule = config.validate()?;
    print!("{schedule}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from([
            "planform",
            "import",
            "--config",
            "tower.json",
            "--sections",
            "sections.txt",
            "--retry-reversed",
        ])
        .unwrap();
        match cli.command {
            Command::Import {
                config,
                output,
                retry_reversed,
                json,
                ..
            } => {
                assert_eq!(config, PathBuf::from("tower.json"));
                assert!(output.is_none());
                assert!(retry_reversed);
                assert!(!json);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_notes_rejects_bad_zone() {
        assert!(print_notes("Zone IX", 10).is_err());
        assert!(print_notes("Zone II", 0).is_err());
        assert!(print_notes("Zone II", 12).is_ok());
    }
}
