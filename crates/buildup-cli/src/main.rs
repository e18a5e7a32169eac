//! buildup CLI - drive the wall visualizer from the terminal
//!
//! Composes walls, prints their cutaway layout, picks layers under a screen
//! position and replays UI event scripts against the software scene.

use anyhow::{Context, Result};
use buildup::{SelectionField, SoftwareScene, Viewer, ViewerConfig};
use buildup_catalog::{Catalog, Family};
use buildup_math::Point2;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod report;
mod script;

use console::ConsoleUi;
use report::{ComposeReport, LayoutReport};
use script::{Rejected, ScriptLine};

#[derive(Parser)]
#[command(name = "buildup")]
#[command(author, version, about = "Cutaway visualizer for masonry cavity walls", long_about = None)]
struct Cli {
    /// Viewer configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Material catalog (JSON) replacing the built-in table
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Values for the five selection steps.
#[derive(Args, Debug, Default)]
struct SelectionArgs {
    /// Step 1: wall type (e.g. masonry)
    #[arg(long)]
    wall_type: Option<String>,
    /// Step 2: full-fill or partial-fill
    #[arg(long)]
    masonry_type: Option<String>,
    /// Step 3: insulation key
    #[arg(long)]
    insulation: Option<String>,
    /// Step 4: inner leaf key
    #[arg(long)]
    inner_leaf: Option<String>,
    /// Step 5: outer finish key
    #[arg(long)]
    outer_finish: Option<String>,
}

impl SelectionArgs {
    fn values(&self) -> [(SelectionField, Option<&str>); 5] {
        [
            (SelectionField::WallType, self.wall_type.as_deref()),
            (SelectionField::MasonryType, self.masonry_type.as_deref()),
            (SelectionField::Insulation, self.insulation.as_deref()),
            (SelectionField::InnerLeaf, self.inner_leaf.as_deref()),
            (SelectionField::OuterFinish, self.outer_finish.as_deref()),
        ]
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the material catalog
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose a wall and list its layers
    Compose {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose a wall and list its cutaway boxes
    Layout {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Name the layer under a screen position
    Pick {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Pointer x in pixels
        #[arg(long)]
        x: f64,
        /// Pointer y in pixels
        #[arg(long)]
        y: f64,
    },
    /// Replay an event script (reads stdin when no file or "-" is given)
    Run {
        /// Script file
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Catalog { json } => show_catalog(&catalog, json)?,
        Commands::Compose { selection, json } => {
            let viewer = viewer_for(catalog, &config, &selection)?;
            let report = ComposeReport::new(
                viewer.status(),
                viewer.visible_steps(),
                viewer.session().layers(),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_compose(&report);
            }
        }
        Commands::Layout { selection, json } => {
            let viewer = viewer_for(catalog, &config, &selection)?;
            let report = LayoutReport::new(viewer.session().layout());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_layout(&report);
            }
        }
        Commands::Pick { selection, x, y } => {
            let mut viewer = viewer_for(catalog, &config, &selection)?;
            let tooltip = viewer.on_pointer_move(Point2::new(x, y));
            if tooltip.visible {
                println!("{}", tooltip.label);
            } else {
                println!("no hit");
            }
        }
        Commands::Run { file } => {
            let text = read_script(file.as_deref())?;
            let lines = script::parse_script(&text)?;
            run_script(catalog, &config, &lines)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    ViewerConfig::from_toml_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
    debug!(path = %path.display(), "loaded catalog");
    Ok(catalog)
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            Ok(text)
        }
    }
}

/// A quiet viewer with `selection` applied in step order.
fn viewer_for(
    catalog: Catalog,
    config: &ViewerConfig,
    selection: &SelectionArgs,
) -> Result<Viewer<SoftwareScene, ConsoleUi>> {
    let mut viewer = Viewer::new(catalog, config, SoftwareScene::new(), ConsoleUi::quiet())?;
    for (field, value) in selection.values() {
        if let Some(value) = value {
            viewer
                .on_selection_changed(field, value)
                .with_context(|| format!("Invalid --{field} '{value}'"))?;
        }
    }
    Ok(viewer)
}

fn run_script(catalog: Catalog, config: &ViewerConfig, lines: &[ScriptLine]) -> Result<()> {
    let mut viewer = Viewer::new(catalog, config, SoftwareScene::new(), ConsoleUi::new())?;
    for Rejected { line, error } in script::replay(&mut viewer, lines) {
        eprintln!("line {line}: {error}");
    }
    println!(
        "{} frames, {} boxes",
        viewer.render_loop().frames(),
        viewer.session().adapter().len()
    );
    Ok(())
}

fn show_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", catalog.to_json()?);
        return Ok(());
    }
    for family in Family::ALL {
        println!("{family}:");
        for def in catalog.entries(family) {
            let thickness = def
                .thickness
                .map(|t| format!("{:.1} mm", t * 1000.0))
                .unwrap_or_else(|| "by fill".to_string());
            println!(
                "  {:<16} {:<32} {:>9}  lambda {:.3}",
                def.id, def.name, thickness, def.lambda
            );
        }
    }
    Ok(())
}

fn print_compose(report: &ComposeReport) {
    println!("{}", report.status);
    let steps: Vec<String> = report.visible_steps.iter().map(u8::to_string).collect();
    println!("Visible steps: {}", steps.join(", "));
    if report.layers.is_empty() {
        return;
    }
    for (i, layer) in report.layers.iter().enumerate() {
        println!("  {}. {:<40} {:>7.1} mm", i + 1, layer.name, layer.thickness * 1000.0);
    }
    println!("Total depth: {:.1} mm", report.total_depth * 1000.0);
}

fn print_layout(report: &LayoutReport) {
    println!(
        "{} boxes, total depth {:.4}, group offset {:.5}",
        report.boxes.len(),
        report.total_depth,
        report.group_offset
    );
    if let Some([min, max]) = report.bounds {
        println!(
            "bounds [{:.3}, {:.3}, {:.5}] .. [{:.3}, {:.3}, {:.5}]",
            min[0], min[1], min[2], max[0], max[1], max[2]
        );
    }
    for b in &report.boxes {
        println!(
            "  layer {} {:<5} size [{:.3}, {:.3}, {:.4}] center [{:.3}, {:.3}, {:.5}]",
            b.layer, b.part, b.size[0], b.size[1], b.size[2], b.center[0], b.center[1], b.center[2]
        );
    }
}
