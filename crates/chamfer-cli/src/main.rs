//! chamfer CLI - conical chamfer calculator for lathe work
//!
//! Solves the missing chamfer parameter, prints a summary and the G-code
//! block, and optionally writes the program and a schematic to files.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chamfer_drafting::Schematic;
use chamfer_kernel::{
    calculate, parse_number, AngleConvention, ChamferInput, ChamferResult, CompensationStrategy,
};
use chamfer_post::{generate_gcode, guidance_block, GcodeFlavor};

mod config;
mod summary;

use config::Config;

#[derive(Parser)]
#[command(name = "chamfer")]
#[command(about = "Conical chamfer calculator with G-code output", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a chamfer from any three of D, D1, angle and L1
    Solve(SolveArgs),
    /// Print the default configuration as TOML
    Defaults,
}

#[derive(Args)]
struct SolveArgs {
    /// Start diameter D (accepts "12,5" and a trailing "mm")
    #[arg(long = "d")]
    d: Option<String>,
    /// End diameter D1
    #[arg(long = "d1")]
    d1: Option<String>,
    /// Chamfer angle in degrees
    #[arg(long)]
    angle: Option<String>,
    /// Axial chamfer length L1
    #[arg(long = "l1")]
    l1: Option<String>,
    /// Angle convention: face or axis
    #[arg(long)]
    convention: Option<AngleConvention>,
    /// Tool nose radius; 0 or absent disables compensation
    #[arg(long)]
    tool_radius: Option<String>,
    /// Compensation strategy: closed_form or legacy_table
    #[arg(long)]
    compensation: Option<CompensationStrategy>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// G-code flavor: generic, fanuc or linux_cnc
    #[arg(long)]
    flavor: Option<GcodeFlavor>,
    /// Write the G-code program to this file
    #[arg(long)]
    gcode: Option<PathBuf>,
    /// Write an SVG schematic to this file
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Write a DXF schematic to this file
    #[arg(long)]
    dxf: Option<PathBuf>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// How a `solve` run ended.
#[derive(Debug, PartialEq)]
enum Outcome {
    Solved,
    /// Input was rejected and the guidance block was printed.
    Rejected,
}

#[derive(Serialize)]
struct Report<'a> {
    result: &'a ChamferResult,
    gcode: &'a str,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve(args) => match solve(&args)? {
            Outcome::Solved => Ok(ExitCode::SUCCESS),
            Outcome::Rejected => Ok(ExitCode::from(2)),
        },
        Commands::Defaults => {
            print!("{}", Config::default().to_toml_string()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn solve(args: &SolveArgs) -> Result<Outcome> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(convention) = args.convention {
        config.solver.convention = convention;
    }
    if let Some(compensation) = args.compensation {
        config.solver.compensation = compensation;
    }
    if let Some(flavor) = args.flavor {
        config.post.flavor = flavor;
    }
    config.validate()?;

    let outcome = read_input(args).and_then(|input| calculate(&input, &config.solver));
    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            tracing::debug!(error = %err, guidance = err.is_guidance(), "input rejected");
            print!("{}", guidance_block(&err.to_string(), config.post.flavor));
            return Ok(Outcome::Rejected);
        }
    };

    let gcode = generate_gcode(&result, &config.post);

    if args.json {
        let report = Report {
            result: &result,
            gcode: &gcode,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary::render(&result));
        print!("{}", gcode);
    }

    if let Some(path) = &args.gcode {
        write_file(path, &gcode)?;
    }
    if args.svg.is_some() || args.dxf.is_some() {
        let schematic = Schematic::from_result(&result, &config.schematic);
        if let Some(path) = &args.svg {
            write_file(path, &schematic.to_svg())?;
        }
        if let Some(path) = &args.dxf {
            schematic
                .export_dxf(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote DXF schematic");
        }
    }

    Ok(Outcome::Solved)
}

fn read_input(args: &SolveArgs) -> chamfer_kernel::Result<ChamferInput> {
    let field = |text: &Option<String>| match text {
        Some(text) => parse_number(text),
        None => Ok(None),
    };

    let mut input = ChamferInput::new(
        field(&args.d)?,
        field(&args.d1)?,
        field(&args.angle)?,
        field(&args.l1)?,
    );
    if let Some(radius) = field(&args.tool_radius)? {
        input = input.with_tool_radius(radius);
    }
    Ok(input)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote output");
    Ok(())
}
