use ac_app::{
    AppResult, PrepProgressEvent, PrepStage, PrepareOptions, PrepareRequest, case_service,
    prepare_service, sizing_service,
};
use ac_case::LoadOptions;
use ac_sizing::SizingOutcome;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "aerocase")]
#[command(about = "Aerocase CLI - boundary-layer sizing and flow-solver case preparation", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML or JSON)
        config: PathBuf,
    },
    /// Size the boundary-layer prism stack
    Size {
        config: PathBuf,
        /// Treat unrecognized boundary-layer modes as wall-function mode
        #[arg(long)]
        legacy_mode_fallback: bool,
        /// Print the sizing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the mesh-generator inputs as JSON
    MeshInputs {
        config: PathBuf,
        #[arg(long)]
        legacy_mode_fallback: bool,
    },
    /// Print the solver namelist blocks
    Namelist {
        config: PathBuf,
        #[arg(long)]
        legacy_mode_fallback: bool,
    },
    /// Print the solver launch command
    Command {
        config: PathBuf,
        #[arg(long)]
        legacy_mode_fallback: bool,
    },
    /// Write mesher inputs, namelist and species files into an analysis directory
    Prepare {
        config: PathBuf,
        /// Output directory (defaults to `analysis` next to the case file)
        #[arg(long)]
        analysis_dir: Option<PathBuf>,
        /// Skip cache and force re-preparation
        #[arg(long)]
        no_cache: bool,
        #[arg(long)]
        legacy_mode_fallback: bool,
    },
    /// Prepare the case, then run the solver in the analysis directory
    Launch {
        config: PathBuf,
        #[arg(long)]
        analysis_dir: Option<PathBuf>,
        #[arg(long)]
        legacy_mode_fallback: bool,
    },
    /// List recorded preparations for a case, or show one manifest
    Preps {
        config: PathBuf,
        /// Print the full manifest of this preparation
        #[arg(long)]
        show: Option<String>,
    },
    /// Apply `section.key=value` assignments to every case under a directory
    Update {
        /// Directory whose subdirectories hold case files
        root: PathBuf,
        /// Assignments, e.g. `boundary_layer.growth_ratio=1.15`
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Rewrite a case file in the current schema version
    Migrate {
        config: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Validate { config } => cmd_validate(&config),
        Commands::Size {
            config,
            legacy_mode_fallback,
            json,
        } => cmd_size(&config, legacy_mode_fallback, json),
        Commands::MeshInputs {
            config,
            legacy_mode_fallback,
        } => cmd_mesh_inputs(&config, legacy_mode_fallback),
        Commands::Namelist {
            config,
            legacy_mode_fallback,
        } => cmd_namelist(&config, legacy_mode_fallback),
        Commands::Command {
            config,
            legacy_mode_fallback,
        } => cmd_command(&config, legacy_mode_fallback),
        Commands::Prepare {
            config,
            analysis_dir,
            no_cache,
            legacy_mode_fallback,
        } => cmd_prepare(&config, analysis_dir, !no_cache, legacy_mode_fallback).map(|_| ()),
        Commands::Launch {
            config,
            analysis_dir,
            legacy_mode_fallback,
        } => cmd_launch(&config, analysis_dir, legacy_mode_fallback),
        Commands::Preps { config, show } => match show {
            Some(prep_id) => cmd_show_prep(&config, &prep_id),
            None => cmd_preps(&config),
        },
        Commands::Update { root, assignments } => cmd_update(&root, &assignments),
        Commands::Migrate { config, output } => cmd_migrate(&config, output.as_deref()),
    }
}

fn load_options(legacy_mode_fallback: bool) -> LoadOptions {
    LoadOptions {
        legacy_mode_fallback,
    }
}

fn cmd_validate(config: &Path) -> AppResult<()> {
    println!("Validating case: {}", config.display());
    let case = case_service::load_case(config, LoadOptions::default())?;
    let summary = case_service::summarize(&case);
    println!("✓ Case '{}' is valid", summary.name);
    match summary.boundary_layer {
        Some(mode) => println!(
            "  boundary layer: {} ({} layers)",
            mode,
            summary.max_layers.unwrap_or_default()
        ),
        None => println!("  boundary layer: disabled"),
    }
    println!(
        "  gas model: {}",
        if summary.generic_gas { "generic" } else { "perfect" }
    );
    println!(
        "  inviscid flux: {}",
        if summary.has_flux_section {
            "configured"
        } else {
            "solver defaults"
        }
    );
    println!("  mpi procs: {}", summary.mpi_procs);
    Ok(())
}

fn cmd_size(config: &Path, legacy_mode_fallback: bool, json: bool) -> AppResult<()> {
    let case = case_service::load_case(config, load_options(legacy_mode_fallback))?;
    let Some(outcome) = sizing_service::size_case(&case)? else {
        println!("Boundary layer disabled for case '{}'", case.name);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_sizing_report(&case.name, &outcome);
    }
    Ok(())
}

fn print_sizing_report(name: &str, s: &SizingOutcome) {
    let controls = s.bl_controls();
    println!("Boundary-layer sizing for '{name}'");
    println!("  mode:                {} ({} regime)", s.mode, s.regime);
    println!("  Re_x:                {:.4e}", s.reynolds_number);
    println!("  Cf:                  {:.6}", s.skin_friction);
    println!("  u_tau:               {:.4} m/s", s.friction_velocity_mps);
    println!("  target y+:           {}", s.y_plus);
    println!("  first cell height:   {:.4e} m", s.first_cell_height_m);
    println!(
        "  layers:              {} (growth ratio {})",
        s.max_layers, s.growth_ratio
    );
    println!("  stack thickness:     {:.4e} m", s.total_thickness_m);
    println!("  outer layer height:  {:.4e} m", s.outer_layer_height_m);
    if s.scale_length != 1.0 {
        println!(
            "  normalized (L = {}): spacing {:.4e}, thickness {:.4e}",
            s.scale_length, controls.bl_initial_spacing, controls.bl_thickness
        );
    }
}

fn cmd_mesh_inputs(config: &Path, legacy_mode_fallback: bool) -> AppResult<()> {
    let case = case_service::load_case(config, load_options(legacy_mode_fallback))?;
    let sizing = sizing_service::size_case(&case)?;
    let inputs = ac_app::mesh_generator_inputs(&case, sizing.as_ref());
    println!("{}", serde_json::to_string_pretty(&inputs)?);
    Ok(())
}

fn cmd_namelist(config: &Path, legacy_mode_fallback: bool) -> AppResult<()> {
    let case = case_service::load_case(config, load_options(legacy_mode_fallback))?;
    print!("{}", ac_app::render_namelist(&case));
    Ok(())
}

fn cmd_command(config: &Path, legacy_mode_fallback: bool) -> AppResult<()> {
    let case = case_service::load_case(config, load_options(legacy_mode_fallback))?;
    let env_procs = ac_app::solver_command::env_mpi_procs();
    println!(
        "{}",
        ac_app::build_solver_command(&case, env_procs.as_deref())
    );
    Ok(())
}

fn cmd_prepare(
    config: &Path,
    analysis_dir: Option<PathBuf>,
    use_cache: bool,
    legacy_mode_fallback: bool,
) -> AppResult<ac_app::PrepareResponse> {
    let analysis_dir =
        analysis_dir.unwrap_or_else(|| prepare_service::default_analysis_dir(config));
    println!("Preparing case into: {}", analysis_dir.display());

    let request = PrepareRequest {
        case_path: config,
        analysis_dir: &analysis_dir,
        options: PrepareOptions {
            use_cache,
            legacy_mode_fallback,
            ..PrepareOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = prepare_service::prepare_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.prep_id);
    } else {
        println!("✓ Prepared: {}", response.prep_id);
    }

    let outputs = &response.manifest.outputs;
    println!("  mesh inputs:   {}", outputs.mesh_inputs.display());
    println!("  solver inputs: {}", outputs.solver_inputs.display());
    println!("  namelist:      {}", outputs.namelist.display());
    if !outputs.species_copied.is_empty() {
        println!("  species:       {}", outputs.species_copied.join(", "));
    }
    for missing in &outputs.species_missing {
        println!("  (warn) missing species file: {missing}");
    }
    if let Some(sizing) = &response.manifest.sizing {
        println!(
            "  first cell:    {:.4e} m, stack {:.4e} m",
            sizing.first_cell_height_m, sizing.total_thickness_m
        );
    }
    println!("  command:       {}", response.manifest.command.join(" "));
    Ok(response)
}

fn cmd_launch(
    config: &Path,
    analysis_dir: Option<PathBuf>,
    legacy_mode_fallback: bool,
) -> AppResult<()> {
    let response = cmd_prepare(config, analysis_dir, true, legacy_mode_fallback)?;
    let command = response
        .command()
        .ok_or_else(|| ac_app::AppError::InvalidInput("empty solver command".to_string()))?;
    prepare_service::launch_solver(&command, &response.manifest.outputs.analysis_dir)?;
    println!("✓ Solver finished");
    Ok(())
}

fn cmd_preps(config: &Path) -> AppResult<()> {
    let preps = prepare_service::list_preps(config)?;
    if preps.is_empty() {
        println!("No preparations found for {}", config.display());
        return Ok(());
    }
    println!("Preparations:");
    for prep in preps {
        println!(
            "  {} - {} -> {}",
            prep.prep_id,
            prep.timestamp,
            prep.outputs.analysis_dir.display()
        );
    }
    Ok(())
}

fn cmd_show_prep(config: &Path, prep_id: &str) -> AppResult<()> {
    let manifest = prepare_service::load_prep(config, prep_id)?;
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}

fn cmd_update(root: &Path, assignments: &[String]) -> AppResult<()> {
    let updated = case_service::update_cases(root, assignments)?;
    if updated.is_empty() {
        println!("No case files found under {}", root.display());
    }
    for path in updated {
        println!("✓ Updated {}", path.display());
    }
    Ok(())
}

fn cmd_migrate(config: &Path, output: Option<&Path>) -> AppResult<()> {
    let target = case_service::migrate_case_file(config, output)?;
    println!("✓ Wrote {}", target.display());
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &PrepProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(message) = &event.message {
        line.push_str(&format!("  {message}"));
    }
    if event.stage == PrepStage::Completed {
        line.push_str("  done");
    }
    print!("{line}");
    let _ = io::stdout().flush();
}
