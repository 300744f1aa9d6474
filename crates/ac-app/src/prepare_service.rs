//! Case preparation pipeline and solver launch.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ac_case::{CaseConfig, LoadOptions};
use ac_results::{PrepManifest, PrepOutputs, PrepStore, compute_prep_id, timestamp_now};

use crate::error::{AppError, AppResult};
use crate::mesh_inputs::{MESH_INPUTS_FILE, mesh_generator_inputs, write_mesh_inputs};
use crate::namelist::{NAMELIST_FILE, render_namelist, write_namelist};
use crate::progress::{PrepProgressEvent, PrepStage};
use crate::solver_command::{SolverCommand, build_solver_command, env_mpi_procs};
use crate::solver_inputs::{SOLVER_INPUTS_FILE, solver_inputs, write_solver_inputs};
use crate::{case_service, sizing_service, species};

/// Options for preparing a case.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    pub use_cache: bool,
    pub tool_version: String,
    pub legacy_mode_fallback: bool,
    /// Raw value of [`MPI_PROCS_ENV`](crate::solver_command::MPI_PROCS_ENV), read when
    /// the options are built. Not part of the prep id: the command is rebuilt on every call.
    pub mpi_procs_env: Option<String>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            legacy_mode_fallback: false,
            mpi_procs_env: env_mpi_procs(),
        }
    }
}

/// Request to prepare one case into an analysis directory.
pub struct PrepareRequest<'a> {
    pub case_path: &'a Path,
    pub analysis_dir: &'a Path,
    pub options: PrepareOptions,
}

#[derive(Debug, Clone)]
pub struct PrepareResponse {
    pub prep_id: String,
    pub manifest: PrepManifest,
    pub loaded_from_cache: bool,
}

impl PrepareResponse {
    pub fn command(&self) -> Option<SolverCommand> {
        SolverCommand::from_argv(&self.manifest.command)
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(PrepProgressEvent)>,
    stage: PrepStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(PrepProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

pub fn prepare(request: &PrepareRequest) -> AppResult<PrepareResponse> {
    prepare_with_progress(request, None)
}

/// Run the preparation pipeline, reporting each stage.
///
/// Sizing finishes before anything is written to the analysis directory, so
/// a rejected configuration leaves no partial outputs behind.
pub fn prepare_with_progress(
    request: &PrepareRequest,
    mut progress_cb: Option<&mut dyn FnMut(PrepProgressEvent)>,
) -> AppResult<PrepareResponse> {
    let started = Instant::now();
    let options = &request.options;

    emit_progress(&mut progress_cb, PrepStage::LoadingCase, started, None);
    let case = case_service::load_case(
        request.case_path,
        LoadOptions {
            legacy_mode_fallback: options.legacy_mode_fallback,
        },
    )?;

    let store = PrepStore::for_case(request.case_path)?;
    let prep_id = compute_prep_id(&case, request.analysis_dir, &options.tool_version);

    emit_progress(&mut progress_cb, PrepStage::CheckingCache, started, None);
    if options.use_cache
        && let Some(mut manifest) = cached_manifest(&store, &prep_id)?
    {
        let command = build_solver_command(&case, options.mpi_procs_env.as_deref()).to_argv();
        if manifest.command != command {
            tracing::info!(prep_id = %prep_id, "solver command changed; updating cached preparation");
            manifest.command = command;
            store.save_manifest(&manifest)?;
        }
        tracing::info!(prep_id = %prep_id, "reusing cached preparation");
        emit_progress(
            &mut progress_cb,
            PrepStage::Completed,
            started,
            Some("loaded from cache".to_string()),
        );
        return Ok(PrepareResponse {
            prep_id,
            manifest,
            loaded_from_cache: true,
        });
    }

    emit_progress(&mut progress_cb, PrepStage::Sizing, started, None);
    let sizing = sizing_service::size_case(&case)?;

    let outputs = write_outputs(&case, sizing.as_ref(), request.analysis_dir, &mut progress_cb, started)?;

    emit_progress(&mut progress_cb, PrepStage::BuildingCommand, started, None);
    let command = build_solver_command(&case, options.mpi_procs_env.as_deref());
    tracing::info!(command = %command, "solver command");

    let manifest = PrepManifest {
        prep_id: prep_id.clone(),
        case_name: case.name.clone(),
        timestamp: timestamp_now(),
        tool_version: options.tool_version.clone(),
        sizing,
        outputs,
        command: command.to_argv(),
    };

    emit_progress(&mut progress_cb, PrepStage::SavingManifest, started, None);
    store.save_manifest(&manifest)?;

    emit_progress(&mut progress_cb, PrepStage::Completed, started, None);
    Ok(PrepareResponse {
        prep_id,
        manifest,
        loaded_from_cache: false,
    })
}

/// A stored manifest counts only while every file it lists is still on disk.
fn cached_manifest(store: &PrepStore, prep_id: &str) -> AppResult<Option<PrepManifest>> {
    if !store.has_prep(prep_id) {
        return Ok(None);
    }
    let manifest = store.load_manifest(prep_id)?;
    if manifest.outputs.all_present() {
        Ok(Some(manifest))
    } else {
        tracing::info!(prep_id = %prep_id, "cached outputs missing; preparing again");
        Ok(None)
    }
}

fn write_outputs(
    case: &CaseConfig,
    sizing: Option<&ac_sizing::SizingOutcome>,
    analysis_dir: &Path,
    progress_cb: &mut Option<&mut dyn FnMut(PrepProgressEvent)>,
    started: Instant,
) -> AppResult<PrepOutputs> {
    std::fs::create_dir_all(analysis_dir).map_err(|source| AppError::FileWrite {
        path: analysis_dir.to_path_buf(),
        source,
    })?;

    emit_progress(progress_cb, PrepStage::WritingMeshInputs, started, None);
    let mesh_path = analysis_dir.join(MESH_INPUTS_FILE);
    write_mesh_inputs(&mesh_path, &mesh_generator_inputs(case, sizing))?;

    emit_progress(progress_cb, PrepStage::WritingSolverInputs, started, None);
    let solver_path = analysis_dir.join(SOLVER_INPUTS_FILE);
    write_solver_inputs(&solver_path, &solver_inputs(case))?;

    emit_progress(progress_cb, PrepStage::WritingNamelist, started, None);
    let nml_path = analysis_dir.join(NAMELIST_FILE);
    write_namelist(&nml_path, &render_namelist(case), case.solver.overwrite_nml)?;

    emit_progress(progress_cb, PrepStage::StagingSpecies, started, None);
    let staging = species::stage_species(case, analysis_dir)?;

    Ok(PrepOutputs {
        analysis_dir: analysis_dir.to_path_buf(),
        mesh_inputs: mesh_path,
        solver_inputs: solver_path,
        namelist: nml_path,
        species_copied: staging.copied,
        species_missing: staging
            .missing
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    })
}

/// Preparations recorded next to a case file, oldest first.
pub fn list_preps(case_path: &Path) -> AppResult<Vec<PrepManifest>> {
    let case = case_service::load_case(case_path, LoadOptions::default())?;
    let store = PrepStore::for_case(case_path)?;
    Ok(store.list_preps(&case.name)?)
}

pub fn load_prep(case_path: &Path, prep_id: &str) -> AppResult<PrepManifest> {
    let store = PrepStore::for_case(case_path)?;
    Ok(store.load_manifest(prep_id)?)
}

/// Run the solver in `workdir` and wait for it.
pub fn launch_solver(command: &SolverCommand, workdir: &Path) -> AppResult<()> {
    tracing::info!(command = %command, workdir = %workdir.display(), "launching solver");
    let status = command
        .to_command(workdir)
        .status()
        .map_err(|e| AppError::SolverLaunch {
            message: format!("failed to start '{}': {e}", command.program),
        })?;

    if !status.success() {
        return Err(AppError::SolverLaunch {
            message: format!("'{command}' exited with {status}"),
        });
    }
    Ok(())
}

/// Analysis directory used when none is given: `<case dir>/analysis`.
pub fn default_analysis_dir(case_path: &Path) -> PathBuf {
    case_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("analysis")
}
