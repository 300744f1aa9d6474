//! Shared application service layer for aerocase.
//!
//! Turns a case file into mesher inputs, solver inputs, a namelist and a
//! launch command, and records each preparation next to the case.

pub mod case_service;
pub mod error;
pub mod mesh_inputs;
pub mod namelist;
pub mod prepare_service;
pub mod progress;
pub mod sizing_service;
pub mod solver_command;
pub mod solver_inputs;
pub mod species;

// Re-export key types for convenience
pub use case_service::{
    CaseSummary, load_case, migrate_case_file, parse_overrides, save_case, summarize, update_cases,
};
pub use error::{AppError, AppResult};
pub use mesh_inputs::{MeshGeneratorInputs, mesh_generator_inputs};
pub use namelist::{NamelistBlock, NamelistValue, namelist_blocks, render_namelist};
pub use prepare_service::{
    PrepareOptions, PrepareRequest, PrepareResponse, default_analysis_dir, launch_solver,
    list_preps, load_prep, prepare, prepare_with_progress,
};
pub use progress::{PrepProgressEvent, PrepStage};
pub use sizing_service::size_case;
pub use solver_command::{MPI_PROCS_ENV, SolverCommand, build_solver_command, resolve_mpi_procs};
pub use solver_inputs::{SolverInputs, solver_inputs};
pub use species::{SPECIES_FILES, SpeciesStaging, stage_species};
