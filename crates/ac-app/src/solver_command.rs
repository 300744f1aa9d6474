//! Solver launch command construction.

use ac_case::CaseConfig;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Environment variable that overrides `solver.mpi_procs`.
pub const MPI_PROCS_ENV: &str = "FUN3D_MPI_PROCS";

const MPI_LAUNCHER: &str = "mpirun";

/// A program and its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SolverCommand {
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Inverse of [`SolverCommand::to_argv`]; `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn to_command(&self, workdir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(workdir);
        cmd
    }
}

impl fmt::Display for SolverCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Process count: the environment value when it is a positive integer, else the configured one.
pub fn resolve_mpi_procs(configured: u32, env_value: Option<&str>) -> u32 {
    match env_value.map(|v| v.trim().parse::<u32>()) {
        Some(Ok(n)) if n > 0 => n,
        Some(_) => {
            tracing::warn!(
                var = MPI_PROCS_ENV,
                value = env_value.unwrap_or_default(),
                fallback = configured,
                "ignoring invalid process count"
            );
            configured
        }
        None => configured,
    }
}

/// Build the launch command. `env_procs` is the raw value of [`MPI_PROCS_ENV`], if set.
pub fn build_solver_command(case: &CaseConfig, env_procs: Option<&str>) -> SolverCommand {
    let solver = &case.solver;
    let np = resolve_mpi_procs(solver.mpi_procs, env_procs);

    let mut args = vec![
        "-np".to_string(),
        np.to_string(),
        solver.nodet_path.display().to_string(),
        "--animation_freq".to_string(),
        "-1".to_string(),
        "--volume_animation_freq".to_string(),
        "-1".to_string(),
    ];
    if let Some(k) = solver.freeze_limiter
        && k > 0
    {
        args.push("--freeze_limiter".to_string());
        args.push(k.to_string());
    }

    SolverCommand {
        program: MPI_LAUNCHER.to_string(),
        args,
    }
}

/// Read [`MPI_PROCS_ENV`] from the process environment.
pub fn env_mpi_procs() -> Option<String> {
    std::env::var(MPI_PROCS_ENV).ok()
}
