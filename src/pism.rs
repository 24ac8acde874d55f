//! Launching the PISM solver on the generated input.
//!
//! The harness only constructs the invocation (grid size, fixed numerical
//! options, file paths) and launches `pismr` as a subprocess, optionally
//! under an MPI launcher. Exit status is the sole success signal; stdout
//! and stderr are captured so a failure carries diagnostic context. A
//! failed run is never retried.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Error type for solver invocation.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The solver executable is absent.
    #[error("PISM executable not found at '{}'; build PISM and pass its bin directory with --pism_path", .0.display())]
    ToolMissing(PathBuf),

    /// The subprocess could not be launched.
    #[error("failed to launch PISM: {0}")]
    Launch(#[from] std::io::Error),

    /// The solver exited with a non-zero status.
    #[error("PISM exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Per-run invocation parameters.
///
/// The numerical options are fixed by the verification test definition;
/// only the grid size and file paths vary between runs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Horizontal grid size (both axes).
    pub mx: usize,
    /// Vertical grid size.
    pub mz: usize,
    /// Vertical extent [m].
    pub lz: f64,
    /// Run length [model years].
    pub run_length_years: f64,
    /// Maximum time step [model years].
    pub max_dt_years: f64,
    /// Configuration-override file.
    pub config_override: PathBuf,
    /// Bootstrap input file.
    pub boot_file: PathBuf,
    /// Output file written by the solver.
    pub output_file: PathBuf,
}

impl RunOptions {
    /// Options for a Test P run at the given grid size.
    pub fn new(
        mx: usize,
        config_override: impl Into<PathBuf>,
        boot_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mx,
            mz: 11,
            lz: 4000.0,
            run_length_years: 0.08333333333333,
            max_dt_years: 0.01,
            config_override: config_override.into(),
            boot_file: boot_file.into(),
            output_file: output_file.into(),
        }
    }
}

/// Runs `pismr` as an external process.
#[derive(Debug, Clone)]
pub struct PismRunner {
    pism_path: PathBuf,
    mpiexec: Option<String>,
}

impl PismRunner {
    /// A runner looking for `pismr` in the given directory.
    pub fn new(pism_path: impl Into<PathBuf>) -> Self {
        Self {
            pism_path: pism_path.into(),
            mpiexec: None,
        }
    }

    /// Prefix the invocation with an MPI launcher, e.g. `"mpiexec -n 4"`.
    pub fn with_mpiexec(mut self, mpiexec: Option<String>) -> Self {
        self.mpiexec = mpiexec;
        self
    }

    /// Path to the solver executable.
    pub fn executable(&self) -> PathBuf {
        self.pism_path.join("pismr")
    }

    /// The full argv of the invocation, launcher included.
    pub fn command(&self, opts: &RunOptions) -> Vec<String> {
        let mut argv: Vec<String> = Vec::new();

        if let Some(mpiexec) = &self.mpiexec {
            argv.extend(mpiexec.split_whitespace().map(String::from));
        }

        argv.push(self.executable().display().to_string());
        argv.push("-config_override".to_string());
        argv.push(opts.config_override.display().to_string());
        argv.push("-boot_file".to_string());
        argv.push(opts.boot_file.display().to_string());
        argv.push("-Mx".to_string());
        argv.push(opts.mx.to_string());
        argv.push("-My".to_string());
        argv.push(opts.mx.to_string());
        argv.push("-Mz".to_string());
        argv.push(opts.mz.to_string());
        argv.push("-Lz".to_string());
        argv.push(opts.lz.to_string());
        argv.push("-hydrology".to_string());
        argv.push("distributed".to_string());
        argv.push("-report_mass_accounting".to_string());
        argv.push("-y".to_string());
        argv.push(opts.run_length_years.to_string());
        argv.push("-max_dt".to_string());
        argv.push(opts.max_dt_years.to_string());
        argv.push("-no_mass".to_string());
        argv.push("-energy".to_string());
        argv.push("none".to_string());
        argv.push("-stress_balance".to_string());
        argv.push("ssa+sia".to_string());
        argv.push("-ssa_dirichlet_bc".to_string());
        argv.push("-o".to_string());
        argv.push(opts.output_file.display().to_string());

        argv
    }

    /// Run the solver, blocking until it exits.
    pub fn run(&self, opts: &RunOptions) -> Result<(), SolverError> {
        let executable = self.executable();
        if !executable.is_file() {
            return Err(SolverError::ToolMissing(executable));
        }

        let argv = self.command(opts);
        info!("{}", argv.join(" "));

        let output = Command::new(&argv[0]).args(&argv[1..]).output()?;

        debug!(
            "PISM stdout:\n{}",
            String::from_utf8_lossy(&output.stdout).trim_end()
        );

        if !output.status.success() {
            return Err(SolverError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Check that a tool directory plausibly contains the solver.
pub fn solver_present(pism_path: &Path) -> bool {
    pism_path.join("pismr").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_command_construction() {
        let runner = PismRunner::new("/opt/pism/bin");
        let opts = RunOptions::new(51, "testPconfig.nc", "inputforP.nc", "end.nc");
        let argv = runner.command(&opts);

        assert_eq!(argv[0], "/opt/pism/bin/pismr");
        let joined = argv.join(" ");
        assert!(joined.contains("-config_override testPconfig.nc"));
        assert!(joined.contains("-boot_file inputforP.nc"));
        assert!(joined.contains("-Mx 51 -My 51 -Mz 11 -Lz 4000"));
        assert!(joined.contains("-hydrology distributed"));
        assert!(joined.contains("-y 0.08333333333333"));
        assert!(joined.contains("-stress_balance ssa+sia -ssa_dirichlet_bc"));
        assert!(joined.ends_with("-o end.nc"));
    }

    #[test]
    fn test_mpiexec_prefix() {
        let runner =
            PismRunner::new("/opt/pism/bin").with_mpiexec(Some("mpiexec -n 4".to_string()));
        let opts = RunOptions::new(201, "c.nc", "i.nc", "o.nc");
        let argv = runner.command(&opts);

        assert_eq!(argv[0], "mpiexec");
        assert_eq!(argv[1], "-n");
        assert_eq!(argv[2], "4");
        assert_eq!(argv[3], "/opt/pism/bin/pismr");
    }

    #[test]
    fn test_missing_executable() {
        let dir = tempdir().unwrap();
        let runner = PismRunner::new(dir.path());
        let opts = RunOptions::new(51, "c.nc", "i.nc", "o.nc");

        let err = runner.run(&opts).unwrap_err();
        assert!(matches!(err, SolverError::ToolMissing(_)));
        assert!(!solver_present(dir.path()));
    }
}
