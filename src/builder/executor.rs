//! Sequential plan execution with progress reporting.
//!
//! Commands run one at a time, each blocking until its process exits.
//! The first non-zero exit aborts the pipeline; there are no retries
//! and no partial-success continuation.

use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::plan::{BuildPlan, PlannedCommand};
use crate::util::process::{require_tool, ProcessBuilder};

/// Build plan executor.
pub struct Executor {
    verbose: bool,
}

impl Executor {
    /// Create a new executor.
    pub fn new() -> Self {
        Executor { verbose: false }
    }

    /// Enable verbose output (disables the progress bar).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Execute a plan, failing fast on the first command error.
    pub fn execute(&self, plan: &BuildPlan) -> Result<()> {
        let start = Instant::now();

        let pb = if !self.verbose && plan.commands.len() > 1 {
            let pb = ProgressBar::new(plan.commands.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for command in &plan.commands {
            if let Some(ref pb) = pb {
                pb.set_message(command.phase.label());
            }
            if self.verbose {
                eprintln!("{:>12} {}", command.phase.label(), command.display());
            }

            self.run(command)?;

            if let Some(ref pb) = pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        eprintln!(
            "    Finished {} step(s) in {:.2}s",
            plan.commands.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }

    fn run(&self, command: &PlannedCommand) -> Result<()> {
        let program = require_tool(&command.program)?;

        tracing::debug!("{:?}: {}", command.phase, command.display());

        let mut builder = ProcessBuilder::new(&program).args(&command.args);
        if let Some(ref cwd) = command.cwd {
            builder = builder.cwd(cwd);
        }

        builder
            .status_checked()
            .with_context(|| format!("{} step failed", command.phase.label().to_lowercase()))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::plan::Phase;

    fn echo_plan() -> BuildPlan {
        BuildPlan {
            configure_flags: Vec::new(),
            commands: vec![PlannedCommand {
                phase: Phase::Configure,
                program: "echo".to_string(),
                args: vec!["configured".to_string()],
                cwd: None,
            }],
        }
    }

    #[test]
    fn test_execute_succeeds_on_zero_exit() {
        Executor::new().verbose(true).execute(&echo_plan()).unwrap();
    }

    #[test]
    fn test_execute_fails_on_missing_tool() {
        let plan = BuildPlan {
            configure_flags: Vec::new(),
            commands: vec![PlannedCommand {
                phase: Phase::Build,
                program: "slipway-no-such-tool".to_string(),
                args: Vec::new(),
                cwd: None,
            }],
        };
        let err = Executor::new().verbose(true).execute(&plan).unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[test]
    fn test_execute_fails_on_nonzero_exit() {
        let plan = BuildPlan {
            configure_flags: Vec::new(),
            commands: vec![PlannedCommand {
                phase: Phase::Test,
                program: "false".to_string(),
                args: Vec::new(),
                cwd: None,
            }],
        };
        let err = Executor::new().verbose(true).execute(&plan).unwrap_err();
        assert!(err.to_string().contains("testing step failed"));
    }
}
