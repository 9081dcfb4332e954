//! Build plan generation.
//!
//! A BuildPlan is the fully assembled command sequence for one build:
//! strictly linear, configure through optional test, one entry per
//! external invocation. Generation is pure; execution lives in
//! [`executor`](crate::builder::executor).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::builder::context::BuildContext;
use crate::builder::flags::{as_define_list, configure_flags};
use crate::core::descriptor::PackageDescriptor;
use crate::core::variant::VariantSet;

/// Pipeline phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Configure,
    Build,
    BuildExtension,
    Install,
    Test,
}

impl Phase {
    /// Status label shown while the phase runs.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Configure => "Configuring",
            Phase::Build => "Building",
            Phase::BuildExtension => "Building extension",
            Phase::Install => "Installing",
            Phase::Test => "Testing",
        }
    }
}

/// One external command in the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedCommand {
    /// Phase this command belongs to
    pub phase: Phase,

    /// Program name (resolved against PATH at execution time)
    pub program: String,

    /// Arguments
    pub args: Vec<String>,

    /// Working directory (None = current)
    pub cwd: Option<PathBuf>,
}

impl PlannedCommand {
    fn new(phase: Phase, program: &str, args: Vec<String>) -> Self {
        PlannedCommand {
            phase,
            program: program.to_string(),
            args,
            cwd: None,
        }
    }

    fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Display the command for logs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// A complete build plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Configure flags the plan was derived from
    pub configure_flags: Vec<String>,

    /// All commands in execution order
    pub commands: Vec<PlannedCommand>,
}

impl BuildPlan {
    /// Generate the plan for the given variant state and context.
    pub fn generate(
        descriptor: &PackageDescriptor,
        variants: &VariantSet,
        ctx: &BuildContext,
    ) -> Self {
        let flags = configure_flags(descriptor, variants, ctx);
        let mut commands = Vec::new();

        // Configure
        let mut configure_args = vec![
            "-S".to_string(),
            ctx.source_dir.display().to_string(),
            "-B".to_string(),
            ctx.build_dir.display().to_string(),
        ];
        configure_args.extend(flags.iter().cloned());
        commands.push(PlannedCommand::new(Phase::Configure, "cmake", configure_args));

        // Build
        let mut build_args = vec!["--build".to_string(), ctx.build_dir.display().to_string()];
        if let Some(jobs) = ctx.jobs {
            build_args.push("--parallel".to_string());
            build_args.push(jobs.to_string());
        }
        if ctx.verbose {
            build_args.push("--verbose".to_string());
        }
        commands.push(PlannedCommand::new(Phase::Build, "cmake", build_args));

        // Build the Python extension in place, with the same defines as
        // the native configure so the two stay consistent.
        commands.push(
            PlannedCommand::new(
                Phase::BuildExtension,
                "python3",
                vec![
                    "setup.py".to_string(),
                    "build_ext".to_string(),
                    "-i".to_string(),
                    format!("--define={}", as_define_list(&flags)),
                ],
            )
            .in_dir(&ctx.source_dir),
        );

        // Install: the Python package first, then the native library.
        commands.push(
            PlannedCommand::new(
                Phase::Install,
                "pip",
                vec![
                    "install".to_string(),
                    "--no-deps".to_string(),
                    "--no-build-isolation".to_string(),
                    format!("--prefix={}", ctx.install_prefix.display()),
                    ".".to_string(),
                ],
            )
            .in_dir(&ctx.source_dir),
        );
        commands.push(PlannedCommand::new(
            Phase::Install,
            "cmake",
            vec![
                "--install".to_string(),
                ctx.build_dir.display().to_string(),
                "--prefix".to_string(),
                ctx.install_prefix.display().to_string(),
            ],
        ));

        // Post-install test hook, only when requested.
        if ctx.run_tests {
            commands.push(
                PlannedCommand::new(Phase::Test, "pytest", vec!["tests".to_string()])
                    .in_dir(&ctx.source_dir),
            );
        }

        BuildPlan {
            configure_flags: flags,
            commands,
        }
    }

    /// Commands belonging to one phase.
    pub fn phase_commands(&self, phase: Phase) -> Vec<&PlannedCommand> {
        self.commands.iter().filter(|c| c.phase == phase).collect()
    }

    /// Serialize the plan as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
