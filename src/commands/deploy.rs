//! Deploy command implementation
//!
//! Parse → load config → validate every task → run each in order → summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::DeployConfig;
use crate::exec::{CommandRunner, DryRunRunner, SystemRunner};
use crate::tasks::{plan, run_plan, DeployContext, DeployReport, Task};
use crate::utils::paths::absolutize;
use crate::utils::terminal::{print_info, print_success, print_verbose, print_warning};

/// Run deployment tasks for the CardLab web project
#[derive(Args, Debug, Clone)]
pub struct DeployCommand {
    /// Tasks to run, in order (repeats run again)
    #[arg(value_enum, required = true, num_args = 1..)]
    pub tasks: Vec<Task>,

    /// Publish directory of the server build; required by every task
    #[arg(long, env = "CARDLAB_PUBLISH_DIR", value_name = "PATH")]
    pub publish_dir: Option<PathBuf>,

    /// Web project root holding Client/card-lab and Game/BasePacks/Assets
    #[arg(long, env = "CARDLAB_PROJECT_DIR", value_name = "PATH", default_value = ".")]
    pub project_dir: PathBuf,

    /// Configuration file [default: <project-dir>/deploy.toml when present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Stop with an error when a task's process fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl DeployCommand {
    /// Execute the deploy command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let report = if self.dry_run {
            self.run_with(&mut DryRunRunner, verbose)?
        } else {
            self.run_with(&mut SystemRunner, verbose)?
        };

        print_summary(&report, verbose);
        Ok(())
    }

    /// Run all tasks through the given runner
    pub fn run_with(&self, runner: &mut dyn CommandRunner, verbose: bool) -> Result<DeployReport> {
        let steps = plan(&self.tasks, self.publish_dir.as_deref())?;

        let project_dir = absolutize(&self.project_dir)?;
        let config = DeployConfig::load(&project_dir, self.config.as_deref())?;

        if self.dry_run {
            print_info("Dry run, no commands will be executed");
        }
        print_verbose(verbose, &format!("Project directory: {}", project_dir.display()));

        let ctx = DeployContext {
            project_dir,
            config,
            fail_fast: self.fail_fast,
            verbose,
        };

        run_plan(&steps, &ctx, runner)
    }
}

fn print_summary(report: &DeployReport, verbose: bool) {
    let total = report.steps.len();
    let failures = report.failures();

    println!();
    if failures == 0 {
        print_success(&format!("{} task(s) completed", total));
        return;
    }

    print_warning(&format!("{} of {} task(s) reported failure", failures, total));
    for step in report.steps.iter().filter(|s| !s.status.is_success()) {
        print_verbose(verbose, &format!("{}: {}", step.task, step.command));
    }
}
