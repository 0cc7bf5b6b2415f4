//! Deployment tasks
//!
//! A run goes through two passes. [`plan`] checks every requested task's
//! arguments up front and binds each one to its publish directory, so a
//! missing argument is reported before anything is spawned. [`run_plan`]
//! then executes the steps in order through a [`CommandRunner`].
//!
//! A subprocess that exits non-zero, or cannot be started, is reported and
//! the run continues. Only `fail_fast` turns that into an error.

pub mod build_vite;
pub mod compile_packs;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;

use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::exec::{CommandRunner, CommandSpec};
use crate::utils::paths::absolutize;
use crate::utils::terminal::{print_info, print_step, print_verbose, print_warning};
use crate::utils::tools::{command_exists, get_tool_hint};

/// A deployment task that can be requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Task {
    /// Build the Vite bundles into <publish-dir>/wwwroot
    #[value(name = "build_vite")]
    BuildVite,

    /// Compile the base game packs with the published application
    #[value(name = "compile_packs")]
    CompilePacks,
}

impl Task {
    pub fn name(self) -> &'static str {
        match self {
            Task::BuildVite => "build_vite",
            Task::CompilePacks => "compile_packs",
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Task::BuildVite => "Building Vite bundles...",
            Task::CompilePacks => "Compiling base game packs...",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A task whose arguments have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployStep {
    pub task: Task,
    pub publish_dir: PathBuf,
}

/// Everything a run needs besides the task list
#[derive(Debug, Clone)]
pub struct DeployContext {
    /// Web project root, absolute
    pub project_dir: PathBuf,
    pub config: DeployConfig,
    pub fail_fast: bool,
    pub verbose: bool,
}

/// How a single step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The process exited with code 0
    Succeeded,
    /// The process ran and exited non-zero
    Failed { exit_code: i32 },
    /// The process could not be started
    NotStarted { reason: String },
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }
}

/// Record of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub task: Task,
    pub command: String,
    pub status: StepStatus,
    pub duration: Duration,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    pub steps: Vec<StepReport>,
}

impl DeployReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| !s.status.is_success()).count()
    }
}

/// Check every task's arguments before anything runs
///
/// Every task reads from or writes to the publish directory. Tasks keep
/// their requested order, duplicates included.
pub fn plan(tasks: &[Task], publish_dir: Option<&Path>) -> Result<Vec<DeployStep>> {
    let publish_dir = publish_dir.map(absolutize).transpose()?;

    tasks
        .iter()
        .map(|&task| -> Result<DeployStep> {
            match &publish_dir {
                Some(dir) => Ok(DeployStep {
                    task,
                    publish_dir: dir.clone(),
                }),
                None => Err(DeployError::missing_argument("--publish-dir", task.name()).into()),
            }
        })
        .collect()
}

/// Build the command for a step, checking the files it depends on
pub fn command_for(step: &DeployStep, ctx: &DeployContext) -> Result<CommandSpec> {
    match step.task {
        Task::BuildVite => {
            build_vite::command(&ctx.project_dir, &step.publish_dir, &ctx.config.frontend)
        }
        Task::CompilePacks => {
            compile_packs::command(&ctx.project_dir, &step.publish_dir, &ctx.config.packs)
        }
    }
}

/// Execute planned steps in order
pub fn run_plan(
    steps: &[DeployStep],
    ctx: &DeployContext,
    runner: &mut dyn CommandRunner,
) -> Result<DeployReport> {
    let mut report = DeployReport::default();
    let total = steps.len();

    for (index, step) in steps.iter().enumerate() {
        print_step(index + 1, total, step.task.banner());

        let spec = command_for(step, ctx)?;
        print_verbose(ctx.verbose, &format!("$ {}", spec.display()));
        if let Some(cwd) = &spec.cwd {
            print_verbose(ctx.verbose, &format!("  in {}", cwd.display()));
        }

        let step_report = execute(step.task, &spec, runner);
        print_verbose(
            ctx.verbose,
            &format!("finished in {:.2}s", step_report.duration.as_secs_f64()),
        );

        match &step_report.status {
            StepStatus::Succeeded => {}
            StepStatus::Failed { exit_code } => {
                let message = format!("{} exited with code {}", spec.program, exit_code);
                if ctx.fail_fast {
                    return Err(DeployError::task_failed(step.task.name(), message).into());
                }
                print_warning(&format!("{}; continuing with the remaining tasks", message));
            }
            StepStatus::NotStarted { reason } => {
                if ctx.fail_fast {
                    return Err(DeployError::task_failed(step.task.name(), reason.clone()).into());
                }
                print_warning(reason);
                if !command_exists(&spec.program) {
                    print_info(get_tool_hint(&spec.program));
                }
            }
        }

        report.steps.push(step_report);
    }

    Ok(report)
}

fn execute(task: Task, spec: &CommandSpec, runner: &mut dyn CommandRunner) -> StepReport {
    let (status, duration) = match runner.run(spec) {
        Ok(result) if result.success => (StepStatus::Succeeded, result.duration),
        Ok(result) => (
            StepStatus::Failed {
                exit_code: result.exit_code,
            },
            result.duration,
        ),
        Err(err) => (
            StepStatus::NotStarted {
                reason: format!("{:#}", err),
            },
            Duration::ZERO,
        ),
    };

    StepReport {
        task,
        command: spec.display(),
        status,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;

    use anyhow::bail;
    use tempfile::TempDir;

    use crate::exec::CommandResult;

    /// Records every command and answers with a scripted exit code
    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<CommandSpec>,
        exit_codes: Vec<i32>,
        spawn_error: bool,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
            self.calls.push(spec.clone());
            if self.spawn_error {
                bail!("Failed to execute {}", spec.program);
            }
            let code = self.exit_codes.get(self.calls.len() - 1).copied().unwrap_or(0);
            Ok(CommandResult {
                success: code == 0,
                exit_code: code,
                duration: Duration::from_millis(5),
            })
        }
    }

    struct Fixture {
        _root: TempDir,
        project_dir: PathBuf,
        publish_dir: PathBuf,
    }

    fn fixture(with_dll: bool) -> Fixture {
        let root = TempDir::new().unwrap();
        let project_dir = root.path().join("web");
        let publish_dir = root.path().join("publish");
        fs::create_dir_all(project_dir.join("Client").join("card-lab")).unwrap();
        fs::create_dir_all(&publish_dir).unwrap();
        if with_dll {
            fs::write(publish_dir.join("CardLab.dll"), b"").unwrap();
        }
        Fixture {
            _root: root,
            project_dir,
            publish_dir,
        }
    }

    fn context(fx: &Fixture, fail_fast: bool) -> DeployContext {
        DeployContext {
            project_dir: fx.project_dir.clone(),
            config: DeployConfig::default(),
            fail_fast,
            verbose: false,
        }
    }

    #[test]
    fn test_plan_requires_publish_dir_for_every_task() {
        let err = plan(&[Task::BuildVite], None).unwrap_err();
        assert_eq!(err.to_string(), "--publish-dir is required for build_vite");

        let err = plan(&[Task::CompilePacks], None).unwrap_err();
        assert_eq!(err.to_string(), "--publish-dir is required for compile_packs");
    }

    #[test]
    fn test_plan_reports_first_missing_task() {
        let err = plan(&[Task::CompilePacks, Task::BuildVite], None).unwrap_err();
        assert!(err.to_string().ends_with("compile_packs"));
    }

    #[test]
    fn test_plan_keeps_order_and_duplicates() {
        let steps = plan(
            &[Task::CompilePacks, Task::BuildVite, Task::CompilePacks],
            Some(Path::new("/srv/publish")),
        )
        .unwrap();

        let tasks: Vec<Task> = steps.iter().map(|s| s.task).collect();
        assert_eq!(tasks, vec![Task::CompilePacks, Task::BuildVite, Task::CompilePacks]);
    }

    #[test]
    fn test_plan_makes_publish_dir_absolute() {
        let steps = plan(&[Task::BuildVite], Some(Path::new("out/publish"))).unwrap();
        assert!(steps[0].publish_dir.is_absolute());
        assert!(steps[0].publish_dir.ends_with("out/publish"));
    }

    #[test]
    fn test_missing_dll_runs_nothing() {
        let fx = fixture(false);
        let steps = plan(&[Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner::default();

        let err = run_plan(&steps, &context(&fx, false), &mut runner).unwrap_err();

        assert!(err.to_string().starts_with("No CardLab.dll found in publish directory"));
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_both_tasks_run_in_order_with_documented_arguments() {
        let fx = fixture(true);
        let steps = plan(&[Task::BuildVite, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner::default();

        let report = run_plan(&steps, &context(&fx, false), &mut runner).unwrap();

        assert_eq!(runner.calls.len(), 2);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.failures(), 0);

        let vite = &runner.calls[0];
        assert_eq!(vite.program, "npm");
        let mut expected = vec![
            OsString::from("run"),
            OsString::from("build"),
            OsString::from("--"),
            OsString::from("--outDir"),
        ];
        expected.push(fx.publish_dir.join("wwwroot").into_os_string());
        assert_eq!(vite.args, expected);
        assert_eq!(vite.cwd, Some(fx.project_dir.join("Client").join("card-lab")));

        let packs = &runner.calls[1];
        assert_eq!(packs.program, "dotnet");
        let expected = vec![
            fx.publish_dir.join("CardLab.dll").into_os_string(),
            OsString::from("--compile"),
            fx.project_dir.join("Game").join("BasePacks").join("Assets").into_os_string(),
        ];
        assert_eq!(packs.args, expected);
        assert_eq!(packs.cwd, None);
    }

    #[test]
    fn test_duplicate_task_runs_twice() {
        let fx = fixture(true);
        let steps = plan(&[Task::CompilePacks, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner::default();

        run_plan(&steps, &context(&fx, false), &mut runner).unwrap();

        assert_eq!(runner.calls.len(), 2);
        assert_eq!(runner.calls[0], runner.calls[1]);
    }

    #[test]
    fn test_failing_subprocess_is_not_fatal() {
        let fx = fixture(true);
        let steps = plan(&[Task::BuildVite, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner {
            exit_codes: vec![1, 0],
            ..Default::default()
        };

        let report = run_plan(&steps, &context(&fx, false), &mut runner).unwrap();

        assert_eq!(runner.calls.len(), 2);
        assert_eq!(report.failures(), 1);
        assert_eq!(report.steps[0].status, StepStatus::Failed { exit_code: 1 });
        assert!(report.steps[1].status.is_success());
    }

    #[test]
    fn test_spawn_failure_is_not_fatal() {
        let fx = fixture(true);
        let steps = plan(&[Task::BuildVite, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner {
            spawn_error: true,
            ..Default::default()
        };

        let report = run_plan(&steps, &context(&fx, false), &mut runner).unwrap();

        assert_eq!(runner.calls.len(), 2);
        assert_eq!(report.failures(), 2);
        assert!(matches!(report.steps[0].status, StepStatus::NotStarted { .. }));
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let fx = fixture(true);
        let steps = plan(&[Task::BuildVite, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner {
            exit_codes: vec![2],
            ..Default::default()
        };

        let err = run_plan(&steps, &context(&fx, true), &mut runner).unwrap_err();

        assert_eq!(runner.calls.len(), 1);
        assert_eq!(err.to_string(), "Task build_vite failed: npm exited with code 2");
    }

    #[test]
    fn test_config_overrides_programs() {
        let fx = fixture(true);
        let mut ctx = context(&fx, false);
        ctx.config.frontend.npm = "pnpm".to_string();
        ctx.config.packs.dotnet = "/opt/dotnet/dotnet".to_string();
        let steps = plan(&[Task::BuildVite, Task::CompilePacks], Some(&fx.publish_dir)).unwrap();
        let mut runner = RecordingRunner::default();

        run_plan(&steps, &ctx, &mut runner).unwrap();

        assert_eq!(runner.calls[0].program, "pnpm");
        assert_eq!(runner.calls[1].program, "/opt/dotnet/dotnet");
    }

    #[test]
    fn test_task_names() {
        assert_eq!(Task::BuildVite.to_string(), "build_vite");
        assert_eq!(Task::from_str("compile_packs", false).unwrap(), Task::CompilePacks);
        assert!(Task::from_str("compile-packs", false).is_err());
    }
}
