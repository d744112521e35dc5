//! Plan command implementation
//!
//! Dry-runs a project through the in-memory host and lists every still a
//! render would write.

use anyhow::{Context, Result};
use colored::Colorize;
use spritebatch_backend_blender::{MemoryHost, RunController};
use spritebatch_spec::RunReport;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, RunOutput};
use super::reporting::{self, Prepared};

/// Run the plan command
///
/// # Arguments
/// * `project_path` - Path to the project file
/// * `json_output` - Whether to output machine-readable JSON
/// * `out` - Optional file the run report (with every job) is written to
///
/// # Returns
/// Exit code: 0 if every selected object planned, 1 otherwise
pub fn run(project_path: &str, json_output: bool, out: Option<&str>) -> Result<ExitCode> {
    let (project, warnings) = match reporting::load_validated(project_path, json_output)? {
        Prepared::Ready { project, warnings } => (project, warnings),
        Prepared::Rejected(code) => return Ok(code),
    };

    let mut host = MemoryHost::from_project(&project);
    let result = RunController::new(&mut host, project.settings.clone())
        .record_jobs(true)
        .run();

    let report = match result {
        Ok(report) => report,
        Err(e) if json_output => {
            let error = JsonError::from_backend(&e);
            print_json(&RunOutput::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e).context("Plan failed"),
    };

    if let Some(out) = out {
        match write_plan(&report, out) {
            Ok(()) => {}
            Err(e) if json_output => {
                let error = JsonError::new(error_codes::WRITE_OUTPUT, format!("{:#}", e));
                let mut output = RunOutput::failure(vec![error], warnings);
                output.report = Some(report);
                print_json(&output)?;
                return Ok(ExitCode::from(1));
            }
            Err(e) => return Err(e),
        }
    }

    let ok = report.is_ok();
    if json_output {
        print_json(&RunOutput::success(report, warnings))?;
    } else {
        print_plan(&report);
        if let Some(out) = out {
            println!("\n{} {}", "Plan written to:".dimmed(), out);
        }
    }

    if ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn write_plan(report: &RunReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize plan")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write plan: {}", path))
}

fn print_plan(report: &RunReport) {
    println!("{} {}", "Target:".cyan().bold(), report.target);
    println!(
        "\n{:>5}  {:>5}  {:>10}  {}",
        "frame".dimmed(),
        "angle".dimmed(),
        "radians".dimmed(),
        "file".dimmed()
    );
    for job in &report.jobs {
        println!(
            "{:>5}  {:>5}  {:>10.4}  {}",
            job.frame, job.angle_index, job.angle_radians, job.filename
        );
    }

    reporting::print_object_outcomes(report);
    println!("\n{} {} shots", "Planned".green().bold(), report.shots);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &tempfile::TempDir, frame_end: i32) -> String {
        let path = dir.path().join("project.json");
        let json = format!(
            r#"{{
                "settings": {{ "target": "Rig", "path": "out/", "frame_start": 1, "frame_end": {} }},
                "objects": [
                    {{ "name": "Rig", "kind": "empty", "sprite": {{ "sprite_name": "TEST" }} }},
                    {{ "name": "Body", "kind": "mesh", "selected": true,
                       "sprite": {{ "sprite_name": "TEST" }} }}
                ]
            }}"#,
            frame_end
        );
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_plan_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(&dir, 2);
        let out = dir.path().join("plan.json");
        let out = out.to_string_lossy().into_owned();

        assert_eq!(run(&project, false, Some(&out)).unwrap(), ExitCode::SUCCESS);

        let report: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report.shots, 16);
        assert_eq!(report.jobs.len(), 16);
        assert_eq!(report.jobs[0].filename, "out/TESTA1");
        assert_eq!(report.jobs[15].filename, "out/TESTB8");
    }

    #[test]
    fn test_unwritable_out_path() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(&dir, 1);
        let out = dir.path().join("missing").join("dir").join("plan.json");
        let out = out.to_string_lossy().into_owned();

        assert_eq!(run(&project, true, Some(&out)).unwrap(), ExitCode::from(1));

        let err = run(&project, false, Some(&out)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to write plan"));
    }

    #[test]
    fn test_plan_rejects_long_range() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(&dir, 261);
        assert_eq!(run(&project, false, None).unwrap(), ExitCode::from(1));
        assert_eq!(run(&project, true, None).unwrap(), ExitCode::from(1));
    }
}
