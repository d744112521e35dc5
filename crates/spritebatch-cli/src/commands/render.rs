//! Render command implementation
//!
//! Records a project's batch through the Blender host and replays it in a
//! Blender subprocess.

use anyhow::{Context, Result};
use colored::Colorize;
use spritebatch_backend_blender::{render_batch, BlenderHost, OrchestratorConfig};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{print_json, JsonError, RunOutput};
use super::reporting::{self, Prepared};

/// Run the render command
///
/// # Arguments
/// * `project_path` - Path to the project file
/// * `blend_file` - Blender scene the batch runs against
/// * `blender` - Optional Blender executable override
/// * `timeout_secs` - Optional subprocess timeout override
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if an object failed or Blender reported an error
pub fn run(
    project_path: &str,
    blend_file: &str,
    blender: Option<&str>,
    timeout_secs: Option<u64>,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let (project, warnings) = match reporting::load_validated(project_path, json_output)? {
        Prepared::Ready { project, warnings } => (project, warnings),
        Prepared::Rejected(code) => return Ok(code),
    };

    let mut host = BlenderHost::from_project(&project);
    let report = match render_batch(&mut host, &project.settings) {
        Ok(report) => report,
        Err(e) if json_output => {
            let error = JsonError::from_backend(&e);
            print_json(&RunOutput::failure(vec![error], warnings))?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e).context("Failed to record render batch"),
    };

    if !json_output {
        println!("{} {}", "Rendering:".cyan().bold(), project_path);
        println!(
            "{} {} shots, {} commands",
            "Batch:".dimmed(),
            report.shots,
            host.commands().len()
        );
    }

    let mut shots_rendered = None;
    if report.shots > 0 {
        let mut config = OrchestratorConfig::default();
        if let Some(path) = blender {
            config = config.blender_path(path);
        }
        if let Some(secs) = timeout_secs {
            config = config.timeout_secs(secs);
        }

        match host.execute(Path::new(blend_file), config) {
            Ok(blender_report) => shots_rendered = blender_report.shots_rendered,
            Err(e) if json_output => {
                let error = JsonError::from_backend(&e);
                let mut output = RunOutput::failure(vec![error], warnings);
                output.report = Some(report);
                print_json(&output)?;
                return Ok(ExitCode::from(1));
            }
            Err(e) => return Err(e).context("Blender render failed"),
        }
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    let ok = report.is_ok();

    if json_output {
        let mut output = RunOutput::success(report, warnings);
        output.shots_rendered = shots_rendered;
        output.duration_ms = Some(duration_ms);
        print_json(&output)?;
    } else {
        reporting::print_object_outcomes(&report);
        if ok {
            println!(
                "\n{} Rendered {} shots ({}ms)",
                "SUCCESS".green().bold(),
                shots_rendered.map_or(report.shots, |n| n as usize),
                duration_ms
            );
        } else {
            println!(
                "\n{} Some objects failed ({}ms)",
                "FAILED".red().bold(),
                duration_ms
            );
        }
    }

    if ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
