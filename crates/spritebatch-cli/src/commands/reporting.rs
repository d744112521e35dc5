//! Shared loading and console output for the run commands.

use anyhow::Result;
use colored::Colorize;
use spritebatch_spec::{validate_project, ObjectOutcome, Project, RunReport, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, JsonWarning, RunOutput};
use crate::input::load_project;

/// A project that is ready to run, or the exit code it was rejected with.
pub(super) enum Prepared {
    Ready {
        project: Project,
        warnings: Vec<JsonWarning>,
    },
    Rejected(ExitCode),
}

/// Loads and validates a project for `plan` or `render`.
///
/// Problems are printed in the requested format; the caller only has to
/// return the exit code.
pub(super) fn load_validated(project_path: &str, json_output: bool) -> Result<Prepared> {
    let project = match load_project(Path::new(project_path)) {
        Ok(project) => project,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::PROJECT_LOAD, format!("{:#}", e));
            print_json(&RunOutput::failure(vec![error], Vec::new()))?;
            return Ok(Prepared::Rejected(ExitCode::from(1)));
        }
        Err(e) => return Err(e),
    };

    let validation = validate_project(&project);
    let warnings: Vec<JsonWarning> = validation.warnings.iter().map(JsonWarning::from).collect();

    if !validation.is_ok() {
        if json_output {
            let errors = validation.errors.iter().map(JsonError::from).collect();
            print_json(&RunOutput::failure(errors, warnings))?;
        } else {
            print_validation_results(&validation);
            println!(
                "\n{} Project has {} error(s)",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(Prepared::Rejected(ExitCode::from(1)));
    }

    if !json_output && !validation.warnings.is_empty() {
        print_validation_results(&validation);
    }

    Ok(Prepared::Ready { project, warnings })
}

pub(super) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}

/// Prints per-object outcomes.
pub(super) fn print_object_outcomes(report: &RunReport) {
    println!("\n{}", "Objects:".cyan().bold());
    for object in &report.objects {
        match &object.outcome {
            ObjectOutcome::Rendered { shots } => {
                println!("  {} {} ({} shots)", "+".green(), object.name, shots);
            }
            ObjectOutcome::Skipped { code, reason } => {
                println!(
                    "  {} {} [{}]: {}",
                    "-".yellow(),
                    object.name,
                    code.yellow(),
                    reason
                );
            }
            ObjectOutcome::Failed {
                shots,
                code,
                reason,
            } => {
                println!(
                    "  {} {} [{}] after {} shots: {}",
                    "x".red(),
                    object.name,
                    code.red(),
                    shots,
                    reason
                );
            }
        }
    }
}
