//! Validate command implementation
//!
//! Loads a project file and checks it without rendering anything.

use anyhow::Result;
use colored::Colorize;
use spritebatch_spec::validate_project;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, print_json, JsonError, ValidateOutput};
use super::reporting::print_validation_results;
use crate::input::load_project;

/// Run the validate command
///
/// # Arguments
/// * `project_path` - Path to the project file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(project_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(project_path)
    } else {
        run_human(project_path)
    }
}

fn run_human(project_path: &str) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Validating:".cyan().bold(), project_path);

    let project = load_project(Path::new(project_path))?;
    println!(
        "{} {} (frames {}..={}, {} selected)",
        "Target:".dimmed(),
        project.settings.target,
        project.settings.frame_start,
        project.settings.frame_end,
        project.selected_objects().count()
    );

    let result = validate_project(&project);
    let duration_ms = start.elapsed().as_millis();
    print_validation_results(&result);

    if result.is_ok() {
        println!(
            "\n{} Project is valid ({}ms)",
            "SUCCESS".green().bold(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Project has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            result.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(project_path: &str) -> Result<ExitCode> {
    let output = match load_project(Path::new(project_path)) {
        Ok(project) => ValidateOutput::from_result(&validate_project(&project)),
        Err(e) => ValidateOutput::failure(JsonError::new(
            error_codes::PROJECT_LOAD,
            format!("{:#}", e),
        )),
    };
    print_json(&output)?;

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(dir: &tempfile::TempDir, sprite_name: &str) -> String {
        let path = dir.path().join("project.json");
        let json = format!(
            r#"{{
                "settings": {{ "target": "Rig", "frame_start": 1, "frame_end": 8 }},
                "objects": [
                    {{ "name": "Rig", "kind": "empty", "sprite": {{ "sprite_name": "TROO" }} }},
                    {{ "name": "Body", "kind": "mesh", "selected": true,
                       "sprite": {{ "sprite_name": "{}" }} }}
                ]
            }}"#,
            sprite_name
        );
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_valid_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_project(&dir, "TROO");
        assert_eq!(run(&path, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&path, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_invalid_sprite_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_project(&dir, "TROOP");
        assert_eq!(run(&path, false).unwrap(), ExitCode::from(1));
        assert_eq!(run(&path, true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_missing_file() {
        assert!(run("does/not/exist.json", false).is_err());
        assert_eq!(run("does/not/exist.json", true).unwrap(), ExitCode::from(1));
    }
}
