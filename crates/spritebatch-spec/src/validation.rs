//! Project validation.
//!
//! Checks everything a run would otherwise only discover at render time, so a
//! project can be rejected before Blender is started.

use std::collections::HashSet;

use crate::error::{
    ErrorCode, SpriteError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::project::{ObjectKind, Project};

/// Validates a project and returns a validation result.
///
/// # Example
/// ```
/// use spritebatch_spec::{BatchSettings, ObjectKind, Project, SceneObject, SpriteConfig};
/// use spritebatch_spec::validation::validate_project;
///
/// let project = Project::new(BatchSettings::new("Rig", 1, 8))
///     .object(SceneObject::new("Rig", ObjectKind::Empty).sprite(SpriteConfig::new("TROO")))
///     .object(
///         SceneObject::new("Body", ObjectKind::Mesh)
///             .selected(true)
///             .sprite(SpriteConfig::new("TROO")),
///     );
///
/// assert!(validate_project(&project).is_ok());
/// ```
pub fn validate_project(project: &Project) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_frame_range(project, &mut result);
    validate_object_names(project, &mut result);
    validate_target(project, &mut result);
    validate_selection(project, &mut result);

    result
}

fn validate_frame_range(project: &Project, result: &mut ValidationResult) {
    let range = project.settings.frame_range();
    match range.validate() {
        Err(err @ SpriteError::FrameRangeTooLong { .. }) => {
            result.add_error(ValidationError::with_path(
                ErrorCode::FrameRangeTooLong,
                err.to_string(),
                "settings.frame_end",
            ));
        }
        Err(err) => {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidFrameRange,
                err.to_string(),
                "settings.frame_start",
            ));
        }
        Ok(()) if range.is_empty() => {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::EmptyFrameRange,
                format!(
                    "end frame {} is before start frame {}; nothing will be rendered",
                    range.end, range.start
                ),
                "settings.frame_end",
            ));
        }
        Ok(()) => {}
    }
}

fn validate_object_names(project: &Project, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for (i, object) in project.objects.iter().enumerate() {
        if !seen.insert(object.name.as_str()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateObjectName,
                format!("duplicate object name '{}'", object.name),
                format!("objects[{}].name", i),
            ));
        }
    }
}

fn validate_target(project: &Project, result: &mut ValidationResult) {
    let target = &project.settings.target;
    let Some((i, object)) = project
        .objects
        .iter()
        .enumerate()
        .find(|(_, o)| &o.name == target)
    else {
        result.add_error(ValidationError::with_path(
            ErrorCode::TargetNotFound,
            format!("Target object '{}' not found!", target),
            "settings.target",
        ));
        return;
    };

    // Rotation flags are read from the target on every frame.
    if object.sprite.is_none() {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingSpriteConfig,
            format!("target object '{}' has no sprite configuration", target),
            format!("objects[{}].sprite", i),
        ));
    }
}

fn validate_selection(project: &Project, result: &mut ValidationResult) {
    let mut any_selected = false;

    for (i, object) in project.objects.iter().enumerate() {
        if !object.selected {
            continue;
        }
        any_selected = true;

        if object.kind != ObjectKind::Mesh {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::SelectedNotMesh,
                format!("'{}' is not a mesh object and will be skipped", object.name),
                format!("objects[{}].kind", i),
            ));
            continue;
        }

        match &object.sprite {
            None => result.add_error(ValidationError::with_path(
                ErrorCode::MissingSpriteConfig,
                format!("selected mesh '{}' has no sprite configuration", object.name),
                format!("objects[{}].sprite", i),
            )),
            Some(config) => {
                if let Err(err) = config.validated_name() {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::InvalidSpriteName,
                        err.to_string(),
                        format!("objects[{}].sprite.sprite_name", i),
                    ));
                }
            }
        }
    }

    if !any_selected {
        result.add_warning(ValidationWarning::new(
            WarningCode::NoSelectedObjects,
            "no objects are selected; nothing will be rendered",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{BatchSettings, SceneObject};
    use crate::sprite::SpriteConfig;
    use pretty_assertions::assert_eq;

    fn valid_project() -> Project {
        Project::new(BatchSettings::new("Rig", 1, 8))
            .object(SceneObject::new("Rig", ObjectKind::Empty).sprite(SpriteConfig::new("TROO")))
            .object(
                SceneObject::new("Body", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("TROO")),
            )
    }

    fn error_codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_valid_project() {
        let result = validate_project(&valid_project());
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_target() {
        let mut project = valid_project();
        project.settings.target = "Nope".to_string();
        let result = validate_project(&project);
        assert_eq!(error_codes(&result), vec![ErrorCode::TargetNotFound]);
        assert_eq!(result.errors[0].path.as_deref(), Some("settings.target"));
    }

    #[test]
    fn test_frame_range_too_long() {
        let mut project = valid_project();
        project.settings.frame_end = 261;
        let result = validate_project(&project);
        assert_eq!(error_codes(&result), vec![ErrorCode::FrameRangeTooLong]);
    }

    #[test]
    fn test_start_frame_below_one() {
        let mut project = valid_project();
        project.settings.frame_start = 0;
        let result = validate_project(&project);
        assert_eq!(error_codes(&result), vec![ErrorCode::InvalidFrameRange]);
    }

    #[test]
    fn test_empty_range_warns() {
        let mut project = valid_project();
        project.settings.frame_start = 9;
        let result = validate_project(&project);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::EmptyFrameRange);
    }

    #[test]
    fn test_bad_sprite_name_on_selected_mesh() {
        let mut project = valid_project();
        project.objects[1].sprite = Some(SpriteConfig::new("TROOP"));
        let result = validate_project(&project);
        assert_eq!(error_codes(&result), vec![ErrorCode::InvalidSpriteName]);
        assert_eq!(
            result.errors[0].path.as_deref(),
            Some("objects[1].sprite.sprite_name")
        );
    }

    #[test]
    fn test_selected_non_mesh_warns() {
        let project = valid_project().object(SceneObject::new("Lamp", ObjectKind::Light).selected(true));
        let result = validate_project(&project);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::SelectedNotMesh);
    }

    #[test]
    fn test_duplicate_names_and_missing_configs() {
        let project = Project::new(BatchSettings::new("Rig", 1, 8))
            .object(SceneObject::new("Rig", ObjectKind::Empty))
            .object(SceneObject::new("Rig", ObjectKind::Mesh).selected(true));
        let result = validate_project(&project);
        assert_eq!(
            error_codes(&result),
            vec![
                ErrorCode::DuplicateObjectName,
                ErrorCode::MissingSpriteConfig,
                ErrorCode::MissingSpriteConfig,
            ]
        );
    }

    #[test]
    fn test_nothing_selected_warns() {
        let mut project = valid_project();
        project.objects[1].selected = false;
        let result = validate_project(&project);
        assert_eq!(result.warnings[0].code, WarningCode::NoSelectedObjects);
    }
}
