use crate::error::{LomanError, Result};
use crate::manifest::{ManifestDocument, ProjectElement};

pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LomanError::InvalidName(
            name.to_string(),
            "cannot be empty".to_string(),
        ));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(LomanError::InvalidName(
            name.to_string(),
            "cannot contain whitespace".to_string(),
        ));
    }

    if name.contains('"') || name.contains('\'') {
        return Err(LomanError::InvalidName(
            name.to_string(),
            "cannot contain quotes".to_string(),
        ));
    }

    Ok(())
}

/// Resolves a project name against the default manifest.
///
/// The default manifest is the source of truth for name→path bindings; a
/// workon add is only allowed for projects it lists.
pub fn resolve_project<'a>(
    default: &'a ManifestDocument,
    name: &str,
) -> Result<&'a ProjectElement> {
    default
        .get_project(name)
        .ok_or_else(|| LomanError::ProjectNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::LocalManifest;

    #[test]
    fn name_validation() {
        assert!(validate_project_name("backend/auth-service").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("has space").is_err());
        assert!(validate_project_name("quo\"te").is_err());
    }

    #[test]
    fn resolve_against_default() {
        let mut default = LocalManifest::new(None).parse().unwrap();
        default.add_project("foo", "path/to/foo");
        assert_eq!(resolve_project(&default, "foo").unwrap().path, "path/to/foo");
        assert!(matches!(
            resolve_project(&default, "bar"),
            Err(LomanError::ProjectNotFound(_))
        ));
    }
}
