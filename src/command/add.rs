use crate::error::{LomanError, Result};
use crate::manifest::{LocalManifest, ManifestDocument};
use crate::validation::{resolve_project, validate_project_name};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[clap(verbatim_doc_comment)]
pub struct AddArgs {
    /// Name of the project to add, as listed in the default manifest
    pub project: String,

    /// Requested checkout path
    ///
    /// Ignored for workon adds: the path always comes from the default
    /// manifest, so local checkouts cannot drift from it.
    pub path: Option<String>,

    /// Mark the project as checked out for local development
    #[arg(long, short = 'w')]
    pub workon: bool,

    /// Path to the local manifest to edit
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub file: PathBuf,

    /// Path to the default manifest used to resolve project paths
    #[arg(long = "default", short = 'd', value_name = "PATH")]
    pub default: PathBuf,
}

pub fn execute(args: AddArgs) -> Result<()> {
    if !args.workon {
        return Err(LomanError::WorkonRequired);
    }
    validate_project_name(&args.project)?;

    let default_text = fs::read_to_string(&args.default)?;
    let default_doc = LocalManifest::new(Some(&default_text)).parse()?;
    let source = resolve_project(&default_doc, &args.project)?;

    if let Some(requested) = &args.path
        && requested != &source.path
    {
        log::warn!(
            "Ignoring requested path '{}' for '{}'; the default manifest pins it to '{}'",
            requested,
            args.project,
            source.path
        );
    }

    let mut local = load_local_manifest(&args.file)?;
    let already_present = local.get_project(&source.name).is_some();

    if !local.add_workon_project_element(source) {
        return Err(conflict_error(&local, source));
    }

    // Rewritten even on an idempotent re-add, which canonicalizes formatting.
    crate::fs::write_atomic(&args.file, &format!("{local}\n"))?;

    if already_present {
        println!(
            "{} {} already tracked at {}",
            "✓".green().bold(),
            source.name.yellow(),
            source.path
        );
    } else {
        println!(
            "{} {} → {}",
            "✓ Added".green().bold(),
            source.name.yellow(),
            source.path.green()
        );
    }

    Ok(())
}

/// Loads the local manifest, starting from the empty skeleton when the file
/// does not exist yet.
fn load_local_manifest(path: &Path) -> Result<ManifestDocument> {
    match fs::read_to_string(path) {
        Ok(text) => LocalManifest::new(Some(&text)).parse(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(
                "Local manifest {} does not exist yet, starting empty",
                path.display()
            );
            LocalManifest::new(None).parse()
        }
        Err(e) => Err(e.into()),
    }
}

/// Maps the core's refusal onto the specific conflict for the error message.
fn conflict_error(
    local: &ManifestDocument,
    source: &crate::manifest::ProjectElement,
) -> LomanError {
    if let Some(existing) = local.get_project(&source.name) {
        return LomanError::PathConflict {
            name: source.name.clone(),
            existing: existing.path.clone(),
            requested: source.path.clone(),
        };
    }
    let owner = local
        .projects()
        .iter()
        .find(|p| p.path == source.path)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    LomanError::PathInUse {
        path: source.path.clone(),
        owner,
    }
}
