//! Local manifest parsing and editing.
//!
//! A local manifest is a git-repo style XML document listing the projects a
//! developer has layered on top of the default manifest:
//!
//! ```xml
//! <?xml version='1.0' encoding='UTF-8'?>
//! <manifest>
//! <project name="foo" path="path/to/foo" workon="True" />
//! </manifest>
//! ```
//!
//! Only this narrow shape is supported: a `<manifest>` root with zero or more
//! self-contained `<project>` children. [`LocalManifest`] holds the raw text;
//! [`LocalManifest::parse`] consumes it and yields a [`ManifestDocument`],
//! so lookups and edits are only reachable on parsed input.

use crate::error::{LomanError, Result};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use std::fmt;

/// Declaration emitted at the top of every serialized manifest, whether or
/// not the input carried one.
const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>\n";

/// Attribute value marking a project as checked out for local development.
pub const WORKON_VALUE: &str = "True";

/// Skeleton used when no manifest text is supplied.
const EMPTY_MANIFEST: &str = "<manifest>\n</manifest>";

/// One `<project>` entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectElement {
    /// Repository name, unique within a manifest.
    pub name: String,

    /// Checkout path relative to the repo root.
    pub path: String,

    /// `"True"` when the project is checked out for local development.
    pub workon: Option<String>,
}

impl ProjectElement {
    /// Creates a project entry without a workon marker.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            workon: None,
        }
    }

    /// Returns true if this project is marked for local development.
    pub fn is_workon(&self) -> bool {
        self.workon.as_deref() == Some(WORKON_VALUE)
    }
}

/// Unparsed manifest text.
///
/// The raw text is held until [`parse`](Self::parse) consumes it. There is no
/// way to query or edit an unparsed manifest, and no way to parse one twice.
#[derive(Debug, Clone)]
pub struct LocalManifest {
    text: String,
}

impl LocalManifest {
    /// Wraps manifest text for parsing. `None` means the empty
    /// `<manifest></manifest>` skeleton.
    pub fn new(text: Option<&str>) -> Self {
        Self {
            text: text.unwrap_or(EMPTY_MANIFEST).to_string(),
        }
    }

    /// Parses the held text into an editable document.
    ///
    /// Fails if the text is not well-formed XML, if the root element is not
    /// `<manifest>`, or if a `<project>` is missing its `name` or `path`
    /// attribute. A leading XML declaration is accepted and discarded; the
    /// canonical declaration is regenerated on serialization.
    pub fn parse(self) -> Result<ManifestDocument> {
        let mut reader = Reader::from_str(&self.text);
        reader.config_mut().trim_text(true);

        // None until the <manifest> root has been seen.
        let mut projects: Option<Vec<ProjectElement>> = None;
        let mut open_project = false;

        loop {
            match reader.read_event() {
                // Stripped; the canonical declaration is re-emitted on output.
                Ok(Event::Decl(_)) => {}
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if projects.is_none() => {
                    if e.name().as_ref() != b"manifest" {
                        return Err(LomanError::Parse(format!(
                            "root element must be <manifest>, found <{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        )));
                    }
                    projects = Some(Vec::new());
                }
                Ok(Event::Empty(ref e)) => {
                    if open_project || e.name().as_ref() != b"project" {
                        return Err(unexpected_element(e));
                    }
                    if let Some(projects) = projects.as_mut() {
                        projects.push(parse_project(e)?);
                    }
                }
                Ok(Event::Start(ref e)) => {
                    if open_project || e.name().as_ref() != b"project" {
                        return Err(unexpected_element(e));
                    }
                    // <project ...></project> is accepted as equivalent to
                    // the self-closing form.
                    if let Some(projects) = projects.as_mut() {
                        projects.push(parse_project(e)?);
                    }
                    open_project = true;
                }
                Ok(Event::End(ref e)) => {
                    if e.name().as_ref() == b"project" {
                        open_project = false;
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(LomanError::Parse(e.to_string()));
                }
            }
        }

        let projects = projects
            .ok_or_else(|| LomanError::Parse("missing <manifest> root element".to_string()))?;
        Ok(ManifestDocument { projects })
    }
}

/// A parsed, editable manifest.
///
/// Projects keep document order; edits only ever append at the end of the
/// root, matching how the repo tool rewrites local manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    projects: Vec<ProjectElement>,
}

impl ManifestDocument {
    /// Projects in document order.
    pub fn projects(&self) -> &[ProjectElement] {
        &self.projects
    }

    /// Finds the project with the given name.
    ///
    /// Names are unique within a well-formed manifest, so the first match is
    /// the only one.
    pub fn get_project(&self, name: &str) -> Option<&ProjectElement> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Appends a copy of `element` at the end of the root.
    ///
    /// No duplicate checking; conflict policy lives in
    /// [`add_workon_project`](Self::add_workon_project) and
    /// [`add_workon_project_element`](Self::add_workon_project_element).
    pub fn add_project_element(&mut self, element: &ProjectElement) {
        self.projects.push(element.clone());
    }

    /// Appends a new project without a workon marker and returns it.
    pub fn add_project(&mut self, name: &str, path: &str) -> &ProjectElement {
        let idx = self.projects.len();
        self.projects.push(ProjectElement::new(name, path));
        &self.projects[idx]
    }

    /// Adds a project marked `workon="True"`.
    ///
    /// Returns true if the document ends up containing `name` at `path`:
    /// either it was inserted, or an identical entry was already present
    /// (idempotent re-add). Returns false, leaving the document unchanged,
    /// when `name` is already bound to a different path or `path` is already
    /// claimed by a different project.
    pub fn add_workon_project(&mut self, name: &str, path: &str) -> bool {
        if let Some(existing) = self.get_project(name) {
            return existing.path == path;
        }
        if self.projects.iter().any(|p| p.path == path) {
            return false;
        }
        self.projects.push(ProjectElement {
            name: name.to_string(),
            path: path.to_string(),
            workon: Some(WORKON_VALUE.to_string()),
        });
        true
    }

    /// Adds a copy of a project sourced from another document, marked
    /// `workon="True"` regardless of the source's own workon attribute.
    ///
    /// Same conflict semantics as [`add_workon_project`](Self::add_workon_project).
    /// The source element is not modified.
    pub fn add_workon_project_element(&mut self, element: &ProjectElement) -> bool {
        self.add_workon_project(&element.name, &element.path)
    }
}

/// Canonical serialization: the UTF-8 declaration, then one line per tag.
///
/// Re-parsing the output and serializing again yields byte-identical text.
impl fmt::Display for ManifestDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(XML_DECLARATION)?;
        writeln!(f, "<manifest>")?;
        for project in &self.projects {
            write!(
                f,
                "<project name=\"{}\" path=\"{}\"",
                escape(&project.name),
                escape(&project.path)
            )?;
            if let Some(workon) = &project.workon {
                write!(f, " workon=\"{}\"", escape(workon))?;
            }
            writeln!(f, " />")?;
        }
        write!(f, "</manifest>")
    }
}

fn unexpected_element(e: &BytesStart) -> LomanError {
    LomanError::Parse(format!(
        "unexpected element <{}>; a manifest may only contain <project> entries",
        String::from_utf8_lossy(e.name().as_ref())
    ))
}

fn parse_project(e: &BytesStart) -> Result<ProjectElement> {
    Ok(ProjectElement {
        name: require_attr(e, b"name")?,
        path: require_attr(e, b"path")?,
        workon: get_attr(e, b"workon")?,
    })
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| LomanError::Parse(format!("Invalid attribute: {e}")))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| LomanError::Parse(format!("Invalid attribute value: {e}")))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn require_attr(e: &BytesStart, name: &[u8]) -> Result<String> {
    get_attr(e, name)?.ok_or_else(|| {
        LomanError::Parse(format!(
            "<project> is missing required attribute '{}'",
            String::from_utf8_lossy(name)
        ))
    })
}
