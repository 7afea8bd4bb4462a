//! Project-state detection.
//!
//! Before anything is asked or written, a run classifies the target
//! directory: a fresh location to scaffold into, or an existing widget
//! project to upgrade in place. The classification and any metadata
//! carried forward live in [`DetectedState`], an ephemeral value built
//! once per run and handed to the prompt stage.
//!
//! ## Classification
//!
//! - A `src` subdirectory marks an existing project; its prior name,
//!   version, and manifest metadata seed the upgrade prompts.
//! - A non-empty target without `src` is occupied by unrelated content
//!   and aborts the run before any prompt or write.
//! - Anything else (empty or absent target) is a fresh scaffold.
//!
//! Detection only reads. All of its failure paths are terminal: an
//! unreadable manifest, an unparseable descriptor, or a conflicting
//! directory ends the run with no partial state.

use anyhow::Result;
use std::path::Path;

use crate::errors::WidgenError;
use crate::project::descriptor::{self, normalize_version};
use crate::project::manifest::{Builder, PackageManifest};

/// Version default shown when no descriptor supplies one.
pub const DEFAULT_VERSION: &str = "3.1.0";

/// Name default used when the `src` layout does not pin one down.
pub const DEFAULT_NAME: &str = "CurrentWidget";

/// What detection learned about the target directory.
///
/// Lives for one invocation: created at the start of a run, consumed by
/// the prompt stage, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedState {
    /// `true` for a fresh scaffold, `false` for an existing project.
    pub is_new: bool,

    /// Current widget version, always normalized to `X.Y.Z`.
    pub version: String,

    /// Current widget name.
    pub name: String,

    /// Description carried over from the project manifest.
    pub description: Option<String>,

    /// Author carried over from the project manifest.
    pub author: Option<String>,

    /// Copyright line carried over from the project manifest.
    pub copyright: Option<String>,

    /// License identifier carried over from the project manifest.
    pub license: Option<String>,

    /// Build tool the existing project was generated with.
    pub builder: Option<Builder>,
}

impl Default for DetectedState {
    fn default() -> Self {
        Self {
            is_new: true,
            version: String::from(DEFAULT_VERSION),
            name: String::from(DEFAULT_NAME),
            description: None,
            author: None,
            copyright: None,
            license: None,
            builder: None,
        }
    }
}

/// Inspects `target` and classifies it.
///
/// The descriptor parse is the single awaited operation; everything else
/// is synchronous and strictly sequential.
///
/// # Errors
///
/// - [`WidgenError::ManifestRead`] - `package.json` present but unreadable
///   or unparseable.
/// - [`WidgenError::DescriptorParse`] - `src/package.xml` present but not
///   well-formed.
/// - [`WidgenError::DirectoryConflict`] - non-empty target without `src`.
pub async fn detect(target: &Path) -> Result<DetectedState> {
    let mut state = DetectedState::default();

    let top_dirs = subdirectories(target)?;
    if top_dirs.iter().any(|name| name == "src") {
        let src = target.join("src");

        // Exactly one subdirectory pins the widget name; zero or several
        // keep the default without complaint.
        let src_dirs = subdirectories(&src)?;
        if let [only] = src_dirs.as_slice() {
            state.name.clone_from(only);
        }

        let manifest_path = target.join("package.json");
        if is_populated_file(&manifest_path) {
            let manifest = PackageManifest::read(&manifest_path)?;
            state.builder = Some(manifest.builder());
            state.description = manifest.description;
            state.author = manifest.author;
            state.copyright = manifest.copyright;
            state.license = manifest.license;
        }

        // A populated src directory alone is enough to call the project
        // existing; the descriptor only refines the version.
        state.is_new = false;

        let descriptor_path = src.join("package.xml");
        if is_populated_file(&descriptor_path) {
            let descriptor = descriptor::load(&descriptor_path).await?;
            if let Some(version) = descriptor.version {
                state.version = normalize_version(&version);
            }
        }
    } else if !is_effectively_empty(target) {
        return Err(WidgenError::directory_conflict(target.to_path_buf()).into());
    }

    Ok(state)
}

/// Lists the names of the immediate subdirectories of `dir`.
///
/// An absent directory reads as having none.
fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(WidgenError::io(format!("failed to list {}", dir.display()), e).into());
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| WidgenError::io(format!("failed to list {}", dir.display()), e))?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Returns `true` if `path` is a file with at least one byte of content.
fn is_populated_file(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

/// Returns `true` if `dir` is absent or contains no entries at all.
fn is_effectively_empty(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}
