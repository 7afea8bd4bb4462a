//! Widget project manifest (`package.json`) parsing.
//!
//! Existing widget projects carry their metadata in an npm-style
//! `package.json` at the project root. Detection reads it once to seed the
//! upgrade prompts. Only a handful of attributes matter here:
//!
//! ```json
//! {
//!   "description": "My widget",
//!   "author": "Jane Doe",
//!   "copyright": "2026 Jane Doe",
//!   "license": "Apache-2.0",
//!   "devDependencies": { "grunt": "^1.0" }
//! }
//! ```
//!
//! The `devDependencies` mapping is only ever probed for the presence of
//! the `grunt` key, which decides which build tool the project was
//! generated with.
//!
//! ## Reserved Names
//!
//! Widget names cannot collide with the directory names the scaffold
//! itself emits. See [`RESERVED_NAMES`].

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::errors::WidgenError;

/// Names that cannot be used as widget names.
///
/// All of them clash with files or directories the generated project uses.
pub const RESERVED_NAMES: &[&str] = &[
    "src",
    "dist",
    "node_modules",
    "test",
    "tests",
    "typings",
    "xsd",
    "widget",
    "package",
];

/// The build tool a widget project uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Builder {
    /// Grunt task runner.
    Grunt,
    /// Gulp task runner.
    Gulp,
}

impl Builder {
    /// The `devDependencies` key whose presence selects this builder.
    ///
    /// Only `grunt` is probed; any project without it is assumed to use gulp.
    pub const DETECTION_KEY: &'static str = "grunt";

    /// Lowercase identifier as it appears in generated files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Gulp => "gulp",
        }
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of `package.json` that detection cares about.
///
/// Unknown fields (name, scripts, dependencies, ...) are ignored.
/// `devDependencies` is required: a manifest without it cannot answer the
/// builder question and is treated as unreadable, matching the fatal
/// "package read error" path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Free-form project description.
    pub description: Option<String>,

    /// Author display string.
    pub author: Option<String>,

    /// Copyright line.
    pub copyright: Option<String>,

    /// License identifier.
    pub license: Option<String>,

    /// Development dependency map, probed for the builder key.
    pub dev_dependencies: HashMap<String, String>,
}

impl PackageManifest {
    /// Reads and parses a `package.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`WidgenError::ManifestRead`] when the file cannot be read
    /// or does not parse as a manifest. This is a fatal condition for the
    /// run; no partial manifest state is ever used.
    pub fn read(path: &Path) -> Result<Self, WidgenError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WidgenError::manifest_read(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| WidgenError::manifest_read(e.to_string()))
    }

    /// Derives the build tool from the dependency map.
    #[must_use]
    pub fn builder(&self) -> Builder {
        if self.dev_dependencies.contains_key(Builder::DETECTION_KEY) {
            Builder::Grunt
        } else {
            Builder::Gulp
        }
    }
}

/// Validates a widget name for use in generated file and class names.
///
/// # Rules
///
/// - Must not be empty
/// - Must start with an ASCII letter
/// - Can only contain alphanumeric characters, underscores, and hyphens
/// - Must not be a reserved name
///
/// # Errors
///
/// Returns an error with a descriptive message if the name is invalid.
pub fn validate_widget_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        bail!("Widget name cannot be empty");
    };

    if !first_char.is_ascii_alphabetic() {
        bail!("Widget name '{name}' must start with a letter");
    }

    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-' {
            bail!(
                "Widget name '{name}' contains invalid character '{ch}'. \
                 Only letters, numbers, underscores, and hyphens are allowed."
            );
        }
    }

    let name_lower = name.to_lowercase();
    if RESERVED_NAMES.contains(&name_lower.as_str()) {
        bail!(
            "Widget name '{name}' is reserved. \
             Please choose a different name."
        );
    }

    Ok(())
}
