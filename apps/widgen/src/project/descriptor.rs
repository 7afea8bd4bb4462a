//! Module descriptor (`src/package.xml`) parsing.
//!
//! The descriptor is a small, fixed XML fragment shipped inside every
//! generated widget project. Detection reads exactly one thing from it:
//! the `version` attribute of the first `clientModule` element.
//!
//! ```xml
//! <package xmlns="http://www.example.org/package/1.0">
//!     <clientModule name="MyWidget" version="2.4" xmlns="...">
//!         ...
//!     </clientModule>
//! </package>
//! ```
//!
//! Versions in the wild have two or three dot-separated numeric
//! components; [`normalize_version`] pads the two-component form so the
//! rest of the program only ever sees `X.Y.Z`.

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::errors::WidgenError;

/// The parts of the descriptor that detection cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// The `clientModule` version attribute, as written in the file.
    pub version: Option<String>,
}

/// Reads and parses a descriptor file.
///
/// This is the one asynchronous operation in the detection stage: the
/// caller awaits it exactly once and resumes linearly afterwards.
///
/// # Errors
///
/// Returns [`WidgenError::DescriptorParse`] when the file is not
/// well-formed or has no `clientModule` element. Fatal for the run.
pub async fn load(path: &Path) -> Result<ModuleDescriptor> {
    let xml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| WidgenError::descriptor_parse(e.to_string()))?;
    Ok(parse(&xml)?)
}

/// Parses descriptor XML.
fn parse(xml: &str) -> Result<ModuleDescriptor, WidgenError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| WidgenError::descriptor_parse(e.to_string()))?;

    // Match on the local name: descriptors in the wild carry a default
    // namespace on both package and clientModule.
    let module = doc
        .descendants()
        .find(|node| node.tag_name().name() == "clientModule")
        .ok_or_else(|| {
            WidgenError::descriptor_parse("descriptor has no clientModule element")
        })?;

    Ok(ModuleDescriptor {
        version: module.attribute("version").map(str::to_string),
    })
}

/// Normalizes a dotted version to exactly three components.
///
/// A two-component `X.Y` gets `.0` appended; anything else is returned
/// unchanged.
#[must_use]
pub fn normalize_version(version: &str) -> String {
    if version.split('.').count() == 2 {
        format!("{version}.0")
    } else {
        version.to_string()
    }
}

/// Validates a user-entered widget version.
///
/// Accepts two or three dot-separated numeric components; the normalized
/// form must parse as a plain semantic version.
///
/// # Errors
///
/// Returns an error with a descriptive message if the value is invalid.
pub fn validate_version_input(value: &str) -> Result<()> {
    let components = value.split('.').count();
    if components != 2 && components != 3 {
        bail!("Version '{value}' must have two or three dot-separated components, like 1.0 or 1.0.0");
    }

    semver::Version::parse(&normalize_version(value))
        .map(|_| ())
        .with_context(|| format!("Version '{value}' is not a valid version number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<package xmlns="http://www.example.org/package/1.0">
    <clientModule name="MyWidget" version="2.4">
        <widgetFiles>
            <widgetFile path="MyWidget.xml" />
        </widgetFiles>
    </clientModule>
</package>"#;

    #[test]
    fn parse_reads_version_attribute() {
        let descriptor = parse(DESCRIPTOR).unwrap();
        assert_eq!(descriptor.version.as_deref(), Some("2.4"));
    }

    #[test]
    fn parse_without_version_attribute_yields_none() {
        let descriptor = parse(
            r#"<package><clientModule name="MyWidget"></clientModule></package>"#,
        )
        .unwrap();
        assert_eq!(descriptor.version, None);
    }

    #[test]
    fn parse_rejects_malformed_xml() {
        let result = parse("<package><clientModule");
        assert!(matches!(result, Err(WidgenError::DescriptorParse { .. })));
    }

    #[test]
    fn parse_rejects_missing_client_module() {
        let result = parse("<package></package>");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("clientModule"));
    }

    #[tokio::test]
    async fn load_missing_file_is_a_parse_error() {
        let result = load(Path::new("/nonexistent/package.xml")).await;
        assert!(result.is_err());
    }

    #[test]
    fn normalize_pads_two_component_versions() {
        assert_eq!(normalize_version("2.4"), "2.4.0");
        assert_eq!(normalize_version("10.0"), "10.0.0");
    }

    #[test]
    fn normalize_is_identity_for_three_components() {
        assert_eq!(normalize_version("3.1.0"), "3.1.0");
        assert_eq!(normalize_version("5.2.7"), "5.2.7");
    }

    #[test]
    fn validate_version_input_accepts_two_and_three_components() {
        assert!(validate_version_input("1.0").is_ok());
        assert!(validate_version_input("1.0.0").is_ok());
        assert!(validate_version_input("12.34.56").is_ok());
    }

    #[test]
    fn validate_version_input_rejects_garbage() {
        assert!(validate_version_input("1").is_err());
        assert!(validate_version_input("1.2.3.4").is_err());
        assert!(validate_version_input("one.two").is_err());
        assert!(validate_version_input("").is_err());
    }
}
