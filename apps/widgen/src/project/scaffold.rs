//! Scaffold writing stage.
//!
//! Once detection and prompting have both finished, the collected answers
//! are merged with the detected metadata into a [`WidgetSpec`] and the
//! project tree is rendered from templates. Nothing here runs against an
//! unvalidated or partially detected state: the caller only reaches this
//! module with a complete spec in hand.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::errors::WidgenError;
use crate::project::detect::DetectedState;
use crate::project::manifest::Builder;
use crate::prompts::{Boilerplate, License, WidgetAnswers};
use crate::templates::{TemplateEngine, WIDGET_XSD};

/// Name of the answers marker dropped while a scaffold run is writing.
///
/// The finish stage removes it again, best-effort.
pub const RUN_MARKER: &str = ".widgenrc.json";

/// The fully merged inputs of the writing stage.
///
/// Also the template render context, so field names are what templates
/// refer to.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSpec {
    /// Widget (and generated class) name.
    pub widget_name: String,
    /// Lowercased name used for npm and style classes.
    pub package_name: String,
    /// Project description.
    pub description: String,
    /// Widget version, as answered.
    pub version: String,
    /// Author display string.
    pub author: String,
    /// Copyright line.
    pub copyright: String,
    /// License identifier.
    pub license: License,
    /// Build tool identifier.
    pub builder: Builder,
    /// Convenience flag for templates: `builder == grunt`.
    pub grunt: bool,
    /// Boilerplate flavor the widget sources come from.
    pub boilerplate: Boilerplate,
    /// Emit unit test files.
    pub unit_tests: bool,
    /// Emit end-to-end test files.
    pub e2e_tests: bool,
    /// Convenience flag for templates: any test option selected.
    pub tests: bool,
    /// Version of this generator, stamped into generated files.
    pub generator_version: String,
}

impl WidgetSpec {
    /// Merges prompt answers with detected metadata.
    ///
    /// Answers win; blank answers fall back to whatever the existing
    /// project already declared.
    #[must_use]
    pub fn assemble(answers: WidgetAnswers, current: &DetectedState) -> Self {
        let package_name = answers.widget_name.to_lowercase();
        let description = answers
            .description
            .or_else(|| current.description.clone())
            .unwrap_or_default();
        let author = answers
            .author
            .or_else(|| current.author.clone())
            .unwrap_or_default();
        let copyright = answers
            .copyright
            .or_else(|| current.copyright.clone())
            .unwrap_or_default();

        Self {
            widget_name: answers.widget_name,
            package_name,
            description,
            version: answers.version,
            author,
            copyright,
            license: answers.license,
            builder: answers.builder,
            grunt: answers.builder == Builder::Grunt,
            boilerplate: answers.boilerplate,
            unit_tests: answers.unit_tests,
            e2e_tests: answers.e2e_tests,
            tests: answers.unit_tests || answers.e2e_tests,
            generator_version: String::from(env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Renders the full project tree into `target`.
///
/// Existing files are overwritten; that is what an upgrade is.
///
/// # Errors
///
/// Returns an error when a template fails to render or a file cannot be
/// written.
pub fn write_project(target: &Path, spec: &WidgetSpec, engine: &TemplateEngine) -> Result<()> {
    write_run_marker(target, spec)?;

    write_rendered(engine, spec, target, "common/package.json", "package.json")?;
    write_rendered(engine, spec, target, "common/webpack.config.js", "webpack.config.js")?;
    write_rendered(engine, spec, target, "common/babelrc", ".babelrc")?;
    write_rendered(engine, spec, target, "common/gitignore", ".gitignore")?;
    write_rendered(engine, spec, target, "common/gitattributes", ".gitattributes")?;
    write_rendered(engine, spec, target, "common/tslint.json", "tslint.json")?;
    write_rendered(engine, spec, target, "common/tsconfig.json", "tsconfig.json")?;
    if spec.tests {
        write_rendered(engine, spec, target, "common/karma.conf.js", "karma.conf.js")?;
    }
    match spec.builder {
        Builder::Grunt => {
            write_rendered(engine, spec, target, "common/Gruntfile.js", "Gruntfile.js")?;
        }
        Builder::Gulp => {
            write_rendered(engine, spec, target, "common/Gulpfile.js", "Gulpfile.js")?;
        }
    }

    write_rendered(engine, spec, target, "common/package.xml", "src/package.xml")?;
    write_file(&target.join("xsd").join("widget.xsd"), WIDGET_XSD)?;

    write_widget_sources(target, spec, engine)?;

    Ok(())
}

/// Renders the boilerplate-specific widget sources.
fn write_widget_sources(target: &Path, spec: &WidgetSpec, engine: &TemplateEngine) -> Result<()> {
    let flavor = spec.boilerplate.as_str();
    let name = &spec.widget_name;

    write_rendered(engine, spec, target, &format!("{flavor}/README.md"), "README.md")?;
    write_rendered(
        engine,
        spec,
        target,
        &format!("{flavor}/widget.xml"),
        &format!("src/{name}.xml"),
    )?;
    write_rendered(
        engine,
        spec,
        target,
        &format!("{flavor}/webmodeler.ts"),
        &format!("src/{name}.webmodeler.ts"),
    )?;
    write_rendered(
        engine,
        spec,
        target,
        &format!("{flavor}/widget.css"),
        &format!("src/ui/{name}.css"),
    )?;
    write_rendered(
        engine,
        spec,
        target,
        &format!("{flavor}/component.ts"),
        &format!("src/components/{name}.ts"),
    )?;
    write_rendered(
        engine,
        spec,
        target,
        &format!("{flavor}/container.ts"),
        &format!("src/components/{name}Container.ts"),
    )?;

    if spec.unit_tests {
        write_rendered(
            engine,
            spec,
            target,
            &format!("{flavor}/component.spec.ts"),
            &format!("src/components/__tests__/{name}.spec.ts"),
        )?;
    }

    // The empty shell has nothing worth driving a browser against.
    if spec.e2e_tests && spec.boilerplate != Boilerplate::Empty {
        write_rendered(
            engine,
            spec,
            target,
            "badge/e2e.spec.ts",
            &format!("tests/e2e/{name}.spec.ts"),
        )?;
        write_rendered(
            engine,
            spec,
            target,
            "badge/home.page.ts",
            "tests/e2e/pages/home.page.ts",
        )?;
        write_rendered(engine, spec, target, "badge/wdio.conf.js", "tests/e2e/wdio.conf.js")?;
    }

    Ok(())
}

/// Drops the run marker recording what this run is generating.
fn write_run_marker(target: &Path, spec: &WidgetSpec) -> Result<()> {
    let marker = serde_json::json!({
        "generator": {
            "version": spec.generator_version,
            "widgetName": spec.widget_name,
            "boilerplate": spec.boilerplate,
            "builder": spec.builder,
        }
    });
    write_file(&target.join(RUN_MARKER), &format!("{marker:#}\n"))
}

/// Renders one template into its destination below `target`.
fn write_rendered(
    engine: &TemplateEngine,
    spec: &WidgetSpec,
    target: &Path,
    template: &str,
    destination: &str,
) -> Result<()> {
    let content = engine.render(template, spec)?;
    write_file(&target.join(destination), &content)
}

/// Writes a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| WidgenError::io(format!("failed to create {}", parent.display()), e))?;
    }
    std::fs::write(path, content)
        .map_err(|e| WidgenError::io(format!("failed to write {}", path.display()), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("widgen_test_{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_dir_all(path);
    }

    fn answers() -> WidgetAnswers {
        WidgetAnswers {
            widget_name: String::from("BadgeCounter"),
            description: Some(String::from("Shows a counter")),
            version: String::from("1.0.0"),
            author: Some(String::from("Jane")),
            copyright: Some(String::from("2026 Jane")),
            license: License::Mit,
            boilerplate: Boilerplate::Badge,
            builder: Builder::Grunt,
            unit_tests: false,
            e2e_tests: false,
        }
    }

    #[test]
    fn assemble_lowercases_package_name() {
        let spec = WidgetSpec::assemble(answers(), &DetectedState::default());
        assert_eq!(spec.package_name, "badgecounter");
        assert!(spec.grunt);
        assert!(!spec.tests);
    }

    #[test]
    fn assemble_falls_back_to_detected_metadata() {
        let mut a = answers();
        a.description = None;
        a.author = None;

        let current = DetectedState {
            description: Some(String::from("carried description")),
            author: Some(String::from("carried author")),
            ..DetectedState::default()
        };

        let spec = WidgetSpec::assemble(a, &current);
        assert_eq!(spec.description, "carried description");
        assert_eq!(spec.author, "carried author");
        assert_eq!(spec.copyright, "2026 Jane");
    }

    #[test]
    fn write_project_emits_the_grunt_tree() {
        let dir = temp_dir();
        let engine = TemplateEngine::new().unwrap();
        let spec = WidgetSpec::assemble(answers(), &DetectedState::default());

        write_project(&dir, &spec, &engine).unwrap();

        for path in [
            "package.json",
            "webpack.config.js",
            ".babelrc",
            ".gitignore",
            ".gitattributes",
            "tslint.json",
            "tsconfig.json",
            "Gruntfile.js",
            "README.md",
            "src/package.xml",
            "src/BadgeCounter.xml",
            "src/BadgeCounter.webmodeler.ts",
            "src/ui/BadgeCounter.css",
            "src/components/BadgeCounter.ts",
            "src/components/BadgeCounterContainer.ts",
            "xsd/widget.xsd",
            RUN_MARKER,
        ] {
            assert!(dir.join(path).exists(), "missing {path}");
        }
        assert!(!dir.join("Gulpfile.js").exists());
        assert!(!dir.join("karma.conf.js").exists());

        let manifest = fs::read_to_string(dir.join("package.json")).unwrap();
        assert!(manifest.contains(r#""name": "badgecounter""#));
        assert!(manifest.contains(r#""version": "1.0.0""#));
        assert!(manifest.contains(r#""grunt""#));

        let descriptor = fs::read_to_string(dir.join("src/package.xml")).unwrap();
        assert!(descriptor.contains(r#"version="1.0.0""#));

        cleanup(&dir);
    }

    #[test]
    fn write_project_gulp_with_tests() {
        let dir = temp_dir();
        let engine = TemplateEngine::new().unwrap();

        let mut a = answers();
        a.builder = Builder::Gulp;
        a.unit_tests = true;
        a.e2e_tests = true;
        let spec = WidgetSpec::assemble(a, &DetectedState::default());

        write_project(&dir, &spec, &engine).unwrap();

        assert!(dir.join("Gulpfile.js").exists());
        assert!(!dir.join("Gruntfile.js").exists());
        assert!(dir.join("karma.conf.js").exists());
        assert!(
            dir.join("src/components/__tests__/BadgeCounter.spec.ts")
                .exists()
        );
        assert!(dir.join("tests/e2e/BadgeCounter.spec.ts").exists());
        assert!(dir.join("tests/e2e/pages/home.page.ts").exists());
        assert!(dir.join("tests/e2e/wdio.conf.js").exists());

        cleanup(&dir);
    }

    #[test]
    fn empty_boilerplate_skips_e2e_files() {
        let dir = temp_dir();
        let engine = TemplateEngine::new().unwrap();

        let mut a = answers();
        a.boilerplate = Boilerplate::Empty;
        a.e2e_tests = true;
        let spec = WidgetSpec::assemble(a, &DetectedState::default());

        write_project(&dir, &spec, &engine).unwrap();

        assert!(dir.join("src/BadgeCounter.xml").exists());
        assert!(!dir.join("tests").exists());
        // karma.conf.js still comes along, a test option was selected
        assert!(dir.join("karma.conf.js").exists());

        cleanup(&dir);
    }

    #[test]
    fn write_project_overwrites_existing_files() {
        let dir = temp_dir();
        let engine = TemplateEngine::new().unwrap();
        fs::write(dir.join("README.md"), "old content").unwrap();

        let spec = WidgetSpec::assemble(answers(), &DetectedState::default());
        write_project(&dir, &spec, &engine).unwrap();

        let readme = fs::read_to_string(dir.join("README.md")).unwrap();
        assert!(readme.contains("BadgeCounter"));
        assert!(!readme.contains("old content"));

        cleanup(&dir);
    }
}
