//! Prompt stage: collects the answers that parameterize a scaffold.
//!
//! The stage runs strictly after detection and strictly before any file
//! is written. For a fresh target it asks the full question list with
//! stock defaults; for an existing project it first asks for an explicit
//! upgrade confirmation (declining ends the run cleanly) and then asks
//! the same questions with the detected metadata as defaults.
//!
//! Prompts read and write plain lines over generic [`BufRead`]/[`Write`]
//! handles so the flows are unit-testable with in-memory buffers; the CLI
//! wires them to stdin/stdout. Every question can be pre-answered with a
//! `generate` flag, and headless runs are built from flags alone.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};

use crate::project::descriptor::validate_version_input;
use crate::project::detect::DetectedState;
use crate::project::manifest::{Builder, validate_widget_name};

/// Widget name offered for fresh scaffolds.
pub const DEFAULT_NEW_NAME: &str = "MyWidget";

/// Widget version offered for fresh scaffolds.
pub const DEFAULT_NEW_VERSION: &str = "1.0.0";

/// License choice offered in the prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum License {
    /// Apache License 2.0.
    #[value(name = "apache-2.0")]
    #[serde(rename = "Apache-2.0")]
    Apache2,
    /// BSD 2-Clause License.
    #[value(name = "bsd-2-clause")]
    #[serde(rename = "BSD-2-Clause")]
    Bsd2,
    /// MIT License.
    #[value(name = "mit")]
    #[serde(rename = "MIT")]
    Mit,
    /// All rights reserved.
    #[value(name = "proprietary")]
    #[serde(rename = "proprietary")]
    Proprietary,
}

impl License {
    /// SPDX-style identifier as written into generated files.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Apache2 => "Apache-2.0",
            Self::Bsd2 => "BSD-2-Clause",
            Self::Mit => "MIT",
            Self::Proprietary => "proprietary",
        }
    }

    /// Maps a stored identifier back to a choice, if it is one of ours.
    #[must_use]
    pub fn from_identifier(value: &str) -> Option<Self> {
        [Self::Apache2, Self::Bsd2, Self::Mit, Self::Proprietary]
            .into_iter()
            .find(|license| license.identifier().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Boilerplate flavor to scaffold from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Boilerplate {
    /// Full example widget (a badge component with container and tests).
    Badge,
    /// Minimal shell with empty sources.
    Empty,
}

impl Boilerplate {
    /// Lowercase identifier, also the template subdirectory name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Badge => "badge",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for Boilerplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete answer set a scaffold run needs.
#[derive(Debug, Clone)]
pub struct WidgetAnswers {
    /// Widget (and class) name.
    pub widget_name: String,
    /// Free-form description; `None` falls back to detected metadata.
    pub description: Option<String>,
    /// Widget version, two or three dotted components.
    pub version: String,
    /// Author; `None` falls back to detected metadata.
    pub author: Option<String>,
    /// Copyright line; `None` falls back to detected metadata.
    pub copyright: Option<String>,
    /// Chosen license.
    pub license: License,
    /// Boilerplate flavor.
    pub boilerplate: Boilerplate,
    /// Build tool to generate for.
    pub builder: Builder,
    /// Emit unit test files.
    pub unit_tests: bool,
    /// Emit end-to-end test files.
    pub e2e_tests: bool,
}

/// Flag-supplied answers. A set field pre-answers its question.
#[derive(Debug, Clone, Default)]
pub struct AnswerOverrides {
    pub widget_name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub license: Option<License>,
    pub boilerplate: Option<Boilerplate>,
    pub builder: Option<Builder>,
    pub unit_tests: bool,
    pub e2e_tests: bool,
    /// Confirm the upgrade without asking.
    pub yes: bool,
}

/// How the prompt stage ended.
#[derive(Debug)]
pub enum PromptOutcome {
    /// Answers collected; the run continues to the write stage.
    Proceed(WidgetAnswers),
    /// The user declined the upgrade; the run ends with success status.
    Declined,
}

/// Per-run question defaults, seeded from stock values or detection.
struct QuestionDefaults {
    name: String,
    version: String,
    description: Option<String>,
    author: Option<String>,
    copyright: Option<String>,
    license: License,
    boilerplate: Boilerplate,
    builder: Builder,
}

impl QuestionDefaults {
    fn for_new() -> Self {
        Self {
            name: String::from(DEFAULT_NEW_NAME),
            version: String::from(DEFAULT_NEW_VERSION),
            description: None,
            author: None,
            copyright: None,
            license: License::Apache2,
            boilerplate: Boilerplate::Badge,
            builder: Builder::Grunt,
        }
    }

    fn for_upgrade(current: &DetectedState) -> Self {
        Self {
            name: current.name.clone(),
            version: current.version.clone(),
            description: current.description.clone(),
            author: current.author.clone(),
            copyright: current.copyright.clone(),
            license: current
                .license
                .as_deref()
                .and_then(License::from_identifier)
                .unwrap_or(License::Apache2),
            boilerplate: Boilerplate::Badge,
            builder: current.builder.unwrap_or(Builder::Grunt),
        }
    }
}

/// Line-oriented prompter over arbitrary input/output handles.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given handles.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Collects answers for a fresh scaffold.
    ///
    /// # Errors
    ///
    /// Returns an error when a flag-supplied answer is invalid or the
    /// input handle fails.
    pub fn collect_new(&mut self, overrides: &AnswerOverrides) -> Result<WidgetAnswers> {
        self.collect(overrides, &QuestionDefaults::for_new())
    }

    /// Asks for upgrade confirmation, then collects answers with the
    /// detected metadata as defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a flag-supplied answer is invalid or the
    /// input handle fails.
    pub fn collect_upgrade(
        &mut self,
        overrides: &AnswerOverrides,
        current: &DetectedState,
    ) -> Result<PromptOutcome> {
        writeln!(
            self.output,
            "Found an existing widget project: {} (version {})",
            current.name, current.version
        )?;

        let confirmed = overrides.yes
            || self.confirm(
                &format!("Upgrade {} to a new version?", current.name),
                true,
            )?;
        if !confirmed {
            return Ok(PromptOutcome::Declined);
        }

        let answers = self.collect(overrides, &QuestionDefaults::for_upgrade(current))?;
        Ok(PromptOutcome::Proceed(answers))
    }

    fn collect(
        &mut self,
        overrides: &AnswerOverrides,
        defaults: &QuestionDefaults,
    ) -> Result<WidgetAnswers> {
        let widget_name = match &overrides.widget_name {
            Some(name) => {
                validate_widget_name(name)?;
                name.clone()
            }
            None => self.ask_validated("Widget name", Some(&defaults.name), &|value| {
                validate_widget_name(value)
            })?,
        };

        let description = match &overrides.description {
            Some(value) => Some(value.clone()),
            None => self.ask_optional("Description", defaults.description.as_deref())?,
        };

        let version = match &overrides.version {
            Some(value) => {
                validate_version_input(value)?;
                value.clone()
            }
            None => self.ask_validated("Version", Some(&defaults.version), &|value| {
                validate_version_input(value)
            })?,
        };

        let author = match &overrides.author {
            Some(value) => Some(value.clone()),
            None => self.ask_optional("Author", defaults.author.as_deref())?,
        };

        // The copyright line defaults to whatever we know: an explicit
        // prior line, otherwise the author we just learned.
        let copyright_default = defaults
            .copyright
            .clone()
            .or_else(|| author.clone());
        let copyright = match &overrides.copyright {
            Some(value) => Some(value.clone()),
            None => self.ask_optional("Copyright", copyright_default.as_deref())?,
        };

        let license = match overrides.license {
            Some(value) => value,
            None => self.choose(
                "License",
                &[
                    (License::Apache2, "Apache License 2.0"),
                    (License::Bsd2, "BSD 2-Clause License"),
                    (License::Mit, "MIT License"),
                    (License::Proprietary, "Proprietary (all rights reserved)"),
                ],
                defaults.license,
            )?,
        };

        let boilerplate = match overrides.boilerplate {
            Some(value) => value,
            None => self.choose(
                "Boilerplate",
                &[
                    (Boilerplate::Badge, "Badge example widget"),
                    (Boilerplate::Empty, "Empty widget shell"),
                ],
                defaults.boilerplate,
            )?,
        };

        let builder = match overrides.builder {
            Some(value) => value,
            None => self.choose(
                "Build tool",
                &[(Builder::Grunt, "Grunt"), (Builder::Gulp, "Gulp")],
                defaults.builder,
            )?,
        };

        let unit_tests = overrides.unit_tests || self.confirm("Add unit tests?", false)?;
        let e2e_tests = overrides.e2e_tests || self.confirm("Add end-to-end tests?", false)?;

        Ok(WidgetAnswers {
            widget_name,
            description,
            version,
            author,
            copyright,
            license,
            boilerplate,
            builder,
            unit_tests,
            e2e_tests,
        })
    }

    /// Prints a prompt and reads one trimmed line.
    ///
    /// Returns `None` at end of input; an empty line yields the default.
    fn ask_line(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        match default {
            Some(value) if !value.is_empty() => write!(self.output, "{prompt} [{value}]: ")?,
            _ => write!(self.output, "{prompt}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read prompt input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(Some(default.unwrap_or("").to_string()))
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Asks until the validator accepts the answer.
    ///
    /// End of input falls back to the default, which still must validate.
    fn ask_validated(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> Result<()>,
    ) -> Result<String> {
        loop {
            let Some(answer) = self.ask_line(prompt, default)? else {
                let fallback = default.unwrap_or("").to_string();
                validate(&fallback)?;
                return Ok(fallback);
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// Asks a free-form question; a blank answer with no default is `None`.
    ///
    /// End of input falls back to the default like an accepted blank line.
    fn ask_optional(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let answer = match self.ask_line(prompt, default)? {
            Some(value) => Some(value),
            None => default.map(str::to_string),
        };
        Ok(answer.filter(|value| !value.is_empty()))
    }

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let Some(answer) = self.ask_line(&format!("{prompt} [{hint}]"), None)? else {
                return Ok(default);
            };
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    /// Presents a numbered choice list.
    fn choose<T: Copy + PartialEq>(
        &mut self,
        prompt: &str,
        options: &[(T, &str)],
        default: T,
    ) -> Result<T> {
        writeln!(self.output, "{prompt}:")?;
        for (index, (_, label)) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {label}", index + 1)?;
        }

        let default_index = options
            .iter()
            .position(|(value, _)| *value == default)
            .unwrap_or(0);
        let default_display = (default_index + 1).to_string();

        loop {
            let Some(answer) =
                self.ask_line(&format!("Select 1-{}", options.len()), Some(&default_display))?
            else {
                return Ok(options[default_index].0);
            };
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(options[n - 1].0),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }
}

/// Builds answers for a fresh scaffold from flags alone.
///
/// # Errors
///
/// Returns an error when a flag-supplied name or version is invalid.
pub fn headless_new(overrides: &AnswerOverrides) -> Result<WidgetAnswers> {
    let defaults = QuestionDefaults::for_new();
    headless(overrides, &defaults)
}

/// Builds the upgrade outcome from flags alone.
///
/// Without `--yes` an existing project is never upgraded headlessly; the
/// outcome is a clean decline, mirroring an interactive "no".
///
/// # Errors
///
/// Returns an error when a flag-supplied name or version is invalid.
pub fn headless_upgrade(
    overrides: &AnswerOverrides,
    current: &DetectedState,
) -> Result<PromptOutcome> {
    if !overrides.yes {
        return Ok(PromptOutcome::Declined);
    }
    let defaults = QuestionDefaults::for_upgrade(current);
    Ok(PromptOutcome::Proceed(headless(overrides, &defaults)?))
}

fn headless(overrides: &AnswerOverrides, defaults: &QuestionDefaults) -> Result<WidgetAnswers> {
    let widget_name = overrides
        .widget_name
        .clone()
        .unwrap_or_else(|| defaults.name.clone());
    validate_widget_name(&widget_name)?;

    let version = overrides
        .version
        .clone()
        .unwrap_or_else(|| defaults.version.clone());
    validate_version_input(&version)?;

    Ok(WidgetAnswers {
        widget_name,
        description: overrides
            .description
            .clone()
            .or_else(|| defaults.description.clone()),
        version,
        author: overrides.author.clone().or_else(|| defaults.author.clone()),
        copyright: overrides
            .copyright
            .clone()
            .or_else(|| defaults.copyright.clone()),
        license: overrides.license.unwrap_or(defaults.license),
        boilerplate: overrides.boilerplate.unwrap_or(defaults.boilerplate),
        builder: overrides.builder.unwrap_or(defaults.builder),
        unit_tests: overrides.unit_tests,
        e2e_tests: overrides.e2e_tests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn collect_new_accepts_all_defaults() {
        // Empty input: every question falls back to its default via EOF.
        let mut p = prompter("");
        let answers = p.collect_new(&AnswerOverrides::default()).unwrap();

        assert_eq!(answers.widget_name, "MyWidget");
        assert_eq!(answers.version, "1.0.0");
        assert_eq!(answers.license, License::Apache2);
        assert_eq!(answers.boilerplate, Boilerplate::Badge);
        assert_eq!(answers.builder, Builder::Grunt);
        assert!(!answers.unit_tests);
        assert!(!answers.e2e_tests);
    }

    #[test]
    fn collect_new_reads_answers_in_order() {
        let mut p = prompter(
            "BadgeCounter\nShows a counter\n2.0\nJane\n2026 Jane\n3\n2\n2\ny\nn\n",
        );
        let answers = p.collect_new(&AnswerOverrides::default()).unwrap();

        assert_eq!(answers.widget_name, "BadgeCounter");
        assert_eq!(answers.description.as_deref(), Some("Shows a counter"));
        assert_eq!(answers.version, "2.0");
        assert_eq!(answers.author.as_deref(), Some("Jane"));
        assert_eq!(answers.copyright.as_deref(), Some("2026 Jane"));
        assert_eq!(answers.license, License::Mit);
        assert_eq!(answers.boilerplate, Boilerplate::Empty);
        assert_eq!(answers.builder, Builder::Gulp);
        assert!(answers.unit_tests);
        assert!(!answers.e2e_tests);
    }

    #[test]
    fn collect_new_reasks_until_name_is_valid() {
        let mut p = prompter("123bad\nGoodName\n");
        let answers = p.collect_new(&AnswerOverrides::default()).unwrap();

        assert_eq!(answers.widget_name, "GoodName");
        let transcript = String::from_utf8(p.output).unwrap();
        assert!(transcript.contains("must start with a letter"));
    }

    #[test]
    fn collect_new_rejects_invalid_override() {
        let overrides = AnswerOverrides {
            widget_name: Some(String::from("123bad")),
            ..AnswerOverrides::default()
        };
        let mut p = prompter("");
        assert!(p.collect_new(&overrides).is_err());
    }

    #[test]
    fn collect_upgrade_decline_ends_cleanly() {
        let current = DetectedState::default();
        let mut p = prompter("n\n");
        let outcome = p
            .collect_upgrade(&AnswerOverrides::default(), &current)
            .unwrap();
        assert!(matches!(outcome, PromptOutcome::Declined));
    }

    #[test]
    fn collect_upgrade_defaults_to_detected_metadata() {
        let current = DetectedState {
            is_new: false,
            version: String::from("2.4.0"),
            name: String::from("OldWidget"),
            description: Some(String::from("old description")),
            author: Some(String::from("Old Author")),
            copyright: None,
            license: Some(String::from("MIT")),
            builder: Some(Builder::Gulp),
        };

        // Confirm the upgrade, then take every default.
        let mut p = prompter("y\n");
        let outcome = p
            .collect_upgrade(&AnswerOverrides::default(), &current)
            .unwrap();

        let PromptOutcome::Proceed(answers) = outcome else {
            panic!("expected a proceed outcome");
        };
        assert_eq!(answers.widget_name, "OldWidget");
        assert_eq!(answers.version, "2.4.0");
        assert_eq!(answers.description.as_deref(), Some("old description"));
        assert_eq!(answers.license, License::Mit);
        assert_eq!(answers.builder, Builder::Gulp);
    }

    #[test]
    fn copyright_defaults_to_author_answer() {
        let mut p = prompter("\n\n\nJane\n\n");
        let answers = p.collect_new(&AnswerOverrides::default()).unwrap();
        assert_eq!(answers.copyright.as_deref(), Some("Jane"));
    }

    #[test]
    fn headless_new_uses_defaults_and_flags() {
        let overrides = AnswerOverrides {
            widget_name: Some(String::from("FlagWidget")),
            unit_tests: true,
            ..AnswerOverrides::default()
        };
        let answers = headless_new(&overrides).unwrap();

        assert_eq!(answers.widget_name, "FlagWidget");
        assert_eq!(answers.version, "1.0.0");
        assert!(answers.unit_tests);
        assert!(!answers.e2e_tests);
    }

    #[test]
    fn headless_new_rejects_bad_version() {
        let overrides = AnswerOverrides {
            version: Some(String::from("not-a-version")),
            ..AnswerOverrides::default()
        };
        assert!(headless_new(&overrides).is_err());
    }

    #[test]
    fn headless_upgrade_without_yes_declines() {
        let current = DetectedState::default();
        let outcome = headless_upgrade(&AnswerOverrides::default(), &current).unwrap();
        assert!(matches!(outcome, PromptOutcome::Declined));
    }

    #[test]
    fn headless_upgrade_with_yes_carries_detected_version() {
        let current = DetectedState {
            is_new: false,
            version: String::from("5.2.0"),
            ..DetectedState::default()
        };
        let overrides = AnswerOverrides {
            yes: true,
            ..AnswerOverrides::default()
        };

        let outcome = headless_upgrade(&overrides, &current).unwrap();
        let PromptOutcome::Proceed(answers) = outcome else {
            panic!("expected a proceed outcome");
        };
        assert_eq!(answers.version, "5.2.0");
        assert_eq!(answers.widget_name, "CurrentWidget");
    }

    #[test]
    fn license_identifier_round_trips() {
        for license in [
            License::Apache2,
            License::Bsd2,
            License::Mit,
            License::Proprietary,
        ] {
            assert_eq!(
                License::from_identifier(license.identifier()),
                Some(license)
            );
        }
        assert_eq!(License::from_identifier("GPL-3.0"), None);
    }
}
